// dashkit/src/views.rs
//
// Stateless report slices: summary, anomalies, insights
//

use crate::types::{Anomaly, SummaryItem};

pub const NO_ANOMALIES_MESSAGE: &str = "No anomalies detected";
pub const LOADING_MESSAGE: &str = "Analyzing dataset...";

/// Anomaly section content; an empty list is an explicit message, never a blank container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyPanel<'a> {
    Clear,
    Flagged(&'a [Anomaly]),
}

impl<'a> AnomalyPanel<'a> {
    pub fn new(anomalies: &'a [Anomaly]) -> Self {
        if anomalies.is_empty() {
            AnomalyPanel::Clear
        } else {
            AnomalyPanel::Flagged(anomalies)
        }
    }

    /// Flagged panels are drawn as an alert card.
    pub fn is_alert(&self) -> bool {
        matches!(self, AnomalyPanel::Flagged(_))
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            AnomalyPanel::Clear => Some(NO_ANOMALIES_MESSAGE),
            AnomalyPanel::Flagged(_) => None,
        }
    }

    pub fn items(&self) -> &'a [Anomaly] {
        match self {
            AnomalyPanel::Clear => &[],
            AnomalyPanel::Flagged(items) => items,
        }
    }
}

/// One card per summary entry, in received order.
pub fn summary_cards(summary: &[SummaryItem]) -> impl Iterator<Item = (&str, &str)> {
    summary.iter().map(|item| (item.title.as_str(), item.value.as_str()))
}

/// Total irregular values across flagged columns.
pub fn anomaly_total(anomalies: &[Anomaly]) -> u64 {
    anomalies.iter().map(|a| a.count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DashboardReport;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn empty_anomalies_render_only_the_message(
            titles in prop::collection::vec("[A-Za-z ]{1,12}", 0..6),
            insights in prop::collection::vec(".{0,40}", 0..6),
        ) {
            let report = DashboardReport {
                meta: None,
                summary: titles
                    .into_iter()
                    .map(|title| SummaryItem { title, value: "1".into() })
                    .collect(),
                charts: Vec::new(),
                anomalies: Vec::new(),
                insights,
            };
            let panel = AnomalyPanel::new(&report.anomalies);
            prop_assert_eq!(panel.message(), Some(NO_ANOMALIES_MESSAGE));
            prop_assert!(panel.items().is_empty());
            prop_assert!(!panel.is_alert());
        }

        #[test]
        fn flagged_anomalies_keep_order(counts in prop::collection::vec(0u64..10_000, 1..20)) {
            let anomalies: Vec<Anomaly> = counts
                .iter()
                .enumerate()
                .map(|(i, count)| Anomaly { column: format!("col_{}", i), count: *count })
                .collect();
            let panel = AnomalyPanel::new(&anomalies);

            prop_assert!(panel.is_alert());
            prop_assert_eq!(panel.message(), None);
            prop_assert_eq!(panel.items(), anomalies.as_slice());
            prop_assert_eq!(anomaly_total(&anomalies), counts.iter().sum::<u64>());
        }
    }

    #[test]
    fn summary_cards_follow_received_order() {
        let summary = vec![
            SummaryItem { title: "Rows".into(), value: "100".into() },
            SummaryItem { title: "Columns".into(), value: "5".into() },
        ];
        let cards: Vec<_> = summary_cards(&summary).collect();
        assert_eq!(cards, vec![("Rows", "100"), ("Columns", "5")]);
    }
}
