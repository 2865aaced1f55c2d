// services/web-dash/src/components/anomalies.rs
//
// NIRIKSHAN Dashboard - Anomaly Component
//

use dashkit::views::anomaly_total;
use dashkit::{Anomaly, AnomalyPanel};
use leptos::*;

#[component]
pub fn AnomalyList(anomalies: Vec<Anomaly>) -> impl IntoView {
    let panel = AnomalyPanel::new(&anomalies);
    let section_class = if panel.is_alert() {
        "panel anomalies-panel alert"
    } else {
        "panel anomalies-panel"
    };

    let content = match panel.message() {
        Some(message) => view! { <p class="anomalies-empty">{message}</p> }.into_view(),
        None => {
            let total = anomaly_total(panel.items());
            let rows = panel
                .items()
                .iter()
                .map(|anomaly| {
                    view! {
                        <li class="anomaly-item">
                            <span class="anomaly-column">{anomaly.column.clone()}</span>
                            <span class="anomaly-count">{format!("{} irregular values", anomaly.count)}</span>
                        </li>
                    }
                })
                .collect_view();
            view! {
                <p class="anomalies-total">{format!("{} flagged values", total)}</p>
                <ul class="anomalies-list">{rows}</ul>
            }
            .into_view()
        }
    };

    view! {
        <section class=section_class>
            <h2 class="panel-title">"Anomalies"</h2>
            {content}
        </section>
    }
}
