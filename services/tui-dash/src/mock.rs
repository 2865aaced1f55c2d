// services/tui-dash/src/mock.rs
//
// In-process analysis service for demo mode

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use dashkit::{
    Anomaly, AnalysisService, ChartData, ChartSpec, DashError, DashboardReport, ReportMeta,
    SelectedFile, SummaryItem,
};
use rand::Rng;

const DEFAULT_LATENCY: Duration = Duration::from_millis(900);

pub struct MockAnalysisService {
    latency: Duration,
    failure_ratio: (u32, u32),
}

impl MockAnalysisService {
    pub fn new() -> Self {
        Self {
            latency: DEFAULT_LATENCY,
            failure_ratio: (1, 8),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn never_failing(mut self) -> Self {
        self.failure_ratio = (0, 1);
        self
    }

    fn generate(&self, file: &SelectedFile) -> dashkit::Result<DashboardReport> {
        let mut rng = rand::thread_rng();

        let (numerator, denominator) = self.failure_ratio;
        if numerator > 0 && rng.gen_ratio(numerator, denominator) {
            return Err(DashError::ServerError {
                status: 400,
                message: "CSV must be UTF-8 encoded.".to_string(),
            });
        }

        let (rows, columns) = dataset_shape(file.bytes());
        let missing = rng.gen_range(0..=rows / 10 + 1);
        let duplicates = rng.gen_range(0..=rows / 50 + 1);

        let summary = vec![
            item("Rows", rows.to_string()),
            item("Columns", columns.to_string()),
            item("Missing values", missing.to_string()),
            item("Duplicate rows", duplicates.to_string()),
        ];

        let age_buckets = ["0-18", "19-30", "31-45", "46-60", "60+"];
        let regions = ["North", "South", "East", "West"];
        let income_buckets = ["<20k", "20-50k", "50-100k", ">100k"];

        let charts = vec![
            chart("histogram", &["age"], "Numeric distribution", Some(random_series(&mut rng, &age_buckets))),
            chart("bar", &["region"], "Category frequency", Some(random_series(&mut rng, &regions))),
            chart("scatter", &["age", "income"], "Possible correlation", None),
            chart("histogram", &["income"], "Numeric distribution", Some(random_series(&mut rng, &income_buckets))),
            chart("line", &["signup_date"], "Trend over time", None),
            chart("bar", &["plan"], "Category frequency", Some(random_series(&mut rng, &["free", "pro", "team"]))),
        ];

        let anomalies = if rng.gen_bool(0.5) {
            Vec::new()
        } else {
            vec![
                Anomaly { column: "income".into(), count: rng.gen_range(1..25) },
                Anomaly { column: "age".into(), count: rng.gen_range(1..5) },
            ]
        };

        let mut insights = vec![format!("{} has {} rows across {} columns", file.name(), rows, columns)];
        if missing > 0 {
            insights.push(format!("{} values are missing and may need imputation", missing));
        }
        if anomalies.is_empty() {
            insights.push("No major issues found".to_string());
        } else {
            insights.push("Outliers detected in income; review before modelling".to_string());
        }

        Ok(DashboardReport {
            meta: Some(ReportMeta {
                rows,
                columns,
                generated_at: Utc::now().to_rfc3339(),
            }),
            summary,
            charts,
            anomalies,
            insights,
        })
    }
}

impl Default for MockAnalysisService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisService for MockAnalysisService {
    async fn analyze(&self, file: &SelectedFile) -> dashkit::Result<DashboardReport> {
        tokio::time::sleep(self.latency).await;
        self.generate(file)
    }
}

/// Data rows and header columns; an empty file still reports one column.
fn dataset_shape(bytes: &[u8]) -> (u64, u64) {
    let text = String::from_utf8_lossy(bytes);
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let columns = lines.next().map_or(1, |header| header.split(',').count()) as u64;
    (lines.count() as u64, columns)
}

fn item(title: &str, value: String) -> SummaryItem {
    SummaryItem {
        title: title.to_string(),
        value,
    }
}

fn chart(chart_type: &str, columns: &[&str], reason: &str, chart_data: Option<ChartData>) -> ChartSpec {
    ChartSpec {
        chart_type: chart_type.to_string(),
        columns: columns.iter().map(|c| c.to_string()).collect(),
        reason: reason.to_string(),
        chart_data,
    }
}

fn random_series(rng: &mut impl Rng, labels: &[&str]) -> ChartData {
    ChartData {
        labels: labels.iter().map(|l| l.to_string()).collect(),
        values: labels.iter().map(|_| rng.gen_range(1..400) as f64).collect(),
    }
}
