use serde::{Deserialize, Deserializer, Serialize};

/// Analysis result for one uploaded dataset; replaced wholesale, never merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ReportMeta>,
    pub summary: Vec<SummaryItem>,
    pub charts: Vec<ChartSpec>,
    pub anomalies: Vec<Anomaly>,
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMeta {
    pub rows: u64,
    pub columns: u64,
    pub generated_at: String,
}

impl ReportMeta {
    pub fn caption(&self) -> String {
        format!("{} rows × {} columns", self.rows, self.columns)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryItem {
    pub title: String,
    #[serde(deserialize_with = "display_value")]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anomaly {
    pub column: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub chart_type: String,
    pub columns: Vec<String>,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<ChartData>,
}

impl ChartSpec {
    /// Column list as shown on the card and used as the series label.
    pub fn joined_columns(&self) -> String {
        self.columns.join(", ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

// The analysis service emits summary values as numbers; the dashboard only displays them.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Int(i64),
    Float(f64),
}

fn display_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawValue::deserialize(deserializer)? {
        RawValue::Text(text) => text,
        RawValue::Int(n) => n.to_string(),
        RawValue::Float(f) => format_number(f),
    })
}

/// Whole floats print without a fraction (`100.0` -> `100`).
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
