// services/web-dash/src/components/mod.rs
//
// NIRIKSHAN Dashboard - UI Components
//

mod anomalies;
mod charts;
mod error;
mod header;
mod insights;
pub mod plot;
mod summary;
mod upload;

pub use anomalies::AnomalyList;
pub use charts::ChartGrid;
pub use error::ErrorBanner;
pub use header::Header;
pub use insights::InsightList;
pub use summary::SummaryCards;
pub use upload::UploadPanel;
