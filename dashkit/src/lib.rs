// dashkit/src/lib.rs
//
// Report contract, analysis client and dashboard state machine shared by
// the terminal and browser front-ends.
//

pub mod charts;
pub mod client;
pub mod config;
pub mod controller;
pub mod errors;
pub mod loading;
pub mod theme;
pub mod types;
pub mod upload;
pub mod views;

pub use charts::{CardBody, ChartCard, ChartView, Plot, PlotRenderer, RendererRegistry};
pub use client::{AnalysisClient, AnalysisService};
pub use config::{load_config, AnalysisConfig, DashboardConfig};
pub use controller::{DashboardController, DashboardState, PageBody, PageView, Phase, ReportView};
pub use errors::{DashError, Result};
pub use loading::{LoadingFlag, LoadingGuard};
pub use theme::{ChartPalette, Rgba, Theme};
pub use types::{Anomaly, ChartData, ChartSpec, DashboardReport, ReportMeta, SummaryItem};
pub use upload::{AnalysisOutcome, SelectedFile, UploadControl, UploadTicket};
pub use views::AnomalyPanel;
