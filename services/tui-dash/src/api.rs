// services/tui-dash/src/api.rs
//
// Wiring between the event loop and the analysis service

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use dashkit::{AnalysisClient, AnalysisOutcome, AnalysisService, DashboardConfig, UploadTicket};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use crate::mock::MockAnalysisService;

pub struct ServiceHandle {
    pub service: Arc<dyn AnalysisService>,
    pub mode_label: String,
}

pub fn build_service(config: &DashboardConfig, demo: bool, demo_latency: Duration) -> Result<ServiceHandle> {
    if demo {
        info!("Using in-process demo analysis service");
        return Ok(ServiceHandle {
            service: Arc::new(MockAnalysisService::new().with_latency(demo_latency)),
            mode_label: "DEMO".to_string(),
        });
    }

    let client = AnalysisClient::new(&config.analysis)?;
    info!(endpoint = %client.endpoint(), "Using remote analysis service");
    let mode_label = format!("LIVE {}", client.endpoint());
    Ok(ServiceHandle {
        service: Arc::new(client),
        mode_label,
    })
}

/// Runs one analysis off the UI loop; the outcome (and its loading guard) comes back over `outcomes`.
pub fn spawn_analysis(
    service: Arc<dyn AnalysisService>,
    ticket: UploadTicket,
    outcomes: UnboundedSender<AnalysisOutcome>,
) {
    tokio::spawn(async move {
        let outcome = ticket.submit(service.as_ref()).await;
        if outcomes.send(outcome).is_err() {
            debug!("UI loop gone, dropping analysis outcome");
        }
    });
}
