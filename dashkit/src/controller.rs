// dashkit/src/controller.rs
//
// Dashboard controller: owns report, loading flag, theme and last error;
// composes the child views into a page.
//

use tracing::{info, warn};

use crate::charts::{ChartCard, ChartView, RendererRegistry};
use crate::client::AnalysisService;
use crate::errors::{DashError, Result};
use crate::loading::LoadingFlag;
use crate::theme::Theme;
use crate::types::DashboardReport;
use crate::upload::{AnalysisOutcome, SelectedFile, UploadControl, UploadTicket};
use crate::views::AnomalyPanel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Read-only copy of the controller's state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub theme: Theme,
    pub report: Option<DashboardReport>,
    pub loading: bool,
    pub error: Option<DashError>,
}

#[derive(Debug)]
pub struct PageView<'a> {
    pub theme: Theme,
    pub phase: Phase,
    pub upload_label: &'a str,
    pub analyze_enabled: bool,
    pub error: Option<&'a DashError>,
    pub body: PageBody<'a>,
}

#[derive(Debug)]
pub enum PageBody<'a> {
    Welcome,
    Loading,
    Report(ReportView<'a>),
}

#[derive(Debug)]
pub struct ReportView<'a> {
    pub report: &'a DashboardReport,
    pub charts: Vec<ChartCard>,
    pub chart_toggle: Option<&'static str>,
    pub anomalies: AnomalyPanel<'a>,
}

#[derive(Debug, Default)]
pub struct DashboardController {
    theme: Theme,
    report: Option<DashboardReport>,
    error: Option<DashError>,
    loading: LoadingFlag,
    upload: UploadControl,
    charts: ChartView,
}

impl DashboardController {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn with_registry(theme: Theme, registry: RendererRegistry) -> Self {
        Self {
            theme,
            charts: ChartView::new(registry),
            ..Self::default()
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn report(&self) -> Option<&DashboardReport> {
        self.report.as_ref()
    }

    pub fn error(&self) -> Option<&DashError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn phase(&self) -> Phase {
        if self.is_loading() {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Failed
        } else if self.report.is_some() {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }

    pub fn snapshot(&self) -> DashboardState {
        DashboardState {
            theme: self.theme,
            report: self.report.clone(),
            loading: self.is_loading(),
            error: self.error.clone(),
        }
    }

    pub fn upload(&self) -> &UploadControl {
        &self.upload
    }

    pub fn select_file(&mut self, file: SelectedFile) {
        self.upload.select(file);
    }

    pub fn can_analyze(&self) -> bool {
        self.upload.can_analyze(&self.loading)
    }

    pub fn chart_view(&self) -> &ChartView {
        &self.charts
    }

    pub fn toggle_charts(&mut self) -> bool {
        let total = self.report.as_ref().map_or(0, |r| r.charts.len());
        self.charts.toggle(total)
    }

    /// Enters `Loading`. The returned ticket keeps the loading window open until
    /// its outcome is handed back to [`finish`](Self::finish) or dropped.
    pub fn begin_analysis(&mut self) -> Result<UploadTicket> {
        let ticket = self.upload.start(&self.loading)?;
        self.error = None;
        self.charts.collapse();
        Ok(ticket)
    }

    /// Applies an outcome: success replaces the report wholesale, failure keeps it.
    ///
    /// `begin_analysis` cleared the error slot, so anything in it now was recorded
    /// while the request was in flight. Success leaves that error in place; a failed
    /// analysis takes the banner over it.
    pub fn finish(&mut self, outcome: AnalysisOutcome) -> Phase {
        let AnalysisOutcome {
            file_name,
            result,
            guard,
        } = outcome;

        match result {
            Ok(report) => {
                info!(file = %file_name, summary = report.summary.len(), "Report ready");
                self.report = Some(report);
            }
            Err(e) => {
                warn!(file = %file_name, error = %e, "Keeping previous report after failed analysis");
                if let Some(pending) = self.error.replace(e) {
                    warn!(error = %pending, "Replacing error recorded during analysis");
                }
            }
        }

        drop(guard);
        self.phase()
    }

    /// Surfaces a failure that happened outside an analysis, e.g. an unreadable file.
    /// While loading the error is held back by [`view`](Self::view) and shown once
    /// the analysis settles.
    pub fn record_error(&mut self, error: DashError) {
        warn!(error = %error, loading = self.is_loading(), "Dashboard error");
        self.error = Some(error);
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub async fn analyze<S>(&mut self, service: &S) -> Result<Phase>
    where
        S: AnalysisService + ?Sized,
    {
        let ticket = self.begin_analysis()?;
        let outcome = ticket.submit(service).await;
        Ok(self.finish(outcome))
    }

    /// Page for the current state; loading hides any report.
    pub fn view(&self) -> PageView<'_> {
        let phase = self.phase();
        let body = match (phase, self.report.as_ref()) {
            (Phase::Loading, _) => PageBody::Loading,
            (_, Some(report)) => PageBody::Report(ReportView {
                report,
                charts: self.charts.cards(&report.charts, self.theme),
                chart_toggle: self.charts.toggle_label(report.charts.len()),
                anomalies: AnomalyPanel::new(&report.anomalies),
            }),
            (_, None) => PageBody::Welcome,
        };

        PageView {
            theme: self.theme,
            phase,
            upload_label: self.upload.label(),
            analyze_enabled: self.can_analyze(),
            error: if phase == Phase::Loading { None } else { self.error.as_ref() },
            body,
        }
    }
}
