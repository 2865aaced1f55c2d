// dashkit/src/upload.rs
//
// Upload control: single CSV selection and the Analyze action
//

use std::fmt;
use std::path::Path;

use tracing::{info, warn};

use crate::client::AnalysisService;
use crate::errors::{DashError, Result};
use crate::loading::{LoadingFlag, LoadingGuard};
use crate::types::DashboardReport;

pub const CSV_MIME: &str = "text/csv";
pub const CHOOSE_FILE_LABEL: &str = "Choose CSV File";

#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| DashError::FileReadError(format!("{}: {}", path.display(), e)))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Holds at most one selection; a new selection replaces the previous one.
#[derive(Debug, Clone, Default)]
pub struct UploadControl {
    selected: Option<SelectedFile>,
}

impl UploadControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, file: SelectedFile) {
        self.selected = Some(file);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn label(&self) -> &str {
        self.selected
            .as_ref()
            .map(SelectedFile::name)
            .unwrap_or(CHOOSE_FILE_LABEL)
    }

    pub fn can_analyze(&self, loading: &LoadingFlag) -> bool {
        self.selected.is_some() && !loading.is_loading()
    }

    /// Claims the loading window for the current selection.
    pub fn start(&self, loading: &LoadingFlag) -> Result<UploadTicket> {
        let file = self.selected.clone().ok_or(DashError::NoFileSelected)?;
        let guard = loading.try_acquire().ok_or(DashError::AnalysisInFlight)?;

        info!(file = %file.name(), bytes = file.len(), "Analysis started");
        Ok(UploadTicket { file, guard })
    }
}

/// An accepted Analyze request; owns the loading guard until its outcome is applied.
#[derive(Debug)]
pub struct UploadTicket {
    file: SelectedFile,
    guard: LoadingGuard,
}

impl UploadTicket {
    pub fn file(&self) -> &SelectedFile {
        &self.file
    }

    pub async fn submit<S>(self, service: &S) -> AnalysisOutcome
    where
        S: AnalysisService + ?Sized,
    {
        let result = service.analyze(&self.file).await;

        match &result {
            Ok(report) => info!(
                file = %self.file.name(),
                charts = report.charts.len(),
                anomalies = report.anomalies.len(),
                "Analysis finished"
            ),
            Err(e) => warn!(file = %self.file.name(), error = %e, "Analysis failed"),
        }

        AnalysisOutcome {
            file_name: self.file.name,
            result,
            guard: self.guard,
        }
    }
}

/// Result of one analysis; the loading window closes when this is consumed.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub(crate) file_name: String,
    pub(crate) result: Result<DashboardReport>,
    pub(crate) guard: LoadingGuard,
}

impl AnalysisOutcome {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn result(&self) -> &Result<DashboardReport> {
        &self.result
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Canned(Result<DashboardReport>);

    #[async_trait]
    impl AnalysisService for Canned {
        async fn analyze(&self, _file: &SelectedFile) -> Result<DashboardReport> {
            self.0.clone()
        }
    }

    fn csv() -> SelectedFile {
        SelectedFile::new("people.csv", b"name,age\nada,36\n".to_vec())
    }

    #[test]
    fn label_tracks_selection() {
        let mut control = UploadControl::new();
        assert_eq!(control.label(), CHOOSE_FILE_LABEL);

        control.select(csv());
        assert_eq!(control.label(), "people.csv");

        control.select(SelectedFile::new("sales.csv", Vec::new()));
        assert_eq!(control.label(), "sales.csv");

        control.clear();
        assert!(control.selected().is_none());
    }

    #[test]
    fn start_without_file_is_refused_and_stays_idle() {
        let control = UploadControl::new();
        let flag = LoadingFlag::new();
        assert_eq!(control.start(&flag).unwrap_err(), DashError::NoFileSelected);
        assert!(!flag.is_loading());
    }

    #[test]
    fn start_while_in_flight_is_refused() {
        let mut control = UploadControl::new();
        control.select(csv());
        let flag = LoadingFlag::new();

        let ticket = control.start(&flag).unwrap();
        assert!(!control.can_analyze(&flag));
        assert_eq!(control.start(&flag).unwrap_err(), DashError::AnalysisInFlight);

        drop(ticket);
        assert!(control.can_analyze(&flag));
    }

    #[tokio::test]
    async fn outcome_holds_loading_until_dropped() {
        let mut control = UploadControl::new();
        control.select(csv());
        let flag = LoadingFlag::new();

        let outcome = control
            .start(&flag)
            .unwrap()
            .submit(&Canned(Err(DashError::TransportError("refused".into()))))
            .await;

        assert!(flag.is_loading());
        assert!(!outcome.is_success());
        assert_eq!(outcome.file_name(), "people.csv");

        drop(outcome);
        assert!(!flag.is_loading());
    }

    #[test]
    fn from_path_reads_bytes_and_name() {
        let path = std::env::temp_dir().join(format!("dashkit-upload-{}.csv", std::process::id()));
        std::fs::write(&path, "a,b\n1,2\n").unwrap();

        let file = SelectedFile::from_path(&path).unwrap();
        assert_eq!(file.bytes(), b"a,b\n1,2\n");
        assert!(file.name().ends_with(".csv"));

        std::fs::remove_file(&path).ok();
        assert!(matches!(
            SelectedFile::from_path(&path),
            Err(DashError::FileReadError(_))
        ));
    }

    #[test]
    fn debug_omits_file_contents() {
        let rendered = format!("{:?}", csv());
        assert!(rendered.contains("people.csv"));
        assert!(!rendered.contains("ada"));
    }
}
