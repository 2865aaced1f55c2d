use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashError {
    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Server error: HTTP {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("No file selected")]
    NoFileSelected,

    #[error("An analysis is already in progress")]
    AnalysisInFlight,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("File read error: {0}")]
    FileReadError(String),
}

impl DashError {
    /// User-side preconditions that the UI treats as a no-op rather than a failed analysis.
    pub fn is_precondition(&self) -> bool {
        matches!(self, DashError::NoFileSelected | DashError::AnalysisInFlight)
    }
}

impl From<reqwest::Error> for DashError {
    fn from(err: reqwest::Error) -> Self {
        DashError::TransportError(err.to_string())
    }
}

impl From<config::ConfigError> for DashError {
    fn from(err: config::ConfigError) -> Self {
        DashError::ConfigError(err.to_string())
    }
}

impl From<std::io::Error> for DashError {
    fn from(err: std::io::Error) -> Self {
        DashError::FileReadError(err.to_string())
    }
}
