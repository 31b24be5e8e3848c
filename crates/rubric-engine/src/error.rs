use crate::config::ConfigError;
use crate::rubrics::{ExportError, ImportError, InvalidArgument, RubricServiceError};
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Import(ImportError),
    Rubric(RubricServiceError),
    InvalidArgument(InvalidArgument),
    Export(ExportError),
    Json(serde_json::Error),
    Csv(csv::Error),
}

impl AppError {
    /// Whether the failure was caused by caller input rather than the host.
    pub fn is_bad_request(&self) -> bool {
        match self {
            AppError::Import(ImportError::Io(_)) | AppError::Export(ExportError::Csv(_)) => false,
            AppError::Import(_)
            | AppError::Rubric(_)
            | AppError::InvalidArgument(_)
            | AppError::Export(_)
            | AppError::Json(_)
            | AppError::Csv(_) => true,
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) => false,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Import(err) => write!(f, "import error: {}", err),
            AppError::Rubric(err) => write!(f, "{}", err),
            AppError::InvalidArgument(err) => write!(f, "{}", err),
            AppError::Export(err) => write!(f, "export error: {}", err),
            AppError::Json(err) => write!(f, "invalid JSON document: {}", err),
            AppError::Csv(err) => write!(f, "invalid CSV data: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Rubric(err) => Some(err),
            AppError::InvalidArgument(err) => Some(err),
            AppError::Export(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::Csv(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ImportError> for AppError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

impl From<RubricServiceError> for AppError {
    fn from(value: RubricServiceError) -> Self {
        Self::Rubric(value)
    }
}

impl From<InvalidArgument> for AppError {
    fn from(value: InvalidArgument) -> Self {
        Self::InvalidArgument(value)
    }
}

impl From<ExportError> for AppError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<csv::Error> for AppError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}
