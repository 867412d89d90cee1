//! Error types for the advisor.

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl AdvisorError {
    pub fn code(&self) -> i32 {
        match self {
            AdvisorError::UnsupportedFormat(_) => -32010,
            AdvisorError::Provider(e) => e.code(),
            AdvisorError::Io(_) => -32006,
            AdvisorError::Json(_) => -32700,
            AdvisorError::Yaml(_) => -32701,
        }
    }
}

/// Failure of an external data source (expert directory, market signal).
///
/// The engine never propagates these: the affected recommendation is omitted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("data source unavailable: {0}")]
    Unavailable(String),

    #[error("data source timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl ProviderError {
    pub fn code(&self) -> i32 {
        match self {
            ProviderError::Unavailable(_) => -32030,
            ProviderError::Timeout(_) => -32031,
            ProviderError::InvalidData(_) => -32032,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_code_passes_through() {
        let err: AdvisorError = ProviderError::Timeout(Duration::from_millis(5)).into();
        assert_eq!(err.code(), -32031);
        assert!(err.to_string().contains("timed out"));
    }
}
