//! Error handling for folio-i18n
//!
//! This module defines the main error types used throughout the crate
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for folio-i18n
#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Dictionary load error: {0}")]
    Load(#[from] LoadError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown language: {code}")]
    UnknownLanguage { code: String },

    #[error("Missing translations for {language}: {misses:?}")]
    MissingTranslations { language: String, misses: Vec<String> },

    #[error("Preference store error: {0}")]
    Preference(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Dictionary fetch and parse errors
///
/// Any of these aborts the load entirely; no partial dictionary is kept.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch dictionary: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("dictionary request to {url} returned {status}")]
    Status { url: String, status: u16 },

    #[error("failed to parse dictionary: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid dictionary source: {0}")]
    InvalidSource(String),
}

/// Result type alias for folio-i18n operations
pub type Result<T> = std::result::Result<T, FolioError>;

/// Result type alias for dictionary loading
pub type LoadResult<T> = std::result::Result<T, LoadError>;

impl FolioError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            FolioError::Load(LoadError::Fetch(_)) => true,
            FolioError::Load(LoadError::Status { status, .. }) => *status >= 500,
            FolioError::Load(_) => false,
            FolioError::Config(_) => false,
            FolioError::UnknownLanguage { .. } => true,
            FolioError::MissingTranslations { .. } => true,
            FolioError::Preference(_) => true,
            FolioError::Serialization(_) => false,
            FolioError::Io(_) => true,
            FolioError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FolioError::Load(_) => ErrorSeverity::Critical,
            FolioError::Config(_) => ErrorSeverity::Critical,
            FolioError::UnknownLanguage { .. } => ErrorSeverity::Warning,
            FolioError::MissingTranslations { .. } => ErrorSeverity::Warning,
            FolioError::Preference(_) => ErrorSeverity::Warning,
            FolioError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_errors_are_critical() {
        let err: FolioError = LoadError::InvalidSource("ftp://nope".to_string()).into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_server_status_is_recoverable() {
        let err: FolioError = LoadError::Status { url: "http://x".to_string(), status: 503 }.into();
        assert!(err.is_recoverable());

        let err: FolioError = LoadError::Status { url: "http://x".to_string(), status: 404 }.into();
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_unknown_language_message() {
        let err = FolioError::UnknownLanguage { code: "xx".to_string() };
        assert_eq!(err.to_string(), "Unknown language: xx");
        assert_eq!(err.severity().to_string(), "WARN");
    }
}
