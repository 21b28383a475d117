use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unsupported format: {name}")]
    UnsupportedFormat { name: String },

    #[error("Could not extract text from {name}: {reason}")]
    ExtractionFailed { name: String, reason: String },

    #[error("Linguistic resource unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification of an [`Error`], stable across releases and safe to
/// hand to API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnsupportedFormat,
    ExtractionFailed,
    ResourceUnavailable,
    InvalidConfig,
    Io,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnsupportedFormat => "unsupported_format",
            Self::ExtractionFailed => "extraction_failed",
            Self::ResourceUnavailable => "resource_unavailable",
            Self::InvalidConfig => "invalid_config",
            Self::Io => "io",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Self::ExtractionFailed { .. } => ErrorKind::ExtractionFailed,
            Self::ResourceUnavailable(_) => ErrorKind::ResourceUnavailable,
            Self::InvalidConfig(_) => ErrorKind::InvalidConfig,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// True when the failure is caused by an uploaded document rather than by
    /// the deployment.
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat { .. } | Self::ExtractionFailed { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_errors_are_client_errors() {
        let unsupported = Error::UnsupportedFormat {
            name: "notes.xyz".into(),
        };
        let failed = Error::ExtractionFailed {
            name: "broken.pdf".into(),
            reason: "bad xref".into(),
        };

        assert!(unsupported.is_client_error());
        assert!(failed.is_client_error());
        assert_eq!(unsupported.kind(), ErrorKind::UnsupportedFormat);
        assert_eq!(failed.kind(), ErrorKind::ExtractionFailed);
    }

    #[test]
    fn resource_errors_are_not_client_errors() {
        let err = Error::ResourceUnavailable("stopwords for german".into());

        assert!(!err.is_client_error());
        assert_eq!(err.kind(), ErrorKind::ResourceUnavailable);
    }

    #[test]
    fn error_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::ResourceUnavailable).unwrap();
        assert_eq!(json, "\"resource_unavailable\"");
        assert_eq!(ErrorKind::ExtractionFailed.to_string(), "extraction_failed");
    }
}
