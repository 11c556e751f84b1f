use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Failed to parse URL: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Failed to fetch metadata: {0}")]
    FetchError(String),

    #[error("Metadata service returned status {status}")]
    HttpStatus { status: u16 },

    #[error("Failed to parse metadata response: {0}")]
    ParseError(String),

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Failed to load locale file: {0}")]
    LocaleError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl PreviewError {
    pub fn log(&self) {
        match self {
            PreviewError::UrlParseError(e) => {
                warn!(error = %e, "URL parsing failed");
            }
            PreviewError::FetchError(e) => {
                error!(error = %e, "Metadata fetch failed");
            }
            PreviewError::HttpStatus { status } => {
                error!(status = %status, "Metadata service returned an error status");
            }
            PreviewError::ParseError(e) => {
                error!(error = %e, "Metadata response could not be parsed");
            }
            PreviewError::UnknownAttribute(name) => {
                warn!(attribute = %name, "Ignoring unknown attribute");
            }
            PreviewError::LocaleError(e) => {
                warn!(error = %e, "Locale file could not be loaded");
            }
            PreviewError::ConfigError(e) => {
                warn!(error = %e, "Invalid configuration");
            }
        }
    }
}

impl From<serde_json::Error> for PreviewError {
    fn from(err: serde_json::Error) -> Self {
        PreviewError::ParseError(err.to_string())
    }
}
