use crate::PreviewError;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// User-facing strings of the card.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CardLabels {
    pub summary: String,
    pub link: String,
}

impl Default for CardLabels {
    fn default() -> Self {
        Self {
            summary: "Description".to_string(),
            link: "Link to Site".to_string(),
        }
    }
}

impl CardLabels {
    /// Loads labels from a JSON locale file such as
    /// `{"summary": "الوصف", "link": "رابط الموقع"}`.
    ///
    /// Keys missing from the file keep their English default.
    pub fn from_locale_file(path: impl AsRef<Path>) -> Result<Self, PreviewError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| PreviewError::LocaleError(format!("{}: {e}", path.display())))?;
        let labels = Self::from_json(&content)?;
        debug!(path = %path.display(), "Loaded card labels");
        Ok(labels)
    }

    pub fn from_json(content: &str) -> Result<Self, PreviewError> {
        serde_json::from_str(content).map_err(|e| PreviewError::LocaleError(e.to_string()))
    }
}
