use crate::PreviewError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response body of the website metadata service.
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataEnvelope {
    pub data: Metadata,
}

/// The `data` object of a metadata response.
///
/// The service returns an open-ended set of keys (`title`, `desc`, `image`,
/// `logo`, `og:image`, `url`, `theme-color`, ...), so the raw map is kept and
/// read through [`Metadata::text`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    fields: Map<String, Value>,
}

impl Metadata {
    pub fn from_json(body: &str) -> Result<Self, PreviewError> {
        let envelope: MetadataEnvelope = serde_json::from_str(body)?;
        Ok(envelope.data)
    }

    /// Returns the value under `key` when it is a non-empty string.
    ///
    /// Missing keys, `null`, empty strings and non-string values all read as
    /// absent, so callers can chain fallbacks with `or_else`.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn title(&self) -> Option<&str> {
        self.text("title")
    }

    pub fn description(&self) -> Option<&str> {
        self.text("desc")
    }

    /// `image`, then `logo`, then `og:image`.
    pub fn image(&self) -> Option<&str> {
        self.text("image")
            .or_else(|| self.text("logo"))
            .or_else(|| self.text("og:image"))
    }

    pub fn url(&self) -> Option<&str> {
        self.text("url")
    }

    pub fn theme_color(&self) -> Option<&str> {
        self.text("theme-color")
    }
}

impl From<Map<String, Value>> for Metadata {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_envelope() {
        let metadata = Metadata::from_json(
            r##"{"data": {"title": "Rust", "desc": "A language", "theme-color": "#000"}}"##,
        )
        .unwrap();
        assert_eq!(metadata.title(), Some("Rust"));
        assert_eq!(metadata.description(), Some("A language"));
        assert_eq!(metadata.theme_color(), Some("#000"));
        assert_eq!(metadata.url(), None);
    }

    #[test]
    fn test_missing_or_null_data_is_an_error() {
        assert!(matches!(
            Metadata::from_json(r#"{"status": 200}"#),
            Err(PreviewError::ParseError(_))
        ));
        assert!(matches!(
            Metadata::from_json(r#"{"data": null}"#),
            Err(PreviewError::ParseError(_))
        ));
        assert!(matches!(
            Metadata::from_json("<html>not json</html>"),
            Err(PreviewError::ParseError(_))
        ));
    }

    #[test]
    fn test_image_fallback_chain() {
        let metadata = Metadata::from_json(
            r#"{"data": {"image": "", "logo": null, "og:image": "https://example.com/og.png"}}"#,
        )
        .unwrap();
        assert_eq!(metadata.image(), Some("https://example.com/og.png"));

        let metadata =
            Metadata::from_json(r#"{"data": {"logo": "logo.png", "og:image": "og.png"}}"#)
                .unwrap();
        assert_eq!(metadata.image(), Some("logo.png"));
    }

    #[test]
    fn test_non_string_values_read_as_absent() {
        let metadata =
            Metadata::from_json(r#"{"data": {"title": 42, "desc": ["a"], "url": {}}}"#).unwrap();
        assert_eq!(metadata.title(), None);
        assert_eq!(metadata.description(), None);
        assert_eq!(metadata.url(), None);
    }
}
