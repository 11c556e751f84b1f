use crate::{Metadata, ThemePolicy};
use serde::{Deserialize, Serialize};

pub const TITLE_NOT_AVAILABLE: &str = "Title not available";
pub const DESCRIPTION_NOT_AVAILABLE: &str = "Description not available";
pub const NO_PREVIEW_AVAILABLE: &str = "No preview available";
pub const IMAGE_NOT_AVAILABLE: &str = "image not available";

/// The five fields a fetch cycle resolves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewFields {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub canonical_link: String,
    pub theme_color: String,
}

impl PreviewFields {
    /// Maps a successful metadata response, filling gaps with the per-field
    /// fallbacks.
    pub fn from_metadata(metadata: &Metadata, input_url: &str, theme: &ThemePolicy) -> Self {
        Self {
            title: metadata.title().unwrap_or(TITLE_NOT_AVAILABLE).to_string(),
            description: metadata
                .description()
                .unwrap_or(DESCRIPTION_NOT_AVAILABLE)
                .to_string(),
            image_url: metadata.image().unwrap_or_default().to_string(),
            canonical_link: metadata.url().unwrap_or(input_url).to_string(),
            theme_color: metadata
                .theme_color()
                .unwrap_or_else(|| theme.default_for(input_url))
                .to_string(),
        }
    }

    /// The field set shown when the metadata could not be fetched at all.
    pub fn unavailable(input_url: &str, theme: &ThemePolicy) -> Self {
        Self {
            title: NO_PREVIEW_AVAILABLE.to_string(),
            description: String::new(),
            image_url: IMAGE_NOT_AVAILABLE.to_string(),
            canonical_link: String::new(),
            theme_color: theme.default_for(input_url).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{DEFAULT_THEME, INSTITUTIONAL_THEME};
    use serde_json::json;

    fn metadata(value: serde_json::Value) -> Metadata {
        match value {
            serde_json::Value::Object(map) => Metadata::from(map),
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_full_metadata_maps_verbatim() {
        let data = metadata(json!({
            "title": "T",
            "desc": "D",
            "image": "I",
            "url": "U",
            "theme-color": "C"
        }));
        let fields = PreviewFields::from_metadata(
            &data,
            "https://example.com",
            &ThemePolicy::default(),
        );
        assert_eq!(
            fields,
            PreviewFields {
                title: "T".into(),
                description: "D".into(),
                image_url: "I".into(),
                canonical_link: "U".into(),
                theme_color: "C".into(),
            }
        );
    }

    #[test]
    fn test_empty_metadata_uses_fallbacks() {
        let fields = PreviewFields::from_metadata(
            &Metadata::default(),
            "https://example.com/page",
            &ThemePolicy::default(),
        );
        assert_eq!(fields.title, TITLE_NOT_AVAILABLE);
        assert_eq!(fields.description, DESCRIPTION_NOT_AVAILABLE);
        assert_eq!(fields.image_url, "");
        assert_eq!(fields.canonical_link, "https://example.com/page");
        assert_eq!(fields.theme_color, DEFAULT_THEME);
    }

    #[test]
    fn test_theme_is_derived_from_input_not_canonical_link() {
        let data = metadata(json!({ "url": "https://www.psu.edu/" }));
        let fields =
            PreviewFields::from_metadata(&data, "https://short.link/x", &ThemePolicy::default());
        assert_eq!(fields.canonical_link, "https://www.psu.edu/");
        assert_eq!(fields.theme_color, DEFAULT_THEME);

        let fields = PreviewFields::from_metadata(
            &Metadata::default(),
            "https://hax.psu.edu",
            &ThemePolicy::default(),
        );
        assert_eq!(fields.theme_color, INSTITUTIONAL_THEME);
    }

    #[test]
    fn test_unavailable_field_set() {
        let fields = PreviewFields::unavailable("https://psu.edu", &ThemePolicy::default());
        assert_eq!(fields.title, NO_PREVIEW_AVAILABLE);
        assert_eq!(fields.description, "");
        assert_eq!(fields.image_url, IMAGE_NOT_AVAILABLE);
        assert_eq!(fields.canonical_link, "");
        assert_eq!(fields.theme_color, INSTITUTIONAL_THEME);
    }
}
