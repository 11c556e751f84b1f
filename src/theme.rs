/// Accent token used when the previewed URL belongs to the institution.
pub const INSTITUTIONAL_THEME: &str = "var(--ddd-primary-1)";
/// Accent token used for every other URL.
pub const DEFAULT_THEME: &str = "var(--ddd-primary-8)";
/// Substring of the input URL that selects the institutional theme.
pub const INSTITUTION_MARKER: &str = "psu";

/// Picks the fallback accent color when the metadata service supplies none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemePolicy {
    pub marker: String,
    pub institutional: String,
    pub generic: String,
}

impl Default for ThemePolicy {
    fn default() -> Self {
        Self {
            marker: INSTITUTION_MARKER.to_string(),
            institutional: INSTITUTIONAL_THEME.to_string(),
            generic: DEFAULT_THEME.to_string(),
        }
    }
}

impl ThemePolicy {
    /// Derives the default theme from the URL the caller asked to preview.
    ///
    /// This always looks at the input URL, never at the canonical link the
    /// service resolved it to.
    pub fn default_for(&self, input_url: &str) -> &str {
        if !self.marker.is_empty() && input_url.contains(&self.marker) {
            &self.institutional
        } else {
            &self.generic
        }
    }
}
