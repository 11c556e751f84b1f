use async_trait::async_trait;

mod controller;
mod error;
mod fetcher;
pub mod fields;
mod labels;
#[cfg(feature = "logging")]
mod logging;
mod metadata;
mod render;
pub mod theme;
#[cfg(feature = "logging")]
mod utils;

pub use controller::{PreviewCard, PreviewCardConfig};
pub use error::PreviewError;
pub use fetcher::{FetcherConfig, MetadataFetcher, DEFAULT_ENDPOINT};
pub use fields::PreviewFields;
pub use labels::CardLabels;
#[cfg(feature = "logging")]
pub use logging::{
    log_error_card, log_preview_card, setup_logging, LogConfig, LogLevelGuard,
};
pub use metadata::{Metadata, MetadataEnvelope};
pub use render::render_card;
pub use theme::ThemePolicy;

/// Everything a preview card displays, plus the URL it was asked about.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PreviewState {
    pub input_url: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub canonical_link: String,
    pub theme_color: String,
    pub is_loading: bool,
}

impl PreviewState {
    /// Overwrites all five resolved fields; nothing from the previous cycle
    /// survives.
    pub fn apply(&mut self, fields: PreviewFields) {
        self.title = fields.title;
        self.description = fields.description;
        self.image_url = fields.image_url;
        self.canonical_link = fields.canonical_link;
        self.theme_color = fields.theme_color;
    }

    pub fn fields(&self) -> PreviewFields {
        PreviewFields {
            title: self.title.clone(),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
            canonical_link: self.canonical_link.clone(),
            theme_color: self.theme_color.clone(),
        }
    }
}

/// Where a preview card gets its metadata from.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn fetch_metadata(&self, link: &str) -> Result<Metadata, PreviewError>;
}
