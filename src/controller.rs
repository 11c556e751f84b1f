#[cfg(feature = "logging")]
use crate::log_error_card;
use crate::render::render_card;
use crate::{
    CardLabels, MetadataFetcher, MetadataSource, PreviewError, PreviewFields, PreviewState,
    ThemePolicy,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

/// A preview card bound to one input URL at a time.
///
/// Setting `href` starts a fetch cycle on the tokio runtime. Every state
/// change is published on a [`watch`] channel, so a view can re-render by
/// awaiting [`watch::Receiver::changed`] on [`PreviewCard::subscribe`].
///
/// Cycles are never cancelled. When several overlap, only the most recently
/// started one may write its result; older completions are dropped.
#[derive(Clone)]
pub struct PreviewCard {
    inner: Arc<Inner>,
}

struct Inner {
    source: Arc<dyn MetadataSource>,
    theme: ThemePolicy,
    labels: CardLabels,
    state: watch::Sender<PreviewState>,
    generation: AtomicU64,
}

impl Default for PreviewCard {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewCard {
    pub fn new() -> Self {
        Self::new_with_config(PreviewCardConfig::new())
    }

    pub fn with_source(source: Arc<dyn MetadataSource>) -> Self {
        Self::new_with_config(PreviewCardConfig::new().with_source(source))
    }

    pub fn new_with_config(config: PreviewCardConfig) -> Self {
        let (state, _) = watch::channel(PreviewState::default());
        let source = config
            .source
            .unwrap_or_else(|| Arc::new(MetadataFetcher::new()));

        debug!("Preview card initialized");

        Self {
            inner: Arc::new(Inner {
                source,
                theme: config.theme,
                labels: config.labels,
                state,
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> PreviewState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PreviewState> {
        self.inner.state.subscribe()
    }

    pub fn labels(&self) -> &CardLabels {
        &self.inner.labels
    }

    pub fn render(&self) -> String {
        render_card(&self.inner.state.borrow(), &self.inner.labels)
    }

    /// Sets the URL to preview.
    ///
    /// Returns the handle of the spawned fetch cycle when the value changed to
    /// something non-empty, `None` otherwise. Must be called from within a
    /// tokio runtime.
    pub fn set_href(&self, href: impl Into<String>) -> Option<JoinHandle<()>> {
        let href = href.into();
        let mut generation = None;
        // input_url and the generation move together, under the channel lock
        self.inner.state.send_if_modified(|state| {
            if state.input_url == href {
                return false;
            }
            state.input_url = href.clone();
            if !href.is_empty() {
                generation = Some(self.next_generation());
                state.is_loading = true;
            }
            true
        });

        let generation = generation?;
        let card = self.clone();
        Some(tokio::spawn(async move {
            card.run_cycle(generation, href).await;
        }))
    }

    /// Runs a fetch cycle for the current `href` and waits for it.
    pub async fn refresh(&self) {
        let mut cycle = None;
        self.inner.state.send_if_modified(|state| {
            if state.input_url.is_empty() {
                return false;
            }
            cycle = Some((self.next_generation(), state.input_url.clone()));
            state.is_loading = true;
            true
        });

        if let Some((generation, href)) = cycle {
            self.run_cycle(generation, href).await;
        }
    }

    /// Element attribute surface: `title`, `href`, `desc`, `img`, `link`,
    /// `theme` and `isLoading`.
    ///
    /// Only `href` starts a fetch; the others overwrite their field directly.
    pub fn set_attribute(
        &self,
        name: &str,
        value: &str,
    ) -> Result<Option<JoinHandle<()>>, PreviewError> {
        let name = name.to_ascii_lowercase();
        if name == "href" {
            return Ok(self.set_href(value));
        }

        let value = value.to_string();
        match name.as_str() {
            "title" => self.inner.state.send_modify(|s| s.title = value),
            "desc" => self.inner.state.send_modify(|s| s.description = value),
            "img" => self.inner.state.send_modify(|s| s.image_url = value),
            "link" => self.inner.state.send_modify(|s| s.canonical_link = value),
            "theme" => self.inner.state.send_modify(|s| s.theme_color = value),
            "isloading" => {
                let loading = !value.eq_ignore_ascii_case("false");
                self.inner.state.send_modify(|s| s.is_loading = loading)
            }
            _ => {
                let err = PreviewError::UnknownAttribute(name.clone());
                err.log();
                return Err(err);
            }
        }
        Ok(None)
    }

    /// Called when the rendered image fails to load: hides the image and
    /// keeps the rest of the card.
    pub fn handle_image_error(&self) {
        self.inner.state.send_modify(|s| {
            debug!(image_url = %s.image_url, "Preview image failed to load");
            s.image_url.clear();
        });
    }

    fn next_generation(&self) -> u64 {
        self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    #[instrument(level = "debug", skip(self))]
    async fn run_cycle(&self, generation: u64, href: String) {
        let fields = match self.inner.source.fetch_metadata(&href).await {
            Ok(metadata) => PreviewFields::from_metadata(&metadata, &href, &self.inner.theme),
            Err(e) => {
                e.log();
                #[cfg(feature = "logging")]
                log_error_card(&href, &e);
                PreviewFields::unavailable(&href, &self.inner.theme)
            }
        };

        let applied = self.inner.state.send_if_modified(|s| {
            if self.inner.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            s.apply(fields);
            s.is_loading = false;
            true
        });

        if applied {
            debug!(href = %href, "Preview cycle finished");
        } else {
            debug!(href = %href, "Discarding result of superseded preview cycle");
        }
    }
}

pub struct PreviewCardConfig {
    pub source: Option<Arc<dyn MetadataSource>>,
    pub theme: ThemePolicy,
    pub labels: CardLabels,
}

impl Default for PreviewCardConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewCardConfig {
    pub fn new() -> Self {
        Self {
            source: None,
            theme: ThemePolicy::default(),
            labels: CardLabels::default(),
        }
    }

    pub fn with_source(mut self, source: Arc<dyn MetadataSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_fetcher(self, fetcher: MetadataFetcher) -> Self {
        self.with_source(Arc::new(fetcher))
    }

    pub fn with_theme_policy(mut self, theme: ThemePolicy) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_labels(mut self, labels: CardLabels) -> Self {
        self.labels = labels;
        self
    }
}
