//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::pdf::{MupdfExtractor, TextExtractor};
use crate::upload::UploadStore;

/// Shared application state
///
/// Built once at startup and cloned into every request; nothing in it is
/// mutated after construction.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    uploads: UploadStore,
    extractor: Arc<dyn TextExtractor>,
}

impl AppState {
    /// Create state backed by the MuPDF extractor
    pub fn new(config: Config) -> Self {
        Self::with_extractor(config, Arc::new(MupdfExtractor::new()))
    }

    /// Create state with a specific text extractor
    pub fn with_extractor(config: Config, extractor: Arc<dyn TextExtractor>) -> Self {
        let uploads = UploadStore::new(config.upload.dir.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                uploads,
                extractor,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the temporary upload store
    pub fn uploads(&self) -> &UploadStore {
        &self.inner.uploads
    }

    /// Get the text extractor
    pub fn extractor(&self) -> &dyn TextExtractor {
        self.inner.extractor.as_ref()
    }
}
