//! Shared, read-only state handed to every request.

use std::sync::Arc;

use clubfeed_core::{CatalogueStore, ViewerStore};
use clubfeed_ranker::RankingPipeline;

/// Stores and ranking configuration shared across handlers.
///
/// Cloning is cheap; nothing here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    catalogue: Arc<dyn CatalogueStore>,
    viewers: Arc<dyn ViewerStore>,
    pipeline: RankingPipeline,
    default_limit: usize,
}

impl AppState {
    /// Build state from separate catalogue and viewer stores.
    pub fn new(
        catalogue: Arc<dyn CatalogueStore>,
        viewers: Arc<dyn ViewerStore>,
        default_limit: usize,
    ) -> Self {
        Self {
            catalogue,
            viewers,
            pipeline: RankingPipeline::default(),
            default_limit,
        }
    }

    /// Build state from one store serving both roles.
    pub fn from_store<S>(store: S, default_limit: usize) -> Self
    where
        S: CatalogueStore + ViewerStore + 'static,
    {
        let store = Arc::new(store);
        Self::new(store.clone(), store, default_limit)
    }

    pub(crate) fn catalogue(&self) -> Arc<dyn CatalogueStore> {
        Arc::clone(&self.catalogue)
    }

    pub(crate) fn viewers(&self) -> Arc<dyn ViewerStore> {
        Arc::clone(&self.viewers)
    }

    pub(crate) const fn pipeline(&self) -> &RankingPipeline {
        &self.pipeline
    }

    /// Limit applied when a request does not name one; `0` is unlimited.
    #[must_use]
    pub const fn default_limit(&self) -> usize {
        self.default_limit
    }
}
