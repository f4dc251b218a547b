//! Application state shared across handlers.

use std::sync::Arc;

use chrono::FixedOffset;

use crate::config::AdminConfig;
use crate::store::GiftCardStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    store: Arc<dyn GiftCardStore>,
}

impl AppState {
    /// Build state around a configuration and a gift card store.
    #[must_use]
    pub fn new(config: AdminConfig, store: Arc<dyn GiftCardStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// The gift card store.
    #[must_use]
    pub fn store(&self) -> &dyn GiftCardStore {
        self.inner.store.as_ref()
    }

    /// Offset that expiry dates in forms are interpreted in.
    #[must_use]
    pub fn expiry_offset(&self) -> FixedOffset {
        self.inner.config.expiry_offset
    }
}
