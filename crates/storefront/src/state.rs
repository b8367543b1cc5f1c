//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use moodshop_core::Shop;
use tokio::task::JoinHandle;

use crate::catalog;
use crate::config::StorefrontConfig;
use crate::error::AppError;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It owns the one [`Shop`] the
/// storefront serves; every request takes the shop lock for a short,
/// synchronous critical section, so actions apply one at a time.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    shop: Mutex<Shop>,
}

impl AppState {
    /// Create application state with an empty shop awaiting its catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let shop = Shop::new(config.notice_ttl);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                shop: Mutex::new(shop),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Lock the shop.
    ///
    /// Never hold the guard across an `.await`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if a previous holder panicked.
    pub fn shop(&self) -> Result<MutexGuard<'_, Shop>, AppError> {
        Ok(self.inner.shop.lock()?)
    }

    /// Load the configured catalog and install it, or record the failure.
    pub async fn load_catalog(&self) {
        let source = &self.config().catalog;
        let result = catalog::load(source).await;

        let Ok(mut shop) = self.shop() else {
            tracing::error!("Shop lock poisoned; catalog not installed");
            return;
        };

        match result {
            Ok(parsed) => {
                tracing::info!(%source, products = parsed.catalog.len(), "Catalog loaded");
                shop.install_catalog(parsed.catalog);
            }
            Err(e) => {
                tracing::error!(%source, error = %e, "Failed to load catalog");
                shop.fail_catalog(e.to_string());
            }
        }
    }

    /// Start loading the catalog in the background.
    ///
    /// The storefront serves an empty, loading listing until it completes.
    pub fn start_catalog_loading(&self) -> JoinHandle<()> {
        let state = self.clone();
        tokio::spawn(async move { state.load_catalog().await })
    }
}
