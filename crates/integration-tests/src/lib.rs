//! Integration tests for Moodshop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p moodshop-integration-tests
//! ```
//!
//! The storefront router is driven in-process with `tower::ServiceExt`, so
//! no server or network is needed. Catalogs are written to temporary files.
//!
//! # Test Categories
//!
//! - `storefront_catalog` - Catalog loading, listing and filtering
//! - `storefront_cart` - Cart actions and notices
//! - `storefront_checkout` - Checkout validation and confirmation
//! - `storefront_middleware` - Health checks and response headers

use std::path::{Path, PathBuf};
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, StatusCode, header};
use moodshop_storefront::catalog::CatalogSource;
use moodshop_storefront::config::StorefrontConfig;
use moodshop_storefront::state::AppState;
use tower::ServiceExt;

/// The catalog most tests run against.
pub const SAMPLE_CATALOG: &str = "\
id,name,category,description,price,stock
p1,Mug,Kitchen,Stoneware mug,9.99,2
p2,Lavender Candle,Home,Soy wax,14.50,5
p3,Teapot,Kitchen,Cast iron,32.00,0
p4,Lavender Soap,Bath,Handmade,6.25,10
p5,Throw,Home,Wool blend,45.00,1
";

/// A catalog file that is removed when dropped.
pub struct TempCatalog {
    path: PathBuf,
}

impl TempCatalog {
    /// Write `contents` to a fresh file in the system temp directory.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be written.
    pub fn write(contents: &str) -> std::io::Result<Self> {
        let path = std::env::temp_dir().join(format!("moodshop-it-{}.csv", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents)?;
        Ok(Self { path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempCatalog {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Storefront config for `source` with a notice TTL long enough to outlive
/// any test.
#[must_use]
pub fn test_config(source: CatalogSource) -> StorefrontConfig {
    let mut config = StorefrontConfig::new(source);
    config.notice_ttl = Duration::from_secs(60);
    config
}

/// A storefront whose catalog load has already finished.
pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    _catalog: Option<TempCatalog>,
}

impl TestApp {
    /// Load `csv` as the catalog and build the router.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the catalog file cannot be written.
    pub async fn with_catalog(csv: &str) -> std::io::Result<Self> {
        let catalog = TempCatalog::write(csv)?;
        let state = AppState::new(test_config(CatalogSource::File(
            catalog.path().to_path_buf(),
        )));
        state.load_catalog().await;
        Ok(Self::build(state, Some(catalog)))
    }

    /// Load from `source`, which is expected to fail or succeed on its own.
    pub async fn with_source(source: CatalogSource) -> Self {
        let state = AppState::new(test_config(source));
        state.load_catalog().await;
        Self::build(state, None)
    }

    /// Build the router without loading any catalog.
    #[must_use]
    pub fn unloaded(source: CatalogSource) -> Self {
        Self::build(AppState::new(test_config(source)), None)
    }

    fn build(state: AppState, catalog: Option<TempCatalog>) -> Self {
        let router = moodshop_storefront::app(state.clone());
        Self {
            state,
            router,
            _catalog: catalog,
        }
    }

    /// Send a GET request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or served.
    pub async fn get(&self, uri: &str) -> Result<Response<Body>, Box<dyn std::error::Error>> {
        let request = Request::builder().uri(uri).body(Body::empty())?;
        Ok(self.router.clone().oneshot(request).await?)
    }

    /// Send a url-encoded form POST.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or served.
    pub async fn post_form(
        &self,
        uri: &str,
        form: &str,
    ) -> Result<Response<Body>, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))?;
        Ok(self.router.clone().oneshot(request).await?)
    }

    /// GET `uri` and return its status and body text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not UTF-8.
    pub async fn page(&self, uri: &str) -> Result<(StatusCode, String), Box<dyn std::error::Error>> {
        let response = self.get(uri).await?;
        let status = response.status();
        Ok((status, body_text(response).await?))
    }
}

/// Collect a response body as text.
///
/// # Errors
///
/// Returns an error if the body cannot be read or is not UTF-8.
pub async fn body_text(response: Response<Body>) -> Result<String, Box<dyn std::error::Error>> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

/// The `Location` header of a redirect, if any.
#[must_use]
pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}
