//! Catalog loading.
//!
//! The catalog is read once at startup, either from a local file or over
//! HTTP. The app starts immediately with an empty, "loading" shop; a
//! background task fetches and parses the catalog and installs it when
//! ready. A failed load leaves the shop empty for the rest of the run.

use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use moodshop_core::catalog::{self, CatalogError, ParsedCatalog};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::instrument;
use url::Url;

/// Timeout for fetching a remote catalog.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Where catalog text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Remote(Url),
}

impl FromStr for CatalogSource {
    type Err = Infallible;

    /// `http://` and `https://` values that parse as URLs are remote;
    /// anything else is a file path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let is_http = s.starts_with("http://") || s.starts_with("https://");
        Ok(match Url::parse(s) {
            Ok(url) if is_http => Self::Remote(url),
            _ => Self::File(PathBuf::from(s)),
        })
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => write!(f, "{url}"),
        }
    }
}

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The catalog file could not be read.
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog URL could not be fetched.
    #[error("could not fetch catalog: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The catalog URL answered with a non-success status.
    #[error("catalog request to {url} returned {status}")]
    Status { url: Url, status: StatusCode },

    /// The text is not a usable catalog.
    #[error("invalid catalog: {0}")]
    Parse(#[from] CatalogError),
}

/// Retrieve the raw catalog text.
///
/// # Errors
///
/// Returns a `LoadError` if the file cannot be read or the URL cannot be
/// fetched successfully.
pub async fn fetch_text(source: &CatalogSource) -> Result<String, LoadError> {
    match source {
        CatalogSource::File(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|source| LoadError::Read {
                    path: path.clone(),
                    source,
                })?;
            // Invalid UTF-8 becomes U+FFFD, the same as a remote body.
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        CatalogSource::Remote(url) => {
            let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
            let response = client.get(url.clone()).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::Status {
                    url: url.clone(),
                    status,
                });
            }

            Ok(response.text().await?)
        }
    }
}

/// Fetch and parse the catalog.
///
/// Skipped rows are logged at debug level and do not fail the load.
///
/// # Errors
///
/// Returns a `LoadError` if the resource is unreachable or has no usable
/// header row.
#[instrument(skip_all, fields(source = %source))]
pub async fn load(source: &CatalogSource) -> Result<ParsedCatalog, LoadError> {
    let text = fetch_text(source).await?;
    let parsed = catalog::parse(&text)?;

    for row in &parsed.skipped {
        tracing::debug!(line = row.line, reason = %row.reason, "Skipped catalog row");
    }
    tracing::info!(
        products = parsed.catalog.len(),
        skipped = parsed.skipped.len(),
        "Catalog parsed"
    );

    Ok(parsed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_source_from_str() {
        assert_eq!(
            "Products.CSV".parse::<CatalogSource>().unwrap(),
            CatalogSource::File(PathBuf::from("Products.CSV"))
        );
        assert!(matches!(
            "https://cdn.example.com/p.csv".parse::<CatalogSource>().unwrap(),
            CatalogSource::Remote(_)
        ));
        // Not an http URL, so it is a path.
        assert!(matches!(
            "C:/data/products.csv".parse::<CatalogSource>().unwrap(),
            CatalogSource::File(_)
        ));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("moodshop-{}.csv", uuid::Uuid::new_v4()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "id,name,category,description,price,stock").unwrap();
        writeln!(file, "p1,Mug,Kitchen,Stoneware,9.99,2").unwrap();
        writeln!(file, "p2,short").unwrap();
        drop(file);

        let parsed = load(&CatalogSource::File(path.clone())).await.unwrap();
        assert_eq!(parsed.catalog.len(), 1);
        assert_eq!(parsed.skipped.len(), 1);

        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let source = CatalogSource::File(PathBuf::from("/definitely/not/here.csv"));
        let err = load(&source).await.unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }

    #[tokio::test]
    async fn test_empty_file_is_parse_error() {
        let path = std::env::temp_dir().join(format!("moodshop-{}.csv", uuid::Uuid::new_v4()));
        std::fs::write(&path, "\n\n").unwrap();

        let err = load(&CatalogSource::File(path.clone())).await.unwrap_err();
        assert!(matches!(err, LoadError::Parse(CatalogError::MissingHeader)));

        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn test_spreadsheet_export_with_bom_and_bad_bytes() {
        let path = std::env::temp_dir().join(format!("moodshop-{}.csv", uuid::Uuid::new_v4()));
        let mut bytes = b"\xEF\xBB\xBFid,name,category,description,price,stock\r\n".to_vec();
        bytes.extend_from_slice(b"p1,Caf\xE9 Mug,Kitchen,Stoneware,9.99,2\r\n");
        std::fs::write(&path, bytes).unwrap();

        let parsed = load(&CatalogSource::File(path.clone())).await.unwrap();
        assert_eq!(parsed.catalog.len(), 1);
        assert_eq!(parsed.catalog.products()[0].name, "Caf\u{fffd} Mug");

        std::fs::remove_file(path).unwrap();
    }
}
