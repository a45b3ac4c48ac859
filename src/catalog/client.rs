use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use super::Query;

/// Items requested per page. The remote API caps pages well above this.
pub const PAGE_SIZE: usize = 18;

/// Default catalog API root.
pub const DEFAULT_API_BASE: &str = "https://dummyjson.com/products";

/// Environment variable overriding the API root (used by tests and for
/// pointing the browser at compatible self-hosted catalogs).
pub const API_BASE_ENV: &str = "SHOPFRONT_API_BASE";

/// A single catalog product. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub thumbnail: String,
}

/// One page of results as returned by every listing-shaped endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: usize,
}

/// The only failure kind the catalog layer reports. Both variants carry a
/// message suitable for direct display.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The server answered with a non-success status.
    #[error("Catalog request failed with status {0}")]
    Status(reqwest::StatusCode),

    /// Transport-level failure: connection, timeout, abort, or a body that
    /// did not decode as a product page.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Stateless HTTP client for the product catalog. Holds no paging state;
/// every call is fully described by its arguments.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base: String,
}

impl CatalogClient {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Build the URL for one page. Mode selection is mutually exclusive:
    /// category beats search beats plain listing.
    pub fn page_url(&self, skip: usize, query: &Query) -> String {
        let params = format!("limit={PAGE_SIZE}&skip={skip}");

        if query.has_category() {
            return format!("{}/category/{}?{params}", self.base, query.category);
        }

        let term = query.search_param();
        if !term.is_empty() {
            return format!("{}/search?q={}&{params}", self.base, urlencoding::encode(term));
        }

        format!("{}?{params}", self.base)
    }

    /// Fetch one page for `query` starting at `skip`.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_page(&self, skip: usize, query: &Query) -> Result<ProductPage, CatalogError> {
        let url = self.page_url(skip, query);
        debug!(%url, "fetching catalog page");

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status()));
        }

        let page = response.json::<ProductPage>().await?;
        debug!(items = page.products.len(), total = page.total, "page received");
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CatalogClient {
        CatalogClient::new("https://example.test/products")
    }

    #[test]
    fn plain_listing_url() {
        let url = client().page_url(0, &Query::default());
        assert_eq!(url, "https://example.test/products?limit=18&skip=0");
    }

    #[test]
    fn search_url_encodes_the_raw_trimmed_term() {
        let url = client().page_url(18, &Query::new("  wireless Mouse ", "all"));
        assert_eq!(
            url,
            "https://example.test/products/search?q=wireless%20Mouse&limit=18&skip=18"
        );
    }

    #[test]
    fn category_url_wins_over_search_term() {
        let url = client().page_url(36, &Query::new("phone", "laptops"));
        assert_eq!(
            url,
            "https://example.test/products/category/laptops?limit=18&skip=36"
        );
    }

    #[test]
    fn trailing_slashes_in_base_are_stripped() {
        let c = CatalogClient::new("https://example.test/products//");
        assert_eq!(c.base(), "https://example.test/products");
    }

    #[tokio::test]
    async fn fetch_page_decodes_products_and_total() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("limit".into(), "18".into()),
                mockito::Matcher::UrlEncoded("skip".into(), "0".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"products":[{"id":1,"title":"Kettle","price":24.5,"rating":4.1,"category":"kitchen","thumbnail":"k.png"}],"total":1}"#,
            )
            .create_async()
            .await;

        let client = CatalogClient::new(server.url());
        let page = client.fetch_page(0, &Query::default()).await.unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.products.len(), 1);
        assert_eq!(page.products[0].title, "Kettle");
        assert_eq!(page.products[0].price, 24.5);
    }

    #[tokio::test]
    async fn non_success_status_maps_to_status_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = CatalogClient::new(server.url());
        let err = client.fetch_page(0, &Query::default()).await.unwrap_err();
        match err {
            CatalogError::Status(code) => assert_eq!(code.as_u16(), 503),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn garbage_body_maps_to_transport_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = CatalogClient::new(server.url());
        let err = client.fetch_page(0, &Query::default()).await.unwrap_err();
        assert!(matches!(err, CatalogError::Transport(_)));
    }
}
