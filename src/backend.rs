//! Client for the external scrape backend.
//!
//! Each source has its own endpoint (`/scrape_amazon`, `/scrape_ebay`,
//! `/scrape_meta_ads`), all taking `{search_query, num_products}` and
//! answering `{success, products | ads, top_product?, stats?, error?}`.

use crate::error::SearchError;
use crate::search::{Ad, Product, SearchResult, Source};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Anything that can turn a keyword into raw results
pub trait ResultProvider {
    fn fetch(
        &self,
        source: Source,
        keyword: &str,
        num_products: u32,
    ) -> Result<Vec<SearchResult>, SearchError>;
}

impl<P: ResultProvider + ?Sized> ResultProvider for Box<P> {
    fn fetch(
        &self,
        source: Source,
        keyword: &str,
        num_products: u32,
    ) -> Result<Vec<SearchResult>, SearchError> {
        (**self).fetch(source, keyword, num_products)
    }
}

#[derive(Debug, Serialize)]
struct ScrapeRequest<'a> {
    search_query: &'a str,
    num_products: u32,
}

#[derive(Debug, Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    ads: Vec<Ad>,
    #[serde(default)]
    top_product: Option<serde_json::Value>,
    #[serde(default)]
    stats: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Error body shapes: our backend's `{error}` and FastAPI's `{detail}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    detail: Option<serde_json::Value>,
}

impl ErrorBody {
    fn message(self) -> Option<String> {
        self.error.or_else(|| {
            self.detail.map(|d| match d {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
        })
    }
}

pub struct BackendClient {
    client: Client,
    base_url: Url,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SearchError> {
        let mut base_url = Url::parse(base_url).map_err(|e| {
            SearchError::InvalidInput(format!("invalid backend url '{}': {}", base_url, e))
        })?;
        // Url::join replaces the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(concat!("product_scout/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::NetworkFailure(e.to_string()))?;

        Ok(BackendClient { client, base_url })
    }

    pub fn endpoint_url(&self, source: Source) -> Result<Url, SearchError> {
        self.base_url
            .join(source.endpoint())
            .map_err(|e| SearchError::InvalidInput(format!("invalid endpoint: {}", e)))
    }
}

impl ResultProvider for BackendClient {
    fn fetch(
        &self,
        source: Source,
        keyword: &str,
        num_products: u32,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let url = self.endpoint_url(source)?;
        log::debug!("POST {} (query: {:?}, num_products: {})", url, keyword, num_products);

        let response = self
            .client
            .post(url)
            .json(&ScrapeRequest {
                search_query: keyword,
                num_products,
            })
            .send()
            .map_err(|e| SearchError::NetworkFailure(e.to_string()))?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::message)
                .unwrap_or_else(|| format!("HTTP {}", status));
            return Err(SearchError::BackendError(message));
        }

        parse_response(source, &body)
    }
}

/// Decode a 2xx body into results for `source`
fn parse_response(source: Source, body: &str) -> Result<Vec<SearchResult>, SearchError> {
    let payload: ScrapeResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::BackendError(format!("malformed response: {}", e)))?;

    if !payload.success {
        return Err(SearchError::BackendError(
            payload
                .error
                .unwrap_or_else(|| "search was not successful".to_string()),
        ));
    }

    if payload.top_product.is_some() || payload.stats.is_some() {
        log::debug!("Ignoring backend top_product/stats, they are recomputed locally");
    }

    let results: Vec<SearchResult> = if source.returns_ads() {
        if !payload.products.is_empty() {
            log::warn!("{} returned products instead of ads, ignoring them", source);
        }
        payload.ads.into_iter().map(SearchResult::Ad).collect()
    } else {
        if !payload.ads.is_empty() {
            log::warn!("{} returned ads instead of products, ignoring them", source);
        }
        payload.products.into_iter().map(SearchResult::Product).collect()
    };

    log::debug!("{} returned {} results", source, results.len());
    Ok(results)
}
