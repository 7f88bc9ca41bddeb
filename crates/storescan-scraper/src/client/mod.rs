//! HTTP client for storefront HTML pages and the `products.json` feed.

mod catalog;

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;
use crate::target::StoreTarget;
use crate::types::ProductsPage;

/// HTTP client shared by every fetch of one scrape.
///
/// Maps 404 and other non-2xx responses to typed errors. Every request
/// carries the configured `User-Agent` and is bounded by the configured
/// timeout. No retries: a failed page is simply reported as missing.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    pub(super) client: Client,
}

impl StorefrontClient {
    /// Creates a `StorefrontClient` with the given per-request timeout and
    /// `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches a page and returns its body as text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::NotFound`] on HTTP 404.
    /// - [`ScraperError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`ScraperError::Http`] on network, TLS, timeout or body decode failure.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/json;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound {
                url: url.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }

    /// Fetches one page (1-based) of the store's `products.json` feed.
    ///
    /// # Errors
    ///
    /// Any error from [`Self::fetch_page`], or
    /// [`ScraperError::Deserialize`] if the body is not a products page.
    pub async fn fetch_products_page(
        &self,
        target: &StoreTarget,
        page: usize,
    ) -> Result<ProductsPage, ScraperError> {
        let url = target.catalog_page_url(page);
        let body = self.fetch_page(&url).await?;
        serde_json::from_str::<ProductsPage>(&body).map_err(|e| ScraperError::Deserialize {
            context: format!("products page {page} from {target}"),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
