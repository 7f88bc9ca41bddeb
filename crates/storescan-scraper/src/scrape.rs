//! One full scrape of a storefront.

use storescan_core::{AppConfig, ScrapeReport, DEFAULT_USER_AGENT};

use crate::client::StorefrontClient;
use crate::error::ScraperError;
use crate::extract::extract_homepage;
use crate::pages::{
    detect_faq, resolve_page_text, ABOUT_PATHS, FAQ_PATHS, PRIVACY_POLICY_PATHS,
    REFUND_POLICY_PATHS, RETURN_POLICY_PATHS,
};
use crate::target::StoreTarget;

/// User-facing message for [`ScraperError::HomepageUnavailable`].
pub const HOMEPAGE_UNAVAILABLE: &str =
    "Could not fetch the store's homepage. Please check the URL.";

/// Per-scrape HTTP and pagination settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Upper bound on `products.json` pages read for one store.
    pub max_catalog_pages: usize,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            max_catalog_pages: 1000,
        }
    }
}

impl From<&AppConfig> for ScrapeOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            request_timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            max_catalog_pages: config.max_catalog_pages,
        }
    }
}

/// Scrapes one store. Owns its HTTP client; create one per request.
#[derive(Debug)]
pub struct StoreScraper {
    target: StoreTarget,
    client: StorefrontClient,
    max_catalog_pages: usize,
}

impl StoreScraper {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn new(target: StoreTarget, options: &ScrapeOptions) -> Result<Self, ScraperError> {
        let client = StorefrontClient::new(options.request_timeout_secs, &options.user_agent)?;
        Ok(Self {
            target,
            client,
            max_catalog_pages: options.max_catalog_pages,
        })
    }

    #[must_use]
    pub fn target(&self) -> &StoreTarget {
        &self.target
    }

    /// Fetches the homepage, then gathers every report section.
    ///
    /// The homepage is fetched first and is the only fetch whose failure
    /// aborts the scrape; nothing else is requested in that case. The
    /// catalog, text pages and FAQ are then fetched concurrently, and any
    /// failure among them only leaves its own section empty.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::HomepageUnavailable`] if the homepage cannot
    /// be fetched.
    pub async fn run_all(&self) -> Result<ScrapeReport, ScraperError> {
        let homepage_url = self.target.as_str();
        let homepage = self.client.fetch_page(homepage_url).await.map_err(|e| {
            tracing::warn!(store = %self.target, error = %e, "homepage fetch failed");
            ScraperError::HomepageUnavailable {
                url: homepage_url.to_owned(),
                source: Box::new(e),
            }
        })?;

        let facts = extract_homepage(&homepage, &self.target);

        let (
            product_catalog,
            about_us_text,
            privacy_policy,
            return_policy,
            refund_policy,
            faq_page,
        ) = tokio::join!(
            self.client
                .collect_catalog(&self.target, self.max_catalog_pages),
            resolve_page_text(&self.client, &self.target, ABOUT_PATHS),
            resolve_page_text(&self.client, &self.target, PRIVACY_POLICY_PATHS),
            resolve_page_text(&self.client, &self.target, RETURN_POLICY_PATHS),
            resolve_page_text(&self.client, &self.target, REFUND_POLICY_PATHS),
            detect_faq(&self.client, &self.target, FAQ_PATHS),
        );

        tracing::info!(
            store = %self.target,
            catalog = product_catalog.len(),
            hero = facts.hero_products.len(),
            faqs = faq_page.0.len(),
            "scrape complete"
        );

        Ok(ScrapeReport {
            product_catalog,
            hero_products: facts.hero_products,
            social_media_links: facts.social_media_links,
            contact_info: facts.contact_info,
            important_links: facts.important_links,
            about_us_text,
            privacy_policy,
            return_policy,
            refund_policy,
            faq_page,
        })
    }
}
