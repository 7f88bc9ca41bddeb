//! Store base URL handling and href resolution.

use reqwest::Url;

use crate::error::ScraperError;

/// Page size requested from `products.json`; 250 is the storefront maximum.
pub const CATALOG_PAGE_LIMIT: u32 = 250;

/// Normalized base URL of one storefront.
///
/// A missing scheme defaults to `https://`, surrounding whitespace and
/// trailing slashes are removed. Any path the caller supplied is kept, so
/// `https://shop.example.com/collections/sale` scopes the catalog feed to
/// that collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreTarget {
    base: String,
    url: Url,
}

impl StoreTarget {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidStoreUrl`] if the input is empty, does
    /// not parse as a URL, is not `http`/`https`, or has no host.
    pub fn parse(raw: &str) -> Result<Self, ScraperError> {
        let invalid = |reason: &str| ScraperError::InvalidStoreUrl {
            store_url: raw.to_owned(),
            reason: reason.to_owned(),
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(invalid("URL is empty"));
        }

        let lower = trimmed.to_ascii_lowercase();
        let with_scheme = if lower.starts_with("http://") || lower.starts_with("https://") {
            trimmed.to_owned()
        } else {
            format!("https://{trimmed}")
        };

        let base = with_scheme.trim_end_matches('/').to_owned();
        let url = Url::parse(&base).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid("URL has no host"));
        }

        Ok(Self { base, url })
    }

    /// The base URL without a trailing slash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Hostname of the store (e.g., `"shop.example.com"`).
    #[must_use]
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    /// Resolves an href found on a store page against the base URL.
    ///
    /// Hrefs that already parse as absolute URLs (including `mailto:` and
    /// `tel:`) are returned exactly as written.
    #[must_use]
    pub fn absolutize(&self, href: &str) -> String {
        if Url::parse(href).is_ok() {
            return href.to_owned();
        }
        self.url
            .join(href)
            .map_or_else(|_| href.to_owned(), |joined| joined.to_string())
    }

    /// URL of one `products.json` page (1-based).
    #[must_use]
    pub fn catalog_page_url(&self, page: usize) -> String {
        format!(
            "{}/products.json?limit={CATALOG_PAGE_LIMIT}&page={page}",
            self.base
        )
    }
}

impl std::fmt::Display for StoreTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.base)
    }
}
