//! Secondary store pages: about, policies and FAQ.

use storescan_core::{FaqSection, PageText};

use crate::client::StorefrontClient;
use crate::extract::parse_faqs;
use crate::normalize::normalize_html;
use crate::target::StoreTarget;

pub const ABOUT_PATHS: &[&str] = &["/pages/about", "/pages/about-us"];
pub const PRIVACY_POLICY_PATHS: &[&str] = &["/policies/privacy-policy"];
pub const RETURN_POLICY_PATHS: &[&str] = &["/policies/return-policy", "/policies/shipping-policy"];
pub const REFUND_POLICY_PATHS: &[&str] = &["/policies/refund-policy"];
pub const FAQ_PATHS: &[&str] = &[
    "/pages/faq",
    "/pages/faqs",
    "/pages/frequently-asked-questions",
];

/// Returns the normalized text of the first candidate path that fetches
/// successfully and is not empty after normalization.
pub async fn resolve_page_text(
    client: &StorefrontClient,
    target: &StoreTarget,
    paths: &[&str],
) -> PageText {
    for path in paths {
        let url = target.absolutize(path);
        match client.fetch_page(&url).await {
            Ok(html) => {
                let text = normalize_html(&html);
                if !text.is_empty() {
                    return PageText::Found(text);
                }
                tracing::debug!(url = %url, "page normalized to empty text");
            }
            Err(e) => tracing::debug!(url = %url, error = %e, "candidate page unavailable"),
        }
    }
    PageText::NotFound
}

/// Parses FAQs from the first candidate path that yields at least one entry.
pub async fn detect_faq(
    client: &StorefrontClient,
    target: &StoreTarget,
    paths: &[&str],
) -> FaqSection {
    for path in paths {
        let url = target.absolutize(path);
        match client.fetch_page(&url).await {
            Ok(html) => {
                let faqs = parse_faqs(&html);
                if !faqs.is_empty() {
                    tracing::debug!(url = %url, count = faqs.len(), "faq entries parsed");
                    return FaqSection(faqs);
                }
            }
            Err(e) => tracing::debug!(url = %url, error = %e, "faq page unavailable"),
        }
    }
    FaqSection::default()
}
