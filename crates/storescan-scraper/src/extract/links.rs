use scraper::Html;
use storescan_core::{ImportantLinks, LabeledLink};

use crate::normalize::stripped_text;
use crate::target::StoreTarget;

use super::anchors;

/// Link categories and the keywords matched against an anchor's text or
/// href (both lowercased).
const IMPORTANT_LINK_KEYWORDS: [(&str, &[&str]); 7] = [
    ("contact_us", &["contact", "support", "help"]),
    (
        "order_tracking",
        &["track order", "order status", "my orders", "tracking"],
    ),
    ("blog", &["blog", "news", "articles"]),
    ("shipping_policy", &["shipping policy", "delivery"]),
    ("privacy_policy_link", &["privacy policy"]),
    (
        "refund_policy_link",
        &["refund policy", "return policy", "returns"],
    ),
    ("terms_of_service", &["terms of service", "terms & conditions"]),
];

/// Finds the first anchor (document order) for each navigation category.
///
/// Categories are reported in table order; the stored URL is the lowercased
/// href resolved against the store base.
#[must_use]
pub fn detect_important_links(document: &Html, target: &StoreTarget) -> ImportantLinks {
    let candidates: Vec<(String, String)> = anchors(document)
        .map(|(anchor, href)| {
            (
                stripped_text(anchor).to_lowercase(),
                href.to_lowercase(),
            )
        })
        .collect();

    let found = IMPORTANT_LINK_KEYWORDS
        .iter()
        .filter_map(|(key, keywords)| {
            candidates
                .iter()
                .find(|(text, href)| {
                    keywords
                        .iter()
                        .any(|keyword| text.contains(keyword) || href.contains(keyword))
                })
                .map(|(_, href)| LabeledLink {
                    key: *key,
                    url: target.absolutize(href),
                })
        })
        .collect();

    ImportantLinks(found)
}
