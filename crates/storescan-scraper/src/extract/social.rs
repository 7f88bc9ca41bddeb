use scraper::Html;
use storescan_core::{LabeledLink, SocialLinks};

use crate::target::StoreTarget;

use super::anchors;

/// Platform keys and the href fragments that identify them.
const SOCIAL_PLATFORMS: [(&str, &[&str]); 9] = [
    ("facebook", &["facebook.com"]),
    ("twitter", &["twitter.com", "x.com"]),
    ("instagram", &["instagram.com"]),
    ("pinterest", &["pinterest.com"]),
    ("youtube", &["youtube.com"]),
    ("linkedin", &["linkedin.com"]),
    ("tiktok", &["tiktok.com"]),
    ("snapchat", &["snapchat.com"]),
    ("whatsapp", &["wa.me"]),
];

/// Finds the first link to each social platform on the page.
///
/// Anchors are scanned once in document order; a platform is recorded by
/// the first href (lowercased) containing one of its fragments and is never
/// overwritten. Keys appear in the order they were first found.
#[must_use]
pub fn detect_social(document: &Html, target: &StoreTarget) -> SocialLinks {
    let mut found: Vec<LabeledLink> = Vec::new();

    for (_, href) in anchors(document) {
        let href = href.to_lowercase();
        for (platform, fragments) in SOCIAL_PLATFORMS {
            if found.iter().any(|link| link.key == platform) {
                continue;
            }
            if fragments.iter().any(|fragment| href.contains(fragment)) {
                found.push(LabeledLink {
                    key: platform,
                    url: target.absolutize(&href),
                });
            }
        }
    }

    SocialLinks(found)
}
