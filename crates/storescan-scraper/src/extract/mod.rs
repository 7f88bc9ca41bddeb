//! Heuristic extractors run against store HTML.
//!
//! Every extractor works on an already parsed [`Html`] document and never
//! fails: a page that does not match a heuristic yields an empty section.
//! Documents are parsed and dropped inside synchronous functions so no
//! parser state is held across an `.await`.

mod contact;
mod faq;
mod hero;
mod links;
mod social;

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use storescan_core::{ContactInfo, HeroProduct, ImportantLinks, SocialLinks};

use crate::target::StoreTarget;

pub use contact::{contact_from_text, detect_contact};
pub use faq::parse_faqs;
pub use hero::detect_hero;
pub use links::detect_important_links;
pub use social::detect_social;

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid anchor selector"));

/// Sections derived from the homepage alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomepageFacts {
    pub hero_products: Vec<HeroProduct>,
    pub social_media_links: SocialLinks,
    pub contact_info: ContactInfo,
    pub important_links: ImportantLinks,
}

/// Parses the homepage once and runs every homepage extractor against it.
#[must_use]
pub fn extract_homepage(html: &str, target: &StoreTarget) -> HomepageFacts {
    let document = Html::parse_document(html);
    HomepageFacts {
        hero_products: detect_hero(&document, target),
        social_media_links: detect_social(&document, target),
        contact_info: detect_contact(&document),
        important_links: detect_important_links(&document, target),
    }
}

/// Anchors carrying an `href`, in document order.
fn anchors(document: &Html) -> impl Iterator<Item = (ElementRef<'_>, &str)> {
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|a| a.value().attr("href").map(|href| (a, href)))
}
