use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use storescan_core::HeroProduct;

use crate::normalize::stripped_text;
use crate::target::StoreTarget;

static HANDLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/products/([^/?#]+)").expect("valid handle regex"));

static TITLE_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"product-card__title|product-item__title|product-title|title")
        .expect("valid title class regex")
});

static PRICE_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"price-item|product-card__price|product-item__price|price")
        .expect("valid price class regex")
});

/// A strategy for locating product-link candidates in a document.
trait CandidateMatcher: Send + Sync {
    /// Short name used in trace output.
    fn label(&self) -> &'static str;

    fn candidates<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>>;
}

struct CssMatcher {
    label: &'static str,
    selector: Selector,
}

impl CssMatcher {
    fn boxed(label: &'static str, css: &str) -> Box<dyn CandidateMatcher> {
        Box::new(Self {
            label,
            selector: Selector::parse(css).expect("valid hero selector"),
        })
    }
}

impl CandidateMatcher for CssMatcher {
    fn label(&self) -> &'static str {
        self.label
    }

    fn candidates<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        document.select(&self.selector).collect()
    }
}

/// Tried in priority order: a generic product anchor first, then common
/// theme markup.
static HERO_MATCHERS: LazyLock<Vec<Box<dyn CandidateMatcher>>> = LazyLock::new(|| {
    vec![
        CssMatcher::boxed("product-anchor", r#"a[href*="/products/"]"#),
        CssMatcher::boxed("product-card", ".product-card__link"),
        CssMatcher::boxed("grid-view-item", ".grid-view-item__link"),
        CssMatcher::boxed("product-item", ".product-item__info a"),
        CssMatcher::boxed("grid-product-info", ".grid__item .product-info a"),
    ]
});

/// Products linked from the homepage, unique by handle.
///
/// The first matcher (and first anchor within it) to produce a handle
/// decides that product's title and price; later matches for the same
/// handle are ignored.
#[must_use]
pub fn detect_hero(document: &Html, target: &StoreTarget) -> Vec<HeroProduct> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut products = Vec::new();

    for matcher in HERO_MATCHERS.iter() {
        let before = products.len();
        for anchor in matcher.candidates(document) {
            let Some((url, handle)) = product_link(anchor, target) else {
                continue;
            };
            if !seen.insert(handle.clone()) {
                continue;
            }
            products.push(HeroProduct {
                title: element_text_by_class(anchor, &TITLE_CLASS_RE)
                    .unwrap_or_else(|| title_case(&handle.replace('-', " "))),
                url,
                handle,
                price: element_text_by_class(anchor, &PRICE_CLASS_RE),
            });
        }
        tracing::trace!(
            matcher = matcher.label(),
            added = products.len() - before,
            "hero matcher applied"
        );
    }

    products
}

/// Absolute product URL (query string removed) and handle of an anchor
/// that links to a product page.
fn product_link(anchor: ElementRef<'_>, target: &StoreTarget) -> Option<(String, String)> {
    let href = anchor.value().attr("href")?;
    if !href.contains("/products/") {
        return None;
    }
    let absolute = target.absolutize(href);
    let url = absolute.split('?').next().unwrap_or_default().to_owned();
    let handle = HANDLE_RE.captures(&url)?.get(1)?.as_str().to_owned();
    Some((url, handle))
}

/// Text of the first descendant carrying a class token that matches
/// `pattern`; `None` when there is no such element or its text is empty.
fn element_text_by_class(anchor: ElementRef<'_>, pattern: &Regex) -> Option<String> {
    let element = anchor
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().classes().any(|class| pattern.is_match(class)))?;
    let text = stripped_text(element);
    (!text.is_empty()).then_some(text)
}

/// Uppercases the first letter of every alphabetic run and lowercases the
/// rest (`"linen shirt-2pack"` -> `"Linen Shirt-2Pack"`).
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}
