//! Consolidated scrape result for one storefront.
//!
//! Absence is modelled explicitly (empty vectors, [`PageText::NotFound`],
//! `Option` prices). The literal placeholder strings that API consumers
//! expect (`"Not found."`, `{"status": ...}` objects, the `"N/A"` FAQ entry)
//! are produced only by the `Serialize` impls in this module and by
//! [`crate::export`].
//!
//! ## Catalog records
//! `products.json` entries are passed through verbatim. [`CatalogProduct`]
//! wraps the raw JSON value and exposes typed read-only views of the fields
//! the exporter needs.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

pub const NOT_FOUND: &str = "Not found.";
pub const PRICE_UNAVAILABLE: &str = "N/A";
pub const NO_SOCIAL_LINKS: &str = "No social media links found.";
pub const NO_IMPORTANT_LINKS: &str = "No important links found.";
pub const NO_FAQS: &str = "No FAQs found or parsed.";
const FAQ_PLACEHOLDER_QUESTION: &str = "N/A";

/// A single product from the storefront's public `products.json` feed.
///
/// The wire object is held as-is so that a product with an unusual shape
/// (`"variants": null`, a numeric `product_type`) never fails the page it
/// arrived on. The accessors read the fields the exporter needs and treat
/// anything of the wrong type as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogProduct(pub Value);

impl CatalogProduct {
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    /// URL slug for the product page (e.g., `"linen-shirt-navy"`).
    #[must_use]
    pub fn handle(&self) -> Option<&str> {
        self.str_field("handle")
    }

    #[must_use]
    pub fn product_type(&self) -> Option<&str> {
        self.str_field("product_type")
    }

    #[must_use]
    pub fn vendor(&self) -> Option<&str> {
        self.str_field("vendor")
    }

    /// ISO-8601 timestamp, unparsed.
    #[must_use]
    pub fn published_at(&self) -> Option<&str> {
        self.str_field("published_at")
    }

    /// Observed as a JSON array of strings; legacy feeds send a single
    /// comma-separated string, which is split on commas.
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        match self.0.get("tags") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
            Some(Value::String(joined)) => joined
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_owned)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Price of the first listed variant, if any. Some feeds send a bare
    /// number; it is returned in its textual form.
    #[must_use]
    pub fn first_price(&self) -> Option<String> {
        let price = self.0.get("variants")?.as_array()?.first()?.get("price")?;
        match price {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

/// A product inferred from homepage placement rather than the catalog feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroProduct {
    pub title: String,
    pub url: String,
    pub handle: String,
    /// Display price exactly as rendered by the theme (e.g., `"Rs. 1,299.00"`).
    #[serde(serialize_with = "price_or_unavailable")]
    pub price: Option<String>,
}

/// A fixed category key and the first URL found for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledLink {
    pub key: &'static str,
    pub url: String,
}

/// Social platform links in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialLinks(pub Vec<LabeledLink>);

/// Navigation links (contact, blog, policies, ...) in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportantLinks(pub Vec<LabeledLink>);

impl SocialLinks {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        lookup(&self.0, key)
    }
}

impl ImportantLinks {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        lookup(&self.0, key)
    }
}

fn lookup<'a>(links: &'a [LabeledLink], key: &str) -> Option<&'a str> {
    links
        .iter()
        .find(|link| link.key == key)
        .map(|link| link.url.as_str())
}

impl Serialize for SocialLinks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_links(&self.0, NO_SOCIAL_LINKS, serializer)
    }
}

impl Serialize for ImportantLinks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_links(&self.0, NO_IMPORTANT_LINKS, serializer)
    }
}

/// Writes links as a JSON object preserving insertion order, or a
/// `{"status": <empty_status>}` object when there are none.
fn serialize_links<S: Serializer>(
    links: &[LabeledLink],
    empty_status: &str,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    if links.is_empty() {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("status", empty_status)?;
        return map.end();
    }
    let mut map = serializer.serialize_map(Some(links.len()))?;
    for link in links {
        map.serialize_entry(link.key, &link.url)?;
    }
    map.end()
}

/// Email addresses and phone numbers found in the homepage text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactInfo {
    #[serde(serialize_with = "list_or_not_found")]
    pub emails: Vec<String>,
    #[serde(serialize_with = "list_or_not_found")]
    pub phone_numbers: Vec<String>,
}

impl ContactInfo {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.phone_numbers.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Parsed FAQ entries, unique by question text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqSection(pub Vec<FaqEntry>);

impl Serialize for FaqSection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.is_empty() {
            let mut seq = serializer.serialize_seq(Some(1))?;
            seq.serialize_element(&FaqEntry {
                question: FAQ_PLACEHOLDER_QUESTION.to_string(),
                answer: NO_FAQS.to_string(),
            })?;
            return seq.end();
        }
        self.0.serialize(serializer)
    }
}

/// Normalized text of an informational page (about, policies).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageText {
    Found(String),
    NotFound,
}

impl PageText {
    #[must_use]
    pub fn as_found(&self) -> Option<&str> {
        match self {
            PageText::Found(text) => Some(text),
            PageText::NotFound => None,
        }
    }
}

impl Serialize for PageText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_found().unwrap_or(NOT_FOUND))
    }
}

/// Everything extracted from one storefront in a single request.
///
/// Field order is the JSON key order of the API response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapeReport {
    pub product_catalog: Vec<CatalogProduct>,
    pub hero_products: Vec<HeroProduct>,
    pub social_media_links: SocialLinks,
    pub contact_info: ContactInfo,
    pub important_links: ImportantLinks,
    pub about_us_text: PageText,
    pub privacy_policy: PageText,
    pub return_policy: PageText,
    pub refund_policy: PageText,
    pub faq_page: FaqSection,
}

fn price_or_unavailable<S: Serializer>(
    price: &Option<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(price.as_deref().unwrap_or(PRICE_UNAVAILABLE))
}

fn list_or_not_found<S: Serializer>(values: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    if values.is_empty() {
        return [NOT_FOUND].serialize(serializer);
    }
    values.serialize(serializer)
}
