pub mod client;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod pages;
pub mod scrape;
pub mod target;
pub mod types;

pub use client::StorefrontClient;
pub use error::ScraperError;
pub use extract::{contact_from_text, extract_homepage, parse_faqs, HomepageFacts};
pub use normalize::normalize_html;
pub use scrape::{ScrapeOptions, StoreScraper, HOMEPAGE_UNAVAILABLE};
pub use target::StoreTarget;
pub use types::ProductsPage;
