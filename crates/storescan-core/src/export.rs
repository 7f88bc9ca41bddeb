//! Tabular (CSV) rendering of a [`ScrapeReport`].
//!
//! Every leaf fact becomes one row. `Category` (and `Subcategory` for
//! products) tells record kinds apart; a section that holds no data emits a
//! single row carrying only a `Status` message. The header contains just the
//! columns used by at least one row, ordered by [`Column::ALL`].

use std::collections::BTreeMap;

use thiserror::Error;

use crate::report::{
    LabeledLink, PageText, ScrapeReport, NOT_FOUND, NO_FAQS, NO_IMPORTANT_LINKS, NO_SOCIAL_LINKS,
    PRICE_UNAVAILABLE,
};

const NO_CONTACT_INFO: &str = "No contact info found.";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer error: {0}")]
    Buffer(String),
}

/// CSV columns in their preferred output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Category,
    Subcategory,
    Title,
    Handle,
    Url,
    ProductUrl,
    Platform,
    Type,
    Value,
    Question,
    Answer,
    Section,
    Content,
    Label,
    Name,
    ProductType,
    Vendor,
    Price,
    PublishedAt,
    Tags,
    Status,
}

impl Column {
    pub const ALL: [Column; 21] = [
        Column::Category,
        Column::Subcategory,
        Column::Title,
        Column::Handle,
        Column::Url,
        Column::ProductUrl,
        Column::Platform,
        Column::Type,
        Column::Value,
        Column::Question,
        Column::Answer,
        Column::Section,
        Column::Content,
        Column::Label,
        Column::Name,
        Column::ProductType,
        Column::Vendor,
        Column::Price,
        Column::PublishedAt,
        Column::Tags,
        Column::Status,
    ];

    #[must_use]
    pub fn header(self) -> &'static str {
        match self {
            Column::Category => "Category",
            Column::Subcategory => "Subcategory",
            Column::Title => "Title",
            Column::Handle => "Handle",
            Column::Url => "URL",
            Column::ProductUrl => "Product_URL",
            Column::Platform => "Platform",
            Column::Type => "Type",
            Column::Value => "Value",
            Column::Question => "Question",
            Column::Answer => "Answer",
            Column::Section => "Section",
            Column::Content => "Content",
            Column::Label => "Label",
            Column::Name => "Name",
            Column::ProductType => "Product_Type",
            Column::Vendor => "Vendor",
            Column::Price => "Price",
            Column::PublishedAt => "Published_At",
            Column::Tags => "Tags",
            Column::Status => "Status",
        }
    }
}

/// One flattened fact. Cells not set are rendered empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRow(BTreeMap<Column, String>);

impl CsvRow {
    fn new(category: &str) -> Self {
        let mut row = Self::default();
        row.0.insert(Column::Category, category.to_string());
        row
    }

    fn with(mut self, column: Column, value: impl Into<String>) -> Self {
        self.0.insert(column, value.into());
        self
    }

    #[must_use]
    pub fn get(&self, column: Column) -> Option<&str> {
        self.0.get(&column).map(String::as_str)
    }

    fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.0.keys().copied()
    }
}

/// Flattens a report into CSV rows.
///
/// `base_url` is the normalized store base used to build catalog product URLs.
#[must_use]
pub fn flatten_report(report: &ScrapeReport, base_url: &str) -> Vec<CsvRow> {
    let base_url = base_url.trim_end_matches('/');
    let mut rows = Vec::new();

    for product in &report.product_catalog {
        let handle = product.handle().unwrap_or_default();
        rows.push(
            CsvRow::new("Product")
                .with(Column::Subcategory, "Catalog")
                .with(Column::Title, clean_optional(product.title()))
                .with(Column::Handle, handle)
                .with(Column::ProductType, clean_optional(product.product_type()))
                .with(Column::Vendor, clean_optional(product.vendor()))
                .with(
                    Column::Price,
                    product
                        .first_price()
                        .unwrap_or_else(|| PRICE_UNAVAILABLE.to_owned()),
                )
                .with(Column::PublishedAt, product.published_at().unwrap_or_default())
                .with(Column::Tags, clean_text(&product.tags().join(", ")))
                .with(Column::ProductUrl, format!("{base_url}/products/{handle}")),
        );
    }

    for hero in &report.hero_products {
        rows.push(
            CsvRow::new("Product")
                .with(Column::Subcategory, "Hero")
                .with(Column::Title, clean_text(&hero.title))
                .with(Column::Handle, hero.handle.clone())
                .with(Column::ProductUrl, hero.url.clone())
                .with(
                    Column::Price,
                    hero.price.as_deref().unwrap_or(PRICE_UNAVAILABLE),
                ),
        );
    }

    push_links(
        &mut rows,
        &report.social_media_links.0,
        "Social Media",
        Column::Platform,
        capitalize,
        NO_SOCIAL_LINKS,
    );

    let contact = &report.contact_info;
    for email in &contact.emails {
        rows.push(
            CsvRow::new("Contact Info")
                .with(Column::Type, "Email")
                .with(Column::Value, email.clone()),
        );
    }
    for phone in &contact.phone_numbers {
        rows.push(
            CsvRow::new("Contact Info")
                .with(Column::Type, "Phone Number")
                .with(Column::Value, phone.clone()),
        );
    }
    if contact.is_empty() {
        rows.push(CsvRow::new("Contact Info").with(Column::Status, NO_CONTACT_INFO));
    }

    let text_sections: [(&str, &PageText); 4] = [
        ("Privacy Policy", &report.privacy_policy),
        ("Return Policy", &report.return_policy),
        ("Refund Policy", &report.refund_policy),
        ("About Us Text", &report.about_us_text),
    ];
    for (section, text) in text_sections {
        let cleaned = clean_optional(text.as_found());
        let row = CsvRow::new("Text Content").with(Column::Section, section);
        if cleaned.is_empty() {
            rows.push(row.with(Column::Status, NOT_FOUND));
        } else {
            rows.push(row.with(Column::Content, cleaned));
        }
    }

    if report.faq_page.0.is_empty() {
        rows.push(CsvRow::new("FAQ").with(Column::Status, NO_FAQS));
    }
    for faq in &report.faq_page.0 {
        rows.push(
            CsvRow::new("FAQ")
                .with(Column::Question, clean_text(&faq.question))
                .with(Column::Answer, clean_text(&faq.answer)),
        );
    }

    push_links(
        &mut rows,
        &report.important_links.0,
        "Important Link",
        Column::Label,
        |key| title_case(&key.replace('_', " ")),
        NO_IMPORTANT_LINKS,
    );

    rows
}

fn push_links(
    rows: &mut Vec<CsvRow>,
    links: &[LabeledLink],
    category: &str,
    label_column: Column,
    label: impl Fn(&str) -> String,
    empty_status: &str,
) {
    if links.is_empty() {
        rows.push(CsvRow::new(category).with(Column::Status, empty_status));
        return;
    }
    for link in links {
        rows.push(
            CsvRow::new(category)
                .with(label_column, label(link.key))
                .with(Column::Url, link.url.clone()),
        );
    }
}

/// Renders rows as UTF-8 CSV with a header line.
///
/// # Errors
///
/// Returns [`ExportError`] if the CSV writer fails.
pub fn render_csv(rows: &[CsvRow]) -> Result<String, ExportError> {
    let mut used: Vec<Column> = rows.iter().flat_map(CsvRow::columns).collect();
    used.sort_unstable();
    used.dedup();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(used.iter().map(|c| c.header()))?;
    for row in rows {
        writer.write_record(used.iter().map(|c| row.get(*c).unwrap_or("")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.error().to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Buffer(e.to_string()))
}

/// Collapses every whitespace run (including newlines) into one space.
fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn clean_optional(text: Option<&str>) -> String {
    text.map(clean_text).unwrap_or_default()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn title_case(text: &str) -> String {
    text.split(' ').map(capitalize).collect::<Vec<_>>().join(" ")
}
