use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use storescan_core::ContactInfo;

use crate::normalize::document_text;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid email regex")
});

/// Either an optional `+91`/`091`/`0091` prefix and ten digits, or a
/// 3-3-4 digit grouping separated by `-`, `.` or whitespace.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:(?:\+|0{0,2})91[\s-]?)?[0-9]{10}|(?:[0-9]{3}[-.\s]?){2}[0-9]{4}")
        .expect("valid phone regex")
});

const MIN_PHONE_DIGITS: usize = 7;

/// Scans the full text of the document, including header and footer.
#[must_use]
pub fn detect_contact(document: &Html) -> ContactInfo {
    contact_from_text(&document_text(document))
}

/// Emails and phone numbers found in `text`, deduplicated in first-seen
/// order.
#[must_use]
pub fn contact_from_text(text: &str) -> ContactInfo {
    let mut emails: Vec<String> = Vec::new();
    for m in EMAIL_RE.find_iter(text) {
        push_unique(&mut emails, m.as_str());
    }

    let mut phone_numbers: Vec<String> = Vec::new();
    for m in PHONE_RE.find_iter(text) {
        if let Some(phone) = clean_phone(m.as_str()) {
            push_unique(&mut phone_numbers, &phone);
        }
    }

    ContactInfo {
        emails,
        phone_numbers,
    }
}

/// Keeps digits and `+`; accepts the result only if it has enough digits
/// and is either all digits or `+`-prefixed.
fn clean_phone(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    let digits = cleaned.chars().filter(char::is_ascii_digit).count();
    let well_formed = cleaned.starts_with('+') || digits == cleaned.len();
    (digits >= MIN_PHONE_DIGITS && well_formed).then_some(cleaned)
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_email_and_dashed_phone() {
        let info = contact_from_text("contact me at a@b.com or call 987-654-3210");
        assert_eq!(info.emails, ["a@b.com"]);
        assert_eq!(info.phone_numbers, ["9876543210"]);
    }

    #[test]
    fn keeps_country_code_prefix() {
        let info = contact_from_text("WhatsApp +91 9876543210 anytime");
        assert_eq!(info.phone_numbers, ["+919876543210"]);
    }

    #[test]
    fn deduplicates_in_first_seen_order() {
        let info = contact_from_text(
            "help@acme.com, sales@acme.com, help@acme.com; 555.123.4567 or 555 123 4567",
        );
        assert_eq!(info.emails, ["help@acme.com", "sales@acme.com"]);
        assert_eq!(info.phone_numbers, ["5551234567"]);
    }

    #[test]
    fn nothing_found_is_empty() {
        let info = contact_from_text("Welcome to our store!");
        assert!(info.is_empty());
    }

    #[test]
    fn detect_contact_reads_footer_text() {
        let doc = Html::parse_document(
            "<body><main>Shop</main><footer>Mail hello@acme.co.in</footer></body>",
        );
        assert_eq!(detect_contact(&doc).emails, ["hello@acme.co.in"]);
    }

    #[test]
    fn clean_phone_rejects_short_numbers() {
        assert_eq!(clean_phone("12-34"), None);
        assert_eq!(clean_phone("555-123-4567"), Some("5551234567".to_owned()));
    }
}
