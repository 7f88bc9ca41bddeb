//! Plain-text views of parsed store pages.
//!
//! [`normalize_document`] produces the text stored for about and policy
//! pages. The smaller helpers give extractors a consistent notion of an
//! element's visible text.

use scraper::{ElementRef, Html};

/// Subtrees that never render as text. `noscript` is included because the
/// parser runs with scripting enabled and keeps its markup as raw text.
const HIDDEN_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Page chrome left out of about and policy text.
const CHROME_TAGS: [&str; 3] = ["nav", "footer", "header"];

/// Parses `html` and normalizes it with [`normalize_document`].
#[must_use]
pub fn normalize_html(html: &str) -> String {
    normalize_document(&Html::parse_document(html))
}

/// Extracts the readable text of a document, one fragment per line.
///
/// Hidden text and text under `nav`, `footer` and `header` is dropped. The
/// rest is split into lines, each line is split again on double-space
/// runs (multi-column layouts render as one line otherwise), and empty
/// fragments are discarded. Deterministic for a given document.
#[must_use]
pub fn normalize_document(document: &Html) -> String {
    let raw: String = text_nodes(document, |name| {
        HIDDEN_TAGS.contains(&name) || CHROME_TAGS.contains(&name)
    })
    .collect();
    collapse_lines(&raw)
}

/// Text nodes of `document` in order, leaving out any node with an ancestor
/// element whose name `skip` accepts.
fn text_nodes<'a>(
    document: &'a Html,
    skip: impl Fn(&str) -> bool + 'a,
) -> impl Iterator<Item = &'a str> + 'a {
    document.root_element().descendants().filter_map(move |node| {
        let text = node.value().as_text()?;
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| skip(el.name()))
        });
        (!hidden).then_some(&**text)
    })
}

/// Trims every line, splits on double spaces, drops empty fragments and
/// joins the rest with `\n`.
#[must_use]
pub fn collapse_lines(text: &str) -> String {
    text.split(|c| c == '\n' || c == '\r')
        .flat_map(|line| line.trim().split("  "))
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Visible text of one element with whitespace runs collapsed to a single
/// space.
#[must_use]
pub fn stripped_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// All rendered text of the document concatenated, header and footer
/// included. Script, style, `noscript` and `template` contents are left out.
#[must_use]
pub fn document_text(document: &Html) -> String {
    text_nodes(document, |name| HIDDEN_TAGS.contains(&name)).collect()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
