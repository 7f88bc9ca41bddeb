use std::collections::HashSet;

use scraper::{ElementRef, Html};
use storescan_core::FaqEntry;

use crate::normalize::stripped_text;

const QUESTION_TAGS: [&str; 5] = ["h2", "h3", "h4", "strong", "b"];

/// Sibling tags read as a question's answer until the first other tag.
const ANSWER_TAGS: [&str; 5] = ["p", "div", "ul", "ol", "span"];

/// Tags searched among later siblings when no direct answer was found.
const FALLBACK_ANSWER_TAGS: [&str; 3] = ["p", "div", "li"];

/// Heading-like elements need strictly more characters than this to count
/// as a question.
const MIN_QUESTION_CHARS: usize = 5;

/// Parses question/answer pairs out of an FAQ page, unique by question.
///
/// Questions come from heading-like elements (`h2`-`h4`, `strong`, `b`) and
/// from `<details>` blocks with a `<summary>`. A heading's answer is the
/// text of its directly following `p`/`div`/`ul`/`ol`/`span` siblings; a
/// `<details>` answer is everything inside it except the summary. When that
/// is empty, the next `p`/`div`/`li` sibling is used instead.
#[must_use]
pub fn parse_faqs(html: &str) -> Vec<FaqEntry> {
    let document = Html::parse_document(html);
    let mut seen: HashSet<String> = HashSet::new();

    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter_map(faq_entry)
        .filter(|entry| seen.insert(entry.question.clone()))
        .collect()
}

fn faq_entry(element: ElementRef<'_>) -> Option<FaqEntry> {
    let name = element.value().name();
    let (question, answer) = if QUESTION_TAGS.contains(&name) {
        let question = stripped_text(element);
        if question.chars().count() <= MIN_QUESTION_CHARS {
            return None;
        }
        (question, sibling_answer(element))
    } else if name == "details" {
        details_question_answer(element)?
    } else {
        return None;
    };

    if question.is_empty() {
        return None;
    }
    if !answer.is_empty() {
        return Some(FaqEntry { question, answer });
    }

    let fallback = element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| FALLBACK_ANSWER_TAGS.contains(&sibling.value().name()))?;
    let answer = stripped_text(fallback);
    (!answer.is_empty()).then_some(FaqEntry { question, answer })
}

fn sibling_answer(heading: ElementRef<'_>) -> String {
    heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|sibling| ANSWER_TAGS.contains(&sibling.value().name()))
        .map(stripped_text)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_owned()
}

fn details_question_answer(details: ElementRef<'_>) -> Option<(String, String)> {
    let summary = details
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "summary")?;

    let answer = details
        .children()
        .filter(|child| child.id() != summary.id())
        .flat_map(|child| child.descendants())
        .filter_map(|node| node.value().as_text())
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    Some((stripped_text(summary), answer))
}
