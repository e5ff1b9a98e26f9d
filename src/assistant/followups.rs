//! Turns the model's suggested follow-up questions into clean strings

use regex::Regex;
use std::sync::LazyLock;

/// Upper bound on suggestions returned to the client
pub const MAX_FOLLOWUPS: usize = 3;

static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(?:\d+[.)]|[-*•])\s*["“']?(.*?)["”']?\s*$"#).unwrap()
});

static LEADING_ENUMERATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\-*.]+\s*").unwrap());

const QUOTES: &[char] = &['"', '\'', '“', '”'];

/// Extract at most [`MAX_FOLLOWUPS`] questions, keeping source order.
///
/// Numbered or bulleted lines are preferred; when the model answered with
/// plain lines instead, every non-empty line is used. Duplicates are kept.
#[must_use]
pub fn extract(text: &str) -> Vec<String> {
    let listed: Vec<String> = text
        .lines()
        .filter_map(|line| LIST_ITEM.captures(line))
        .map(|captures| captures[1].trim().to_string())
        .filter(|item| !item.is_empty())
        .take(MAX_FOLLOWUPS)
        .collect();

    if !listed.is_empty() {
        return listed;
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            LEADING_ENUMERATION
                .replace(line, "")
                .trim()
                .trim_matches(QUOTES)
                .trim()
                .to_string()
        })
        .filter(|item| !item.is_empty())
        .take(MAX_FOLLOWUPS)
        .collect()
}
