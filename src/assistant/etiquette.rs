//! Extraction of the `[ETIQUETTE_INFO]` block embedded in generated answers
//!
//! The model is asked to append a block like
//!
//! ```text
//! [ETIQUETTE_INFO]
//! Category: dress-code
//! Advice: Dress modestly in public places.
//! Additional: Malls may ask visitors to cover shoulders.
//! Do:
//! - Carry a light scarf
//! Dont:
//! - Wear swimwear away from the beach
//! [/ETIQUETTE_INFO]
//! ```
//!
//! Generated text is untrusted, so parsing is lenient: missing sections are
//! absent, unknown lines are ignored, and nothing here ever fails.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::models::{EtiquetteCategory, EtiquetteRecord};

pub const BLOCK_OPEN: &str = "[ETIQUETTE_INFO]";
pub const BLOCK_CLOSE: &str = "[/ETIQUETTE_INFO]";

static BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[ETIQUETTE_INFO\](.*?)\[/ETIQUETTE_INFO\]").unwrap());

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(category|advice|additional(?:\s+info)?|do|don['’]?t|do\s+not)\s*:\s*(.*)$")
        .unwrap()
});

static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*•]+|\d+[.)])\s*").unwrap());

/// Result of splitting a generated answer
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Answer text with every etiquette block removed
    pub answer: String,
    pub record: Option<EtiquetteRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Category,
    Advice,
    Additional,
    Dos,
    Donts,
}

impl Section {
    fn from_header(name: &str) -> Self {
        let name = name.to_lowercase();
        match name.as_str() {
            "category" => Section::Category,
            "advice" => Section::Advice,
            "do" => Section::Dos,
            _ if name.starts_with("additional") => Section::Additional,
            _ => Section::Donts,
        }
    }
}

#[derive(Debug, Default)]
struct BlockFields {
    advice: Option<String>,
    additional: Option<String>,
    dos: Vec<String>,
    donts: Vec<String>,
}

/// Split `raw` into the visible answer and the etiquette record.
///
/// Only the first block is parsed. The record's category is always the one
/// detected for the query; the block's own `Category:` line is ignored.
#[must_use]
pub fn extract(raw: &str, category: EtiquetteCategory) -> Extraction {
    let Some(captures) = BLOCK.captures(raw) else {
        return Extraction {
            answer: raw.to_string(),
            record: None,
        };
    };

    let body = captures.get(1).map_or("", |m| m.as_str());
    let answer = BLOCK.replace_all(raw, "").trim().to_string();
    let fields = parse_block(body);

    let record = match fields.advice {
        Some(advice) => Some(EtiquetteRecord {
            category,
            advice,
            additional: fields.additional,
            dos: non_empty(fields.dos),
            donts: non_empty(fields.donts),
        }),
        None => {
            debug!("Etiquette block without advice, dropping it");
            None
        }
    };

    Extraction { answer, record }
}

fn parse_block(body: &str) -> BlockFields {
    let mut fields = BlockFields::default();
    let mut section: Option<Section> = None;

    for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(header) = HEADER.captures(line) {
            let current = Section::from_header(&header[1]);
            let value = header[2].trim();
            section = Some(current);

            match current {
                Section::Category => {}
                Section::Advice => fields.advice = non_blank(value),
                Section::Additional => fields.additional = non_blank(value),
                Section::Dos => push_item(&mut fields.dos, value),
                Section::Donts => push_item(&mut fields.donts, value),
            }
            continue;
        }

        match section {
            Some(Section::Dos) => push_item(&mut fields.dos, line),
            Some(Section::Donts) => push_item(&mut fields.donts, line),
            _ => {}
        }
    }

    fields
}

fn push_item(items: &mut Vec<String>, line: &str) {
    let item = BULLET.replace(line, "");
    let item = item.trim();
    if !item.is_empty() {
        items.push(item.to_string());
    }
}

fn non_blank(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn non_empty(items: Vec<String>) -> Option<Vec<String>> {
    (!items.is_empty()).then_some(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "Dubai is relaxed but modest dress is expected.\n\n\
[ETIQUETTE_INFO]\n\
Category: dress-code\n\
Advice: Cover shoulders and knees in public places.\n\
Additional: Beachwear is fine at beaches and pools.\n\
Do:\n\
- Carry a light scarf\n\
- Wear loose clothing in malls\n\
Dont:\n\
- Wear swimwear in malls\n\
[/ETIQUETTE_INFO]";

    #[test]
    fn test_well_formed_block() {
        let extraction = extract(WELL_FORMED, EtiquetteCategory::DressCode);

        assert_eq!(
            extraction.answer,
            "Dubai is relaxed but modest dress is expected."
        );
        let record = extraction.record.unwrap();
        assert_eq!(record.category, EtiquetteCategory::DressCode);
        assert_eq!(record.advice, "Cover shoulders and knees in public places.");
        assert_eq!(
            record.additional.as_deref(),
            Some("Beachwear is fine at beaches and pools.")
        );
        assert_eq!(
            record.dos.unwrap(),
            vec!["Carry a light scarf", "Wear loose clothing in malls"]
        );
        assert_eq!(record.donts.unwrap(), vec!["Wear swimwear in malls"]);
    }

    #[test]
    fn test_no_block_returns_input_unchanged() {
        let raw = "  The Dubai Frame opens at 9am.  \n";
        let extraction = extract(raw, EtiquetteCategory::PublicBehavior);
        assert_eq!(extraction.answer, raw);
        assert!(extraction.record.is_none());
    }

    #[test]
    fn test_missing_advice_drops_record_but_strips_block() {
        let raw = "Be polite.\n[ETIQUETTE_INFO]\nCategory: greetings\nDo:\n- Smile\n[/ETIQUETTE_INFO]\n";
        let extraction = extract(raw, EtiquetteCategory::Greetings);
        assert_eq!(extraction.answer, "Be polite.");
        assert!(extraction.record.is_none());
    }

    #[test]
    fn test_empty_block_yields_no_record() {
        let extraction = extract(
            "Answer.[ETIQUETTE_INFO][/ETIQUETTE_INFO]",
            EtiquetteCategory::Dining,
        );
        assert_eq!(extraction.answer, "Answer.");
        assert!(extraction.record.is_none());
    }

    #[test]
    fn test_supplied_category_overrides_block_category() {
        let raw = "[ETIQUETTE_INFO]\nCategory: business\nAdvice: Use your right hand.\n[/ETIQUETTE_INFO]";
        let record = extract(raw, EtiquetteCategory::Dining).record.unwrap();
        assert_eq!(record.category, EtiquetteCategory::Dining);
        assert!(record.dos.is_none());
        assert!(record.donts.is_none());
        assert!(record.additional.is_none());
    }

    #[test]
    fn test_only_first_block_is_parsed() {
        let raw = "Intro\n[ETIQUETTE_INFO]\nAdvice: First\n[/ETIQUETTE_INFO]\nMiddle\n\
[ETIQUETTE_INFO]\nAdvice: Second\n[/ETIQUETTE_INFO]";
        let extraction = extract(raw, EtiquetteCategory::Greetings);
        assert_eq!(extraction.record.unwrap().advice, "First");
        assert!(!extraction.answer.contains(BLOCK_OPEN));
        assert!(extraction.answer.starts_with("Intro"));
        assert!(extraction.answer.contains("Middle"));
    }

    #[test]
    fn test_lists_without_bullets_and_numbered_lists() {
        let raw = "[ETIQUETTE_INFO]\n\
Advice: Respect prayer times.\n\
Do:\n\
Lower your voice near mosques\n\
\n\
Remove shoes before entering\n\
Don't:\n\
1. Eat in public during Ramadan daylight hours\n\
2) Walk in front of people praying\n\
[/ETIQUETTE_INFO]";
        let record = extract(raw, EtiquetteCategory::ReligiousCustoms)
            .record
            .unwrap();
        assert_eq!(
            record.dos.unwrap(),
            vec!["Lower your voice near mosques", "Remove shoes before entering"]
        );
        assert_eq!(
            record.donts.unwrap(),
            vec![
                "Eat in public during Ramadan daylight hours",
                "Walk in front of people praying"
            ]
        );
    }

    #[test]
    fn test_header_with_inline_item_and_mixed_case() {
        let raw = "[ETIQUETTE_INFO]\nADVICE: Ask first.\ndo: Ask before taking photos\nDO NOT: Photograph women without consent\n[/ETIQUETTE_INFO]";
        let record = extract(raw, EtiquetteCategory::PublicBehavior)
            .record
            .unwrap();
        assert_eq!(record.advice, "Ask first.");
        assert_eq!(record.dos.unwrap(), vec!["Ask before taking photos"]);
        assert_eq!(
            record.donts.unwrap(),
            vec!["Photograph women without consent"]
        );
    }

    #[test]
    fn test_typographic_apostrophe_in_dont_header() {
        let raw = "[ETIQUETTE_INFO]\nAdvice: Dress modestly.\nDo:\n- Cover shoulders\nDon’t:\n- Wear swimwear in malls\n[/ETIQUETTE_INFO]";
        let record = extract(raw, EtiquetteCategory::DressCode).record.unwrap();
        assert_eq!(record.dos.unwrap(), vec!["Cover shoulders"]);
        assert_eq!(record.donts.unwrap(), vec!["Wear swimwear in malls"]);
    }

    #[test]
    fn test_unclosed_block_is_not_a_block() {
        let raw = "Answer\n[ETIQUETTE_INFO]\nAdvice: Never closed";
        let extraction = extract(raw, EtiquetteCategory::Business);
        assert_eq!(extraction.answer, raw);
        assert!(extraction.record.is_none());
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let first = extract(WELL_FORMED, EtiquetteCategory::DressCode);
        let second = extract(WELL_FORMED, EtiquetteCategory::DressCode);
        assert_eq!(first, second);
    }
}
