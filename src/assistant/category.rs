//! Detects cultural-etiquette questions and assigns them a category

use crate::models::EtiquetteCategory;

/// Terms that mark a query as being about etiquette
const ETIQUETTE_TERMS: &[&str] = &[
    "etiquette",
    "custom",
    "tradition",
    "dress code",
    "clothing",
    "wear",
    "greet",
    "handshake",
    "gesture",
    "nod",
    "bow",
    "religious",
    "islam",
    "mosque",
    "ramadan",
    "dining",
    "eat",
    "food",
    "restaurant",
    "table manner",
    "public",
    "behavior",
    "behaviour",
    "conduct",
    "appropriate",
    "acceptable",
    "photo",
    "picture",
    "business",
    "meeting",
    "professional",
    "card",
    "gift",
    "home",
    "visit",
    "house",
    "gender",
    "male",
    "female",
    "prayer",
    "modest",
    "rude",
    "polite",
    "offensive",
];

/// Keyword sets per category, checked in priority order
const CATEGORY_KEYWORDS: &[(EtiquetteCategory, &[&str])] = &[
    (
        EtiquetteCategory::DressCode,
        &["dress", "wear", "clothes", "clothing", "attire", "outfit", "modest", "swimsuit", "bikini"],
    ),
    (
        EtiquetteCategory::Greetings,
        &["greet", "handshake", "hello", "salaam", "gesture", "nod", "bow"],
    ),
    (
        EtiquetteCategory::ReligiousCustoms,
        &["mosque", "islam", "prayer", "ramadan", "religious", "faith", "fasting"],
    ),
    (
        EtiquetteCategory::Dining,
        &["eat", "food", "dining", "restaurant", "meal", "breakfast", "lunch", "dinner", "table manner"],
    ),
    (
        EtiquetteCategory::PublicBehavior,
        &["public", "behavior", "behaviour", "acceptable", "allowed", "illegal", "law", "rule", "photo", "picture"],
    ),
    (
        EtiquetteCategory::Business,
        &["business", "meeting", "professional", "office", "work", "colleague", "card"],
    ),
    (
        EtiquetteCategory::HomeVisits,
        &["home", "house", "visit", "invit", "guest", "host", "gift"],
    ),
    (
        EtiquetteCategory::GenderInteractions,
        &["gender", "man", "woman", "male", "female", "interaction", "touch"],
    ),
];

/// Returns true when the query touches on cultural etiquette
#[must_use]
pub fn is_etiquette_query(query: &str) -> bool {
    let lower = query.to_lowercase();
    ETIQUETTE_TERMS.iter().any(|term| lower.contains(term))
}

/// Pick the first category whose keywords occur in the query.
///
/// Falls back to [`EtiquetteCategory::PublicBehavior`] when nothing matches.
#[must_use]
pub fn categorize(query: &str) -> EtiquetteCategory {
    let lower = query.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map_or(EtiquetteCategory::PublicBehavior, |(category, _)| *category)
}

/// Category for etiquette queries, `None` for everything else
#[must_use]
pub fn detect(query: &str) -> Option<EtiquetteCategory> {
    is_etiquette_query(query).then(|| categorize(query))
}
