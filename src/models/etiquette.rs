//! Cultural etiquette categories and the structured record extracted from answers

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Closed set of etiquette topics, in detection priority order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum EtiquetteCategory {
    DressCode,
    Greetings,
    ReligiousCustoms,
    Dining,
    PublicBehavior,
    Business,
    HomeVisits,
    GenderInteractions,
}

impl EtiquetteCategory {
    /// All categories; earlier entries win when a query matches several
    pub const ALL: [EtiquetteCategory; 8] = [
        EtiquetteCategory::DressCode,
        EtiquetteCategory::Greetings,
        EtiquetteCategory::ReligiousCustoms,
        EtiquetteCategory::Dining,
        EtiquetteCategory::PublicBehavior,
        EtiquetteCategory::Business,
        EtiquetteCategory::HomeVisits,
        EtiquetteCategory::GenderInteractions,
    ];

    /// Stable identifier used on the wire
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            EtiquetteCategory::DressCode => "dress-code",
            EtiquetteCategory::Greetings => "greetings",
            EtiquetteCategory::ReligiousCustoms => "religious-customs",
            EtiquetteCategory::Dining => "dining",
            EtiquetteCategory::PublicBehavior => "public-behavior",
            EtiquetteCategory::Business => "business",
            EtiquetteCategory::HomeVisits => "home-visits",
            EtiquetteCategory::GenderInteractions => "gender-interactions",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            EtiquetteCategory::DressCode => "Dress Code",
            EtiquetteCategory::Greetings => "Greetings & Gestures",
            EtiquetteCategory::ReligiousCustoms => "Religious Customs",
            EtiquetteCategory::Dining => "Dining Etiquette",
            EtiquetteCategory::PublicBehavior => "Public Behavior",
            EtiquetteCategory::Business => "Business Etiquette",
            EtiquetteCategory::HomeVisits => "Home Visits",
            EtiquetteCategory::GenderInteractions => "Gender Interactions",
        }
    }
}

impl Display for EtiquetteCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Etiquette guidance parsed out of a generated answer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EtiquetteRecord {
    pub category: EtiquetteCategory,
    pub advice: String,
    #[serde(rename = "additional_info")]
    pub additional: Option<String>,
    #[serde(rename = "do_tips")]
    pub dos: Option<Vec<String>>,
    #[serde(rename = "dont_tips")]
    pub donts: Option<Vec<String>>,
}
