//! Response language selection
//!
//! Browsers send region-qualified tags (`en-US`, `zh_CN`); only the primary
//! subtag matters. Anything unsupported falls back to English.

use std::fmt::Display;

/// Languages the assistant can answer in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Arabic,
    Chinese,
    Russian,
    Hindi,
    French,
}

impl Language {
    /// Map a language tag to a supported language
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match primary.as_str() {
            "en" => Language::English,
            "ar" => Language::Arabic,
            "zh" => Language::Chinese,
            "ru" => Language::Russian,
            "hi" => Language::Hindi,
            "fr" => Language::French,
            _ => Language::default(),
        }
    }

    /// Two-letter ISO 639-1 code
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Arabic => "ar",
            Language::Chinese => "zh",
            Language::Russian => "ru",
            Language::Hindi => "hi",
            Language::French => "fr",
        }
    }

    /// Instruction appended to system prompts to steer the output language
    #[must_use]
    pub fn directive(self) -> &'static str {
        match self {
            Language::English => "Respond in English.",
            Language::Arabic => "Respond in Arabic (العربية).",
            Language::Chinese => "Respond in Chinese (简体中文).",
            Language::Russian => "Respond in Russian (русский).",
            Language::Hindi => "Respond in Hindi (हिन्दी).",
            Language::French => "Respond in French (Français).",
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
