// src/language.rs
use std::ops::RangeInclusive;

const ARABIC_BLOCK: RangeInclusive<char> = '\u{0600}'..='\u{06FF}';

/// Common French function words and catalogue nouns. Matched as plain
/// substrings, so short English keywords can be misread as French; the list
/// and the rule order stay as they are so classifications don't shift.
const FRENCH_MARKERS: &[&str] = &[
    "de", "le", "la", "les", "du", "des", "pour", "avec", "coque", "étui",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Arabic,
    French,
    English,
}

impl Language {
    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Language::Arabic => "ar",
            Language::French => "fr",
            Language::English => "en",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::Arabic => "Arabic",
            Language::French => "French",
            Language::English => "English",
        }
    }

    /// Storefront a keyword in this language is searched on
    pub fn marketplace(&self) -> &'static str {
        match self {
            Language::Arabic => "https://www.amazon.sa",
            Language::French => "https://www.amazon.fr",
            Language::English => "https://www.amazon.com",
        }
    }
}

/// Classify a search keyword: Arabic script wins, then French markers,
/// and anything else is English.
pub fn detect_language(text: &str) -> Language {
    if text.chars().any(|c| ARABIC_BLOCK.contains(&c)) {
        return Language::Arabic;
    }

    let lowered = text.to_lowercase();
    if FRENCH_MARKERS.iter().any(|word| lowered.contains(word)) {
        return Language::French;
    }

    Language::English
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_arabic() {
        assert_eq!(detect_language("هاتف ذكي"), Language::Arabic);
    }

    #[test]
    fn test_arabic_takes_precedence() {
        // contains both a French marker and Arabic script
        assert_eq!(detect_language("coque هاتف"), Language::Arabic);
    }

    #[test]
    fn test_detects_french() {
        assert_eq!(detect_language("coque iPhone"), Language::French);
        assert_eq!(detect_language("ÉTUI cuir"), Language::French);
        assert_eq!(detect_language("Chaussures POUR homme"), Language::French);
    }

    #[test]
    fn test_defaults_to_english() {
        assert_eq!(detect_language("smart watch"), Language::English);
        assert_eq!(detect_language(""), Language::English);
        assert_eq!(detect_language("the"), Language::English);
    }

    #[test]
    fn test_substring_false_positive_is_kept() {
        // "leather" contains "le"
        assert_eq!(detect_language("leather wallet"), Language::French);
    }

    #[test]
    fn test_marketplace_per_language() {
        assert_eq!(Language::Arabic.marketplace(), "https://www.amazon.sa");
        assert_eq!(Language::French.code(), "fr");
        assert_eq!(Language::English.marketplace(), "https://www.amazon.com");
    }
}
