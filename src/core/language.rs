//! Source-language detection by Unicode script ranges.

use std::{fmt, ops::RangeInclusive};

const HANGUL_SYLLABLES: RangeInclusive<char> = '\u{AC00}'..='\u{D7A3}';
const HIRAGANA: RangeInclusive<char> = '\u{3040}'..='\u{309F}';
const KATAKANA: RangeInclusive<char> = '\u{30A0}'..='\u{30FF}';
const CJK_UNIFIED: RangeInclusive<char> = '\u{4E00}'..='\u{9FFF}';

/// Languages whose text can be detected in source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Ko,
    Ja,
    Zh,
    En,
}

impl Language {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ko" => Some(Language::Ko),
            "ja" => Some(Language::Ja),
            "zh" => Some(Language::Zh),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::Ja => "ja",
            Language::Zh => "zh",
            Language::En => "en",
        }
    }

    fn matches_char(self, c: char) -> bool {
        match self {
            Language::Ko => HANGUL_SYLLABLES.contains(&c),
            Language::Ja => {
                HIRAGANA.contains(&c) || KATAKANA.contains(&c) || CJK_UNIFIED.contains(&c)
            }
            Language::Zh => CJK_UNIFIED.contains(&c),
            Language::En => c.is_ascii_alphabetic(),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Answers whether a piece of text contains the configured source language.
///
/// A classifier without a language never matches, so an unknown language
/// code results in a run that transforms nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classifier {
    language: Option<Language>,
}

impl Classifier {
    pub fn new(language: Language) -> Self {
        Self {
            language: Some(language),
        }
    }

    /// Build a classifier from a language code such as `"ko"`.
    pub fn for_code(code: &str) -> Self {
        Self {
            language: Language::from_code(code),
        }
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn contains_target_language(&self, text: &str) -> bool {
        match self.language {
            Some(language) => text.chars().any(|c| language.matches_char(c)),
            None => false,
        }
    }
}
