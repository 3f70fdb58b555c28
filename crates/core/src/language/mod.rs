//! Supported languages, their braille dictionaries, and the registry that
//! hands out a ready-to-use strategy per `(language, grade)`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

pub(crate) mod alphabets;
pub mod corrections;
pub mod dictionary;
pub mod registry;

pub use corrections::{CorrectionTable, PunctuationRule};
pub use dictionary::{DictionaryBuilder, LanguageDictionary};
pub use registry::{Registry, Resolved};

/// Closed set of languages with a built-in dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    French,
    Arabic,
    Russian,
}

impl Language {
    /// Used when a requested name is not recognized.
    pub const DEFAULT: Language = Language::English;

    pub const ALL: [Language; 4] = [
        Language::English,
        Language::French,
        Language::Arabic,
        Language::Russian,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::French => "french",
            Language::Arabic => "arabic",
            Language::Russian => "russian",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Language> {
        let name = name.trim();
        Language::ALL
            .into_iter()
            .find(|lang| lang.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_name(s).ok_or_else(|| format!("Unknown language: {s}"))
    }
}

/// Transcription convention. Grade 2 is an extension point: only English
/// defines extra multi-cell rules for it; other languages reuse grade 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Grade {
    #[default]
    One,
    Two,
}

impl TryFrom<u8> for Grade {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Grade::One),
            2 => Ok(Grade::Two),
            other => Err(CoreError::Grade(other)),
        }
    }
}

impl From<Grade> for u8 {
    fn from(grade: Grade) -> Self {
        match grade {
            Grade::One => 1,
            Grade::Two => 2,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "grade {}", u8::from(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_lookup_is_case_insensitive() {
        assert_eq!(Language::from_name("Russian"), Some(Language::Russian));
        assert_eq!(Language::from_name("FRENCH"), Some(Language::French));
        assert_eq!(Language::from_name(" arabic "), Some(Language::Arabic));
        assert_eq!(Language::from_name("klingon"), None);
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("English".parse::<Language>().unwrap(), Language::English);
        assert!("".parse::<Language>().is_err());
    }

    #[test]
    fn test_grade_conversions() {
        assert_eq!(Grade::try_from(1).unwrap(), Grade::One);
        assert_eq!(Grade::try_from(2).unwrap(), Grade::Two);
        assert!(Grade::try_from(3).is_err());
        assert_eq!(u8::from(Grade::Two), 2);
        assert_eq!(Grade::default(), Grade::One);
    }

    #[test]
    fn test_grade_serde_as_number() {
        assert_eq!(serde_json::to_string(&Grade::Two).unwrap(), "2");
        assert_eq!(serde_json::from_str::<Grade>("1").unwrap(), Grade::One);
        assert!(serde_json::from_str::<Grade>("4").is_err());
    }
}
