//! Word-level post-correction tables.
//!
//! A table is loaded from TOML and applied to decoded text one
//! whitespace-delimited word at a time. It only knows about words it was
//! given; anything else passes through with stray braille punctuation
//! normalized.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::CoreError;

use super::Language;

/// Table shipped for Russian, where classifier confusions are common enough
/// to warrant one.
pub const RUSSIAN: &str = include_str!("../../data/corrections/russian.toml");

/// Picks the mark re-appended to a corrected word.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PunctuationRule {
    pub markers: Vec<String>,
    pub mark: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTable {
    #[serde(default)]
    strip: String,
    #[serde(default)]
    remove: String,
    #[serde(default)]
    normalize: BTreeMap<String, String>,
    #[serde(default)]
    punctuation: Vec<PunctuationRule>,
    #[serde(default)]
    words: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrectionTable {
    strip: Vec<char>,
    remove: Vec<char>,
    normalize: BTreeMap<char, String>,
    punctuation: Vec<PunctuationRule>,
    words: BTreeMap<String, String>,
}

impl CorrectionTable {
    pub fn from_toml(language: Language, src: &str) -> Result<Self, CoreError> {
        let invalid = |message: String| CoreError::Corrections {
            language: language.to_string(),
            message,
        };

        let raw: RawTable = toml::from_str(src).map_err(|e| invalid(e.to_string()))?;

        let mut normalize = BTreeMap::new();
        for (key, replacement) in raw.normalize {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(symbol), None) => {
                    normalize.insert(symbol, replacement);
                }
                _ => {
                    return Err(invalid(format!(
                        "normalize keys must be a single character, got {key:?}"
                    )))
                }
            }
        }

        let words = raw
            .words
            .into_iter()
            .map(|(misread, corrected)| (misread.to_lowercase(), corrected))
            .collect();

        Ok(Self {
            strip: raw.strip.chars().collect(),
            remove: raw.remove.chars().collect(),
            normalize,
            punctuation: raw.punctuation,
            words,
        })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Correct every word of `text` and join the survivors with single spaces.
    pub fn apply(&self, text: &str) -> String {
        text.split_whitespace()
            .filter_map(|word| self.correct_word(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn correct_word(&self, word: &str) -> Option<String> {
        let stripped = word.trim_matches(|c| self.strip.contains(&c));
        let key: String = stripped
            .chars()
            .filter(|c| !self.remove.contains(c))
            .collect::<String>()
            .to_lowercase();

        let Some(corrected) = self.words.get(&key) else {
            let normalized = self.normalize_word(word);
            return (!normalized.is_empty()).then_some(normalized);
        };

        if corrected.is_empty() {
            log::debug!("Dropping {word:?}");
            return None;
        }

        let mut out = if word.chars().next().is_some_and(char::is_uppercase) {
            capitalize(corrected)
        } else {
            corrected.clone()
        };

        let trailing = &word[word
            .trim_end_matches(|c| self.strip.contains(&c))
            .len()..];
        if let Some(rule) = self
            .punctuation
            .iter()
            .find(|rule| rule.markers.iter().any(|m| trailing.contains(m.as_str())))
        {
            out.push_str(&rule.mark);
        }

        Some(out)
    }

    fn normalize_word(&self, word: &str) -> String {
        word.chars()
            .fold(String::with_capacity(word.len()), |mut out, c| {
                match self.normalize.get(&c) {
                    Some(replacement) => out.push_str(replacement),
                    None => out.push(c),
                }
                out
            })
    }
}

/// Upper-case the first character, leave the rest alone.
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn russian() -> CorrectionTable {
        CorrectionTable::from_toml(Language::Russian, RUSSIAN).unwrap()
    }

    #[test]
    fn test_builtin_russian_table_parses() {
        let table = russian();
        assert!(table.len() > 30);
        assert_eq!(table.apply("сергеевия"), "сергеевич");
    }

    #[test]
    fn test_capitalization_is_restored() {
        assert_eq!(russian().apply("Ивановия"), "Иванович");
    }

    #[test]
    fn test_trailing_braille_punctuation_becomes_plain() {
        let table = russian();
        assert_eq!(table.apply("прячка⠲"), "прачка.");
        assert_eq!(table.apply("слуяа⠖"), "слуга!");
        assert_eq!(table.apply("слуяи,"), "слуги,");
    }

    #[test]
    fn test_sentence_end_wins_over_comma() {
        assert_eq!(russian().apply("бэло,⠲"), "было.");
    }

    #[test]
    fn test_empty_correction_drops_word() {
        assert_eq!(russian().apply("она ёёё ушла"), "она ушла");
    }

    #[test]
    fn test_unknown_words_are_normalized() {
        let table = russian();
        assert_eq!(table.apply("дом⠲"), "дом.");
        assert_eq!(table.apply("кто⠢"), "кто?");
        assert_eq!(table.apply("а ⠔ б"), "а б");
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        assert_eq!(russian().apply("  да   нет "), "да нет");
    }

    #[test]
    fn test_custom_table() {
        let src = r#"
            strip = "."
            [[punctuation]]
            markers = ["."]
            mark = "."
            [words]
            teh = "the"
        "#;
        let table = CorrectionTable::from_toml(Language::English, src).unwrap();
        assert_eq!(table.apply("Teh cat."), "The cat.");
        assert_eq!(table.apply("teh."), "the.");
    }

    #[test]
    fn test_invalid_tables_are_rejected() {
        assert!(matches!(
            CorrectionTable::from_toml(Language::Russian, "words = 3"),
            Err(CoreError::Corrections { .. })
        ));
        assert!(CorrectionTable::from_toml(Language::Russian, "[normalize]\nab = \"x\"").is_err());
        assert!(CorrectionTable::from_toml(Language::Russian, "unknown = 1").is_err());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("ёлка"), "Ёлка");
        assert_eq!(capitalize(""), "");
    }
}
