//! Per-language symbol tables.
//!
//! A dictionary is plain data: three two-way maps (letters, digits,
//! punctuation) plus the reserved control symbols and any multi-cell rules.
//! It is built once and only read afterwards.

use std::collections::BTreeMap;

use crate::matcher::PatternSet;
use crate::CoreError;

use super::{Grade, Language};

/// Blank cell; the word space in every built-in table.
pub const BRAILLE_SPACE: char = '\u{2800}';

#[derive(Debug, Clone)]
pub struct LanguageDictionary {
    language: Language,
    grade: Grade,
    capital: Option<char>,
    numeric: char,
    ignore: Vec<char>,
    letters: BTreeMap<String, char>,
    letter_symbols: BTreeMap<char, String>,
    digits: BTreeMap<char, char>,
    digit_symbols: BTreeMap<char, char>,
    punctuation: BTreeMap<char, char>,
    punctuation_symbols: BTreeMap<char, char>,
    contractions: PatternSet<String>,
}

impl LanguageDictionary {
    pub fn builder(language: Language, grade: Grade) -> DictionaryBuilder {
        DictionaryBuilder {
            language,
            grade,
            capital: None,
            numeric: '⠼',
            ignore: Vec::new(),
            letters: Vec::new(),
            digits: Vec::new(),
            punctuation: Vec::new(),
            contractions: Vec::new(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    /// Capitalization indicator, if the script has case.
    pub fn capital(&self) -> Option<char> {
        self.capital
    }

    pub fn numeric(&self) -> char {
        self.numeric
    }

    /// Symbol standing for a word space.
    pub fn space(&self) -> char {
        self.punctuation.get(&' ').copied().unwrap_or(BRAILLE_SPACE)
    }

    pub fn is_ignored(&self, symbol: char) -> bool {
        self.ignore.contains(&symbol)
    }

    pub fn ignored(&self) -> &[char] {
        &self.ignore
    }

    pub fn grapheme_for(&self, symbol: char) -> Option<&str> {
        self.letter_symbols.get(&symbol).map(String::as_str)
    }

    pub fn symbol_for_grapheme(&self, grapheme: &str) -> Option<char> {
        self.letters.get(grapheme).copied()
    }

    pub fn digit_for(&self, symbol: char) -> Option<char> {
        self.digit_symbols.get(&symbol).copied()
    }

    pub fn symbol_for_digit(&self, digit: char) -> Option<char> {
        self.digits.get(&digit).copied()
    }

    pub fn punctuation_for(&self, symbol: char) -> Option<char> {
        self.punctuation_symbols.get(&symbol).copied()
    }

    pub fn symbol_for_punctuation(&self, ch: char) -> Option<char> {
        self.punctuation.get(&ch).copied()
    }

    /// Multi-cell rules resolved with the longest-match policy on decode.
    pub fn contractions(&self) -> &PatternSet<String> {
        &self.contractions
    }

    pub fn letter_count(&self) -> usize {
        self.letters.len()
    }
}

/// Collects table entries; reverse maps are built in [`DictionaryBuilder::build`].
#[derive(Debug, Clone)]
pub struct DictionaryBuilder {
    language: Language,
    grade: Grade,
    capital: Option<char>,
    numeric: char,
    ignore: Vec<char>,
    letters: Vec<(String, char)>,
    digits: Vec<(char, char)>,
    punctuation: Vec<(char, char)>,
    contractions: Vec<(String, String)>,
}

impl DictionaryBuilder {
    pub fn capital(mut self, symbol: char) -> Self {
        self.capital = Some(symbol);
        self
    }

    pub fn numeric(mut self, symbol: char) -> Self {
        self.numeric = symbol;
        self
    }

    pub fn ignore(mut self, symbol: char) -> Self {
        self.ignore.push(symbol);
        self
    }

    pub fn letters(mut self, entries: &[(&str, char)]) -> Self {
        self.letters
            .extend(entries.iter().map(|(g, s)| (g.to_string(), *s)));
        self
    }

    pub fn digits(mut self, entries: &[(char, char)]) -> Self {
        self.digits.extend_from_slice(entries);
        self
    }

    pub fn punctuation(mut self, entries: &[(char, char)]) -> Self {
        self.punctuation.extend_from_slice(entries);
        self
    }

    pub fn contractions(mut self, entries: &[(&str, &str)]) -> Self {
        self.contractions
            .extend(entries.iter().map(|(p, v)| (p.to_string(), v.to_string())));
        self
    }

    /// Freeze the tables. When two entries share a symbol, the first one
    /// listed is the one decode produces.
    pub fn build(self) -> Result<LanguageDictionary, CoreError> {
        let mut letter_symbols = BTreeMap::new();
        for (grapheme, symbol) in &self.letters {
            letter_symbols
                .entry(*symbol)
                .or_insert_with(|| grapheme.clone());
        }

        let mut digit_symbols = BTreeMap::new();
        for (digit, symbol) in &self.digits {
            digit_symbols.entry(*symbol).or_insert(*digit);
        }

        let mut punctuation_symbols = BTreeMap::new();
        for (ch, symbol) in &self.punctuation {
            punctuation_symbols.entry(*symbol).or_insert(*ch);
        }

        let contractions = PatternSet::new(self.contractions)?;

        Ok(LanguageDictionary {
            language: self.language,
            grade: self.grade,
            capital: self.capital,
            numeric: self.numeric,
            ignore: self.ignore,
            letters: self.letters.into_iter().collect(),
            letter_symbols,
            digits: self.digits.into_iter().collect(),
            digit_symbols,
            punctuation: self.punctuation.into_iter().collect(),
            punctuation_symbols,
            contractions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> LanguageDictionary {
        LanguageDictionary::builder(Language::English, Grade::One)
            .capital('⠠')
            .letters(&[("a", '⠁'), ("b", '⠃'), ("á", '⠁')])
            .digits(&[('1', '⠁')])
            .punctuation(&[(' ', '⠀'), ('.', '⠲')])
            .contractions(&[("⠐⠞", "time")])
            .build()
            .unwrap()
    }

    #[test]
    fn test_lookups_both_directions() {
        let d = tiny();
        assert_eq!(d.grapheme_for('⠃'), Some("b"));
        assert_eq!(d.symbol_for_grapheme("b"), Some('⠃'));
        assert_eq!(d.digit_for('⠁'), Some('1'));
        assert_eq!(d.symbol_for_digit('1'), Some('⠁'));
        assert_eq!(d.punctuation_for('⠲'), Some('.'));
        assert_eq!(d.symbol_for_punctuation('.'), Some('⠲'));
        assert_eq!(d.grapheme_for('⠉'), None);
    }

    #[test]
    fn test_first_entry_wins_on_shared_symbol() {
        let d = tiny();
        assert_eq!(d.grapheme_for('⠁'), Some("a"));
        // Both graphemes still encode.
        assert_eq!(d.symbol_for_grapheme("á"), Some('⠁'));
    }

    #[test]
    fn test_defaults() {
        let d = LanguageDictionary::builder(Language::Arabic, Grade::One)
            .build()
            .unwrap();
        assert_eq!(d.capital(), None);
        assert_eq!(d.numeric(), '⠼');
        assert_eq!(d.space(), BRAILLE_SPACE);
        assert!(d.contractions().is_empty());
    }

    #[test]
    fn test_contractions_compiled() {
        assert_eq!(tiny().contractions().len(), 1);
    }
}
