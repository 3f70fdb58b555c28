//! Braille to text and back.
//!
//! Decoding is a small state machine over the symbol sequence:
//!
//! ```text
//!            capital sign                 letter / contraction
//!   Normal ---------------> CapitalPending ---------------------> Normal
//!     |  ^                        |
//!     |  | non-digit              | numeric sign (pending capital dropped)
//!     v  |                        v
//!   NumericRun <-------------------
//! ```
//!
//! Punctuation never consumes a pending capital. Ignored symbols are skipped
//! without touching the state. Anything without a mapping is copied through
//! and reported as a [`Diagnostic`].

use std::collections::BTreeMap;

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::assemble::SymbolSequence;
use crate::cell::UNKNOWN_SYMBOL;
use crate::diagnostic::Diagnostic;
use crate::language::corrections::capitalize;
use crate::language::{CorrectionTable, Grade, Language, LanguageDictionary};

/// Decoded text and whatever could not be mapped along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transcription {
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Encoded braille and whatever could not be mapped along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Encoding {
    pub braille: SymbolSequence,
    pub diagnostics: Vec<Diagnostic>,
}

/// Anything that can move between braille and a written language.
pub trait Transcriber {
    fn decode(&self, sequence: &str) -> Transcription;
    fn encode(&self, text: &str) -> Encoding;
}

/// A dictionary plus its optional correction table.
#[derive(Debug, Clone)]
pub struct Strategy {
    dictionary: LanguageDictionary,
    corrections: Option<CorrectionTable>,
}

impl Strategy {
    pub fn new(dictionary: LanguageDictionary, corrections: Option<CorrectionTable>) -> Self {
        Self {
            dictionary,
            corrections,
        }
    }

    pub fn language(&self) -> Language {
        self.dictionary.language()
    }

    pub fn grade(&self) -> Grade {
        self.dictionary.grade()
    }

    pub fn dictionary(&self) -> &LanguageDictionary {
        &self.dictionary
    }

    pub fn corrections(&self) -> Option<&CorrectionTable> {
        self.corrections.as_ref()
    }

    pub(crate) fn set_corrections(&mut self, corrections: Option<CorrectionTable>) {
        self.corrections = corrections;
    }
}

impl Transcriber for Strategy {
    fn decode(&self, sequence: &str) -> Transcription {
        braille_to_text(sequence, &self.dictionary, self.corrections.as_ref())
    }

    fn encode(&self, text: &str) -> Encoding {
        text_to_braille(text, &self.dictionary)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    Normal,
    CapitalPending,
    NumericRun,
}

/// Decode `sequence` with `dictionary`, then run `corrections` over the
/// result when given.
pub fn braille_to_text(
    sequence: &str,
    dictionary: &LanguageDictionary,
    corrections: Option<&CorrectionTable>,
) -> Transcription {
    let symbols: Vec<char> = sequence.chars().collect();
    let contractions: BTreeMap<usize, (usize, String)> = dictionary
        .contractions()
        .find_longest_nonoverlapping_matches(sequence)
        .into_iter()
        .map(|m| (m.start, (m.end, m.value)))
        .collect();

    let mut text = String::with_capacity(sequence.len());
    let mut diagnostics = Vec::new();
    let mut state = DecodeState::Normal;
    let mut i = 0;

    while i < symbols.len() {
        let symbol = symbols[i];

        if dictionary.is_ignored(symbol) {
            i += 1;
            continue;
        }

        if state == DecodeState::NumericRun {
            if let Some(digit) = dictionary.digit_for(symbol) {
                text.push(digit);
                i += 1;
                continue;
            }
            state = DecodeState::Normal;
        }

        if dictionary.capital() == Some(symbol) {
            state = DecodeState::CapitalPending;
        } else if symbol == dictionary.numeric() {
            state = DecodeState::NumericRun;
        } else if let Some((end, value)) = contractions.get(&i) {
            if state == DecodeState::CapitalPending {
                text.push_str(&capitalize(value));
            } else {
                text.push_str(value);
            }
            state = DecodeState::Normal;
            i = end + 1;
            continue;
        } else if let Some(grapheme) = dictionary.grapheme_for(symbol) {
            if state == DecodeState::CapitalPending {
                text.push_str(&capitalize(grapheme));
            } else {
                text.push_str(grapheme);
            }
            state = DecodeState::Normal;
        } else if let Some(ch) = dictionary.punctuation_for(symbol) {
            text.push(ch);
        } else {
            // Unknown cells are reported once, by the document pipeline.
            if !symbol.is_whitespace() && symbol != UNKNOWN_SYMBOL {
                log::info!("No {} mapping for {symbol:?} at {i}", dictionary.language());
                diagnostics.push(Diagnostic::UnmappedSymbol {
                    position: i,
                    symbol,
                });
            }
            text.push(symbol);
        }

        i += 1;
    }

    let text = text.trim();
    let text = match corrections {
        Some(table) => table.apply(text),
        None => text.to_string(),
    };

    Transcription { text, diagnostics }
}

/// Encode `text` with `dictionary`. Contractions are never produced.
pub fn text_to_braille(text: &str, dictionary: &LanguageDictionary) -> Encoding {
    let text: String = text.nfc().collect();

    let mut braille = String::with_capacity(text.len() * 3);
    let mut diagnostics = Vec::new();
    let mut prev: Option<char> = None;

    for (position, ch) in text.chars().enumerate() {
        let lowered = match dictionary.capital() {
            Some(capital) if ch.is_uppercase() => {
                braille.push(capital);
                ch.to_lowercase().collect::<String>()
            }
            _ => ch.to_string(),
        };

        let symbol = if ch.is_ascii_digit() {
            dictionary.symbol_for_digit(ch).map(|symbol| {
                if !prev.is_some_and(|p| p.is_ascii_digit()) {
                    braille.push(dictionary.numeric());
                }
                symbol
            })
        } else {
            dictionary
                .symbol_for_grapheme(&lowered)
                .or_else(|| dictionary.symbol_for_punctuation(ch))
        };

        match symbol {
            Some(symbol) => braille.push(symbol),
            None => {
                if !ch.is_whitespace() {
                    log::info!("No {} mapping for {ch:?} at {position}", dictionary.language());
                    diagnostics.push(Diagnostic::UnmappedCharacter {
                        position,
                        character: ch,
                    });
                }
                braille.push_str(&lowered);
            }
        }

        prev = Some(ch);
    }

    Encoding {
        braille: SymbolSequence::new(braille),
        diagnostics,
    }
}
