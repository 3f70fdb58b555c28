//! Turning ordered lines into one braille symbol sequence per document.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell::Detection;
use crate::layout::Line;

/// Separator emitted after every line.
pub const LINE_BREAK: char = ' ';

/// Braille symbols of a document in reading order, with inserted word spaces
/// and line separators. Built once by [`assemble`] and never edited.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolSequence(String);

impl SymbolSequence {
    pub fn new(symbols: impl Into<String>) -> Self {
        SymbolSequence(symbols.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn symbols(&self) -> Vec<char> {
        self.0.chars().collect()
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SymbolSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SymbolSequence {
    fn from(s: &str) -> Self {
        SymbolSequence(s.to_string())
    }
}

/// Walk `lines` in order and build the document's symbol sequence.
///
/// Within a line a `word_space` is inserted whenever
/// `current.x1 - previous.x2 > threshold`. Every line is followed by
/// [`LINE_BREAK`]; leading and trailing line breaks are trimmed at the end.
///
/// A cell with no box contributes its symbol without a gap check and does
/// not move the right edge the next gap is measured from.
pub fn assemble<F>(lines: &[Line], symbol_of: F, threshold: f32, word_space: char) -> SymbolSequence
where
    F: Fn(&Detection) -> char,
{
    let mut out = String::new();

    for line in lines {
        let mut prev_right: Option<f32> = None;
        for detection in &line.cells {
            if let Some(bbox) = detection.bbox {
                if let Some(right) = prev_right {
                    if bbox.x1 - right > threshold {
                        out.push(word_space);
                    }
                }
                prev_right = Some(bbox.x2);
            }
            out.push(symbol_of(detection));
        }
        out.push(LINE_BREAK);
    }

    SymbolSequence(out.trim_matches(LINE_BREAK).to_string())
}
