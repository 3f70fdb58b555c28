use serde::{Deserialize, Serialize};

/// Soft failure attached to a result instead of aborting the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A cell the classifier could not label, by 1-based reading order.
    UnknownCell { order: usize },
    /// A symbol with no mapping, passed through unchanged during decode.
    UnmappedSymbol { position: usize, symbol: char },
    /// A character with no mapping, passed through unchanged during encode.
    UnmappedCharacter { position: usize, character: char },
    /// The requested language was not recognized.
    LanguageFallback { requested: String, resolved: String },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnknownCell { order } => write!(f, "cell {order} could not be classified"),
            Diagnostic::UnmappedSymbol { position, symbol } => {
                write!(f, "no mapping for symbol {symbol:?} at position {position}")
            }
            Diagnostic::UnmappedCharacter {
                position,
                character,
            } => write!(
                f,
                "no mapping for character {character:?} at position {position}"
            ),
            Diagnostic::LanguageFallback {
                requested,
                resolved,
            } => write!(f, "unknown language {requested:?}, using {resolved}"),
        }
    }
}
