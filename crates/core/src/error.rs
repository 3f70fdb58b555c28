use thiserror::Error;

/// Failures the core can report. Per-document processing never returns
/// these; they come from parsing inputs and loading language data.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid dot pattern: {0:?}")]
    InvalidDotPattern(String),

    #[error("Invalid correction table for {language}: {message}")]
    Corrections { language: String, message: String },

    #[error("Failed to compile pattern set: {0}")]
    Patterns(String),

    #[error("Invalid document: {0}")]
    Document(String),

    #[error("Unsupported grade: {0}")]
    Grade(u8),
}
