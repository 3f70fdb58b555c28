//! Core library for braillist
//!
//! This crate is the **Functional Core** of braillist: it turns classified
//! braille cells into reading-ordered symbol sequences and transcribes them
//! to and from text. It performs no I/O. The `braillist` binary owns files,
//! configuration and concurrency.
//!
//! # Pipeline
//!
//! ```text
//! Detection[] ──► layout::group_into_lines ──► Line[]
//!                    spacing::estimate_threshold ──► threshold
//! Line[] + threshold ──► assemble::assemble ──► SymbolSequence
//! SymbolSequence ──► transcribe::braille_to_text ──► text
//! ```
//!
//! [`document::transcribe_document`] runs the whole chain for one page and
//! keeps every intermediate artifact on its result.
//!
//! # Module Organization
//!
//! - [`cell`]: dot patterns, labels, boxes and detections
//! - [`layout`]: clustering cells into lines
//! - [`spacing`]: the word-gap threshold
//! - [`assemble`]: building the symbol sequence
//! - [`matcher`]: longest non-overlapping multi-symbol matches
//! - [`transcribe`]: the decode/encode state machine
//! - [`language`]: dictionaries, correction tables and the registry
//! - [`document`]: the per-document pipeline
//!
//! # Example Usage
//!
//! ```rust
//! use braillist_core::cell::{BoundingBox, CellLabel, Detection};
//! use braillist_core::document::{transcribe_document, PipelineConfig};
//! use braillist_core::language::Registry;
//!
//! let detections = vec![
//!     Detection::new(0, CellLabel::parse("6").unwrap(), BoundingBox::new(0.0, 0.0, 10.0, 15.0)),
//!     Detection::new(1, CellLabel::parse("1").unwrap(), BoundingBox::new(11.0, 0.0, 21.0, 15.0)),
//! ];
//!
//! let result = transcribe_document(detections, &PipelineConfig::default(), Registry::global());
//! assert_eq!(result.braille.as_str(), "⠠⠁");
//! assert_eq!(result.text, "A");
//! ```

pub mod assemble;
pub mod cell;
pub mod diagnostic;
pub mod document;
pub mod error;
pub mod language;
pub mod layout;
pub mod matcher;
pub mod spacing;
pub mod transcribe;

pub use diagnostic::Diagnostic;
pub use error::CoreError;
