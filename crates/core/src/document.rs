//! The per-document pipeline: detections in, every artifact out.
//!
//! One call runs layout, spacing, assembly and decoding in order and keeps
//! each intermediate result on the returned [`DocumentResult`]. Nothing here
//! fails: a page with no cells is a valid empty document and per-cell
//! problems are reported as [`Diagnostic`]s.

use serde::{Deserialize, Serialize};

use crate::assemble::{assemble, SymbolSequence};
use crate::cell::{BoundingBox, CellLabel, Detection};
use crate::diagnostic::Diagnostic;
use crate::language::{Grade, Language, Registry};
use crate::layout::{cell_records, group_into_lines, CellRecord};
use crate::spacing::{estimate_threshold, DEFAULT_SPACING_FACTOR};
use crate::transcribe::Transcriber;
use crate::CoreError;

/// Knobs for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Language name; unknown names fall back to [`Language::DEFAULT`].
    pub language: String,
    pub grade: Grade,
    /// Multiplier applied to the mean cell width. Not range-checked here.
    pub space_factor: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            language: Language::DEFAULT.to_string(),
            grade: Grade::default(),
            space_factor: DEFAULT_SPACING_FACTOR,
        }
    }
}

/// Everything derived from one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentResult {
    pub records: Vec<CellRecord>,
    /// Labels in reading order.
    pub labels: Vec<CellLabel>,
    pub braille: SymbolSequence,
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
    pub language: Language,
    pub grade: Grade,
    pub threshold: f32,
}

impl DocumentResult {
    /// Labels one per line, as written to `predictions.txt`.
    pub fn predictions(&self) -> String {
        self.labels
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn transcribe_document(
    detections: Vec<Detection>,
    config: &PipelineConfig,
    registry: &Registry,
) -> DocumentResult {
    let resolved = registry.resolve(&config.language, config.grade);
    let strategy = resolved.strategy;
    let mut diagnostics: Vec<Diagnostic> = resolved.fallback.into_iter().collect();

    let widths: Vec<f32> = detections
        .iter()
        .filter_map(|d| d.bbox.as_ref().map(BoundingBox::width))
        .collect();
    let threshold = estimate_threshold(&widths, config.space_factor);

    let lines = group_into_lines(detections);
    let records = cell_records(&lines);
    diagnostics.extend(
        records
            .iter()
            .filter(|r| r.label.is_unknown())
            .map(|r| Diagnostic::UnknownCell { order: r.order }),
    );

    let braille = assemble(
        &lines,
        Detection::symbol,
        threshold,
        strategy.dictionary().space(),
    );
    let transcription = strategy.decode(braille.as_str());
    diagnostics.extend(transcription.diagnostics);

    log::debug!(
        "{} cells, {} lines, threshold {:.2}, {} symbols, {} diagnostics",
        records.len(),
        lines.len(),
        threshold,
        braille.len(),
        diagnostics.len()
    );

    DocumentResult {
        labels: records.iter().map(|r| r.label).collect(),
        records,
        braille,
        text: transcription.text,
        diagnostics,
        language: strategy.language(),
        grade: strategy.grade(),
        threshold,
    }
}

#[derive(Debug, Deserialize)]
struct RawDetection {
    label: CellLabel,
    #[serde(rename = "box", default)]
    bbox: Option<BoundingBox>,
    #[serde(default)]
    index: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDocument {
    Wrapped { detections: Vec<RawDetection> },
    Bare(Vec<RawDetection>),
}

/// Parse a detection document: either `{"detections": [...]}` or a bare
/// array. Entries without an `index` get their position in the array.
pub fn parse_detections(src: &str) -> Result<Vec<Detection>, CoreError> {
    let raw: RawDocument =
        serde_json::from_str(src).map_err(|e| CoreError::Document(e.to_string()))?;
    let raw = match raw {
        RawDocument::Wrapped { detections } => detections,
        RawDocument::Bare(detections) => detections,
    };

    Ok(raw
        .into_iter()
        .enumerate()
        .map(|(position, d)| Detection {
            index: d.index.unwrap_or(position),
            label: d.label,
            bbox: d.bbox,
        })
        .collect())
}
