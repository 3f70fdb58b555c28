//! Line clustering and in-line ordering of detected cells.
//!
//! Cells are clustered into rows by vertical proximity alone: sort by top
//! edge, then cut wherever the jump between consecutive tops exceeds a
//! fraction of the average cell height. Skewed or rotated pages are not
//! modelled; a tilted row simply splits or merges.
//!
//! ```text
//! Detection[]  ->  sort by y1  ->  split on gaps  ->  sort each run by x1  ->  Line[]
//! ```

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cell::{BoundingBox, CellLabel, Detection};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// A new line starts when the gap between consecutive tops exceeds this
/// multiple of the average cell height.
pub const LINE_BREAK_FACTOR: f32 = 0.6;

/// Gap (in pixels) used instead when the average height is zero.
pub const FALLBACK_LINE_GAP: f32 = 10.0;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Cells judged to sit on the same row, ordered left to right by `x1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// 0-based position of the line in top-to-bottom order.
    pub index: usize,
    pub cells: Vec<Detection>,
}

impl Line {
    /// Representative top edge: the smallest `y1` among the cells.
    pub fn top(&self) -> f32 {
        self.cells
            .iter()
            .map(|d| d.geometry().y1)
            .fold(f32::INFINITY, f32::min)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Per-cell layout record persisted alongside a document's artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    /// 1-based reading order across the whole document.
    pub order: usize,
    /// Index of the [`Line`] the cell was placed on.
    pub row: usize,
    /// Index the cell carried when it was detected.
    pub detection: usize,
    pub label: CellLabel,
    #[serde(rename = "box", default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

fn cmp_f32(a: f32, b: f32) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Average of `y2 - y1` over all detections; 0 when there are none.
pub fn average_height(detections: &[Detection]) -> f32 {
    if detections.is_empty() {
        return 0.0;
    }
    let total: f32 = detections.iter().map(|d| d.geometry().height()).sum();
    total / detections.len() as f32
}

/// Gap between consecutive tops above which a new line begins.
pub fn line_break_gap(avg_height: f32) -> f32 {
    if avg_height > 0.0 {
        avg_height * LINE_BREAK_FACTOR
    } else {
        FALLBACK_LINE_GAP
    }
}

/// Cluster detections into lines ordered top to bottom, each ordered left
/// to right.
///
/// Both sorts are stable, so equal `y1` (or equal `x1`) keep their input
/// order. An empty input yields no lines.
pub fn group_into_lines(mut detections: Vec<Detection>) -> Vec<Line> {
    if detections.is_empty() {
        return Vec::new();
    }

    detections.sort_by(|a, b| cmp_f32(a.geometry().y1, b.geometry().y1));

    let break_gap = line_break_gap(average_height(&detections));
    log::debug!(
        "grouping {} cells into lines (break gap {:.2})",
        detections.len(),
        break_gap
    );

    let mut runs: Vec<Vec<Detection>> = Vec::new();
    let mut current: Vec<Detection> = Vec::new();
    let mut prev_top: Option<f32> = None;

    for detection in detections {
        let top = detection.geometry().y1;
        if let Some(prev) = prev_top {
            if top - prev > break_gap {
                runs.push(std::mem::take(&mut current));
            }
        }
        prev_top = Some(top);
        current.push(detection);
    }
    if !current.is_empty() {
        runs.push(current);
    }

    runs.into_iter()
        .enumerate()
        .map(|(index, mut cells)| {
            cells.sort_by(|a, b| cmp_f32(a.geometry().x1, b.geometry().x1));
            Line { index, cells }
        })
        .collect()
}

/// Flatten lines into per-cell records in reading order.
pub fn cell_records(lines: &[Line]) -> Vec<CellRecord> {
    lines
        .iter()
        .flat_map(|line| line.cells.iter().map(move |d| (line.index, d)))
        .enumerate()
        .map(|(i, (row, d))| CellRecord {
            order: i + 1,
            row,
            detection: d.index,
            label: d.label,
            bbox: d.bbox,
        })
        .collect()
}
