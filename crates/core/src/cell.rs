//! Braille cells as they arrive from the upstream classifier.
//!
//! A [`Detection`] pairs a [`CellLabel`] with the pixel-space box it was
//! cropped from. Everything downstream (layout, spacing, assembly) only
//! reads these values; nothing here mutates a detection once built.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// First code point of the Unicode braille block (the blank cell).
pub const BRAILLE_BASE: u32 = 0x2800;

/// Symbol emitted for a cell the classifier could not label.
pub const UNKNOWN_SYMBOL: char = '?';

/// Label string used for an unclassifiable cell.
pub const UNKNOWN_LABEL: &str = "?";

/// Raised dots of a six-dot cell; bit `n - 1` is set when dot `n` is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DotPattern(u8);

impl DotPattern {
    /// Build a pattern from its raw bitmask. Bits above dot 6 are dropped.
    pub fn from_bits(bits: u8) -> Self {
        DotPattern(bits & 0b0011_1111)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Parse a digit string such as `"1246"`.
    ///
    /// Dots 7 and 8 are accepted but ignored (eight-dot labels collapse onto
    /// their six-dot core). Any other character is an error.
    pub fn parse(label: &str) -> Result<Self, CoreError> {
        let mut bits = 0u8;
        for ch in label.chars() {
            match ch {
                '1'..='6' => bits |= 1 << (ch as u8 - b'1'),
                '7' | '8' => {}
                _ => return Err(CoreError::InvalidDotPattern(label.to_string())),
            }
        }
        Ok(DotPattern(bits))
    }

    /// Recover the pattern from a six-dot braille code point.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        let offset = (symbol as u32).checked_sub(BRAILLE_BASE)?;
        if offset <= 0x3F {
            Some(DotPattern(offset as u8))
        } else {
            None
        }
    }

    pub fn to_symbol(&self) -> char {
        char::from_u32(BRAILLE_BASE + self.0 as u32).unwrap_or(UNKNOWN_SYMBOL)
    }

    pub fn is_blank(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for DotPattern {
    /// Canonical ascending digit string, e.g. `"1246"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for dot in 1..=6u8 {
            if self.0 & (1 << (dot - 1)) != 0 {
                write!(f, "{dot}")?;
            }
        }
        Ok(())
    }
}

/// Classification outcome for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellLabel {
    Dots(DotPattern),
    /// Upstream classification failed. Kept in place so positions stay
    /// aligned with the original boxes.
    Unknown,
}

impl CellLabel {
    /// Parse a classifier label. `"?"` and the empty string mean
    /// [`CellLabel::Unknown`].
    pub fn parse(label: &str) -> Result<Self, CoreError> {
        let label = label.trim();
        if label.is_empty() || label == UNKNOWN_LABEL {
            return Ok(CellLabel::Unknown);
        }
        let mut chars = label.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            if let Some(pattern) = DotPattern::from_symbol(ch) {
                return Ok(CellLabel::Dots(pattern));
            }
        }
        DotPattern::parse(label).map(CellLabel::Dots)
    }

    pub fn symbol(&self) -> char {
        match self {
            CellLabel::Dots(pattern) => pattern.to_symbol(),
            CellLabel::Unknown => UNKNOWN_SYMBOL,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, CellLabel::Unknown)
    }
}

impl fmt::Display for CellLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellLabel::Dots(pattern) => write!(f, "{pattern}"),
            CellLabel::Unknown => f.write_str(UNKNOWN_LABEL),
        }
    }
}

impl Serialize for CellLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellLabel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        CellLabel::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Axis-aligned box in pixel space. Malformed boxes (`x2 < x1`) are kept
/// as-is; their width and height simply come out negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }
}

impl From<[f32; 4]> for BoundingBox {
    fn from([x1, y1, x2, y2]: [f32; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl From<BoundingBox> for [f32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

/// One recognized cell on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Stable per-document index assigned when the cell was detected.
    pub index: usize,
    pub label: CellLabel,
    #[serde(rename = "box", default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,
}

impl Detection {
    pub fn new(index: usize, label: CellLabel, bbox: BoundingBox) -> Self {
        Self {
            index,
            label,
            bbox: Some(bbox),
        }
    }

    /// A cell with no positional metadata.
    pub fn unplaced(index: usize, label: CellLabel) -> Self {
        Self {
            index,
            label,
            bbox: None,
        }
    }

    /// Box used for geometry; a missing box behaves as the zero box.
    pub fn geometry(&self) -> BoundingBox {
        self.bbox.unwrap_or_default()
    }

    pub fn symbol(&self) -> char {
        self.label.symbol()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_pattern_parse_and_symbol() {
        let p = DotPattern::parse("1246").unwrap();
        assert_eq!(p.bits(), 0b0010_1011);
        assert_eq!(p.to_symbol(), '⠫');
    }

    #[test]
    fn test_dot_pattern_single_dots() {
        assert_eq!(DotPattern::parse("1").unwrap().to_symbol(), '⠁');
        assert_eq!(DotPattern::parse("6").unwrap().to_symbol(), '⠠');
        assert_eq!(DotPattern::parse("123456").unwrap().to_symbol(), '⠿');
    }

    #[test]
    fn test_dot_pattern_ignores_eight_dot_extension() {
        assert_eq!(
            DotPattern::parse("178").unwrap(),
            DotPattern::parse("1").unwrap()
        );
    }

    #[test]
    fn test_dot_pattern_rejects_garbage() {
        assert!(DotPattern::parse("12a").is_err());
        assert!(DotPattern::parse("09").is_err());
    }

    #[test]
    fn test_dot_pattern_display_is_canonical() {
        assert_eq!(DotPattern::parse("6421").unwrap().to_string(), "1246");
        assert_eq!(DotPattern::default().to_string(), "");
    }

    #[test]
    fn test_dot_pattern_from_symbol() {
        assert_eq!(DotPattern::from_symbol('⠃').unwrap().to_string(), "12");
        assert!(DotPattern::from_symbol('a').is_none());
        // Eight-dot cells are outside the six-dot range.
        assert!(DotPattern::from_symbol('\u{2840}').is_none());
    }

    #[test]
    fn test_cell_label_unknown_forms() {
        assert_eq!(CellLabel::parse("?").unwrap(), CellLabel::Unknown);
        assert_eq!(CellLabel::parse("").unwrap(), CellLabel::Unknown);
        assert_eq!(CellLabel::Unknown.symbol(), UNKNOWN_SYMBOL);
        assert_eq!(CellLabel::Unknown.to_string(), "?");
    }

    #[test]
    fn test_cell_label_accepts_braille_symbol() {
        assert_eq!(
            CellLabel::parse("⠙").unwrap(),
            CellLabel::Dots(DotPattern::parse("145").unwrap())
        );
    }

    #[test]
    fn test_bounding_box_tolerates_inverted_coordinates() {
        let b = BoundingBox::new(10.0, 10.0, 4.0, 8.0);
        assert_eq!(b.width(), -6.0);
        assert_eq!(b.height(), -2.0);
    }

    #[test]
    fn test_detection_json_shape() {
        let d: Detection =
            serde_json::from_str(r#"{"index":3,"label":"12","box":[1,2,3,4]}"#).unwrap();
        assert_eq!(d.index, 3);
        assert_eq!(d.symbol(), '⠃');
        assert_eq!(d.bbox, Some(BoundingBox::new(1.0, 2.0, 3.0, 4.0)));

        let json = serde_json::to_string(&d).unwrap();
        assert!(json.contains(r#""label":"12""#));
        assert!(json.contains(r#""box":[1.0,2.0,3.0,4.0]"#));
    }

    #[test]
    fn test_detection_without_box() {
        let d: Detection = serde_json::from_str(r#"{"index":0,"label":"?"}"#).unwrap();
        assert!(d.bbox.is_none());
        assert_eq!(d.geometry(), BoundingBox::default());
    }
}
