//! Word-gap threshold derived from observed cell widths.

use std::ops::RangeInclusive;

/// Threshold (in pixels) used when a document has no measurable cells.
pub const FALLBACK_THRESHOLD: f32 = 20.0;

/// Multiplier applied to the average width when none is configured.
pub const DEFAULT_SPACING_FACTOR: f32 = 1.2;

/// Range callers are expected to keep the factor in. Not enforced here.
pub const SPACING_FACTOR_RANGE: RangeInclusive<f32> = 1.0..=2.0;

/// `mean(widths) * factor`, or [`FALLBACK_THRESHOLD`] for an empty slice.
///
/// The factor is taken as given; range enforcement belongs to the caller.
pub fn estimate_threshold(widths: &[f32], factor: f32) -> f32 {
    if widths.is_empty() {
        return FALLBACK_THRESHOLD;
    }
    let mean = widths.iter().sum::<f32>() / widths.len() as f32;
    mean * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_scenario() {
        let t = estimate_threshold(&[10.0, 10.0, 10.0, 10.0], 1.2);
        assert!((t - 12.0).abs() < 1e-5);
    }

    #[test]
    fn test_threshold_empty_is_fallback_for_any_factor() {
        for factor in [0.0, 1.0, 1.2, 2.0, 5.0, -1.0] {
            assert_eq!(estimate_threshold(&[], factor), FALLBACK_THRESHOLD);
        }
    }

    #[test]
    fn test_threshold_accepts_out_of_range_factor() {
        assert_eq!(estimate_threshold(&[4.0, 6.0], 3.0), 15.0);
    }

    #[test]
    fn test_threshold_uses_mean() {
        assert_eq!(estimate_threshold(&[8.0, 12.0, 16.0], 1.0), 12.0);
    }

    #[test]
    fn test_default_factor_in_range() {
        assert!(SPACING_FACTOR_RANGE.contains(&DEFAULT_SPACING_FACTOR));
    }
}
