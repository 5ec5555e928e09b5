//! Two-pass control-point outlier rejection.
//!
//! Pass 1 discards points whose quality is not comfortably above the
//! sweep's mean quality (noise- or silence-dominated windows); pass 2
//! discards points whose offset strays more than two standard deviations
//! from the mean offset of the surviving points (spurious high-quality
//! matches, e.g. a structurally repetitive section aligning to the wrong
//! bar).

use crate::config::Q_FACTOR;
use crate::sweep::ControlPoint;

/// Filter `points` in place order, returning only those that pass both
/// gates. Preserves the input's position ordering. An input producing
/// fewer than two survivors is reported by the caller as a fatal
/// `AlignError::Alignment` (spec §7) — this function itself just returns
/// whatever passes, including an empty `Vec`.
pub fn filter(points: Vec<ControlPoint>) -> Vec<ControlPoint> {
    if points.is_empty() {
        return points;
    }

    let mean_quality: f64 =
        points.iter().map(|p| p.quality as f64).sum::<f64>() / points.len() as f64;
    let quality_gate = Q_FACTOR * mean_quality;

    let quality_valid: Vec<&ControlPoint> = points
        .iter()
        .filter(|p| (p.quality as f64) > quality_gate)
        .collect();
    if quality_valid.is_empty() {
        return Vec::new();
    }

    let mean_offset: f64 =
        quality_valid.iter().map(|p| p.offset).sum::<f64>() / quality_valid.len() as f64;
    let variance: f64 = quality_valid
        .iter()
        .map(|p| (p.offset - mean_offset).powi(2))
        .sum::<f64>()
        / quality_valid.len() as f64;
    let stdev = variance.sqrt();
    let spread = 2.0 * stdev;

    points
        .into_iter()
        .filter(|p| (p.quality as f64) > quality_gate && (p.offset - mean_offset).abs() < spread)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(position: i64, offset: f64, quality: f32) -> ControlPoint {
        ControlPoint {
            position,
            offset,
            quality,
        }
    }

    #[test]
    fn rejects_low_quality_points() {
        // Quality values are negative L1 scores: closer to zero is better.
        let points = vec![
            point(0, 100.0, -1.0),
            point(1, 100.1, -1.2),
            point(2, 100.0, -1.1),
            point(3, 55.0, -40.0), // far worse quality, should be rejected
        ];
        let out = filter(points);
        assert!(out.iter().all(|p| p.position != 3));
        assert!(out.len() >= 2);
    }

    #[test]
    fn rejects_offset_outliers_among_quality_valid_points() {
        let points = vec![
            point(0, 100.0, -1.0),
            point(1, 100.1, -1.0),
            point(2, 99.9, -1.0),
            point(3, 100.05, -1.0),
            point(4, 99.95, -1.0),
            point(5, 100.02, -1.0),
            point(6, 99.98, -1.0),
            point(7, 100.0, -1.0),
            point(8, 9000.0, -1.0), // same quality, wildly different offset
        ];
        let out = filter(points);
        assert!(out.iter().all(|p| p.position != 8));
        assert!(out.len() >= 2);
    }

    #[test]
    fn preserves_position_order() {
        let points = vec![
            point(0, 10.0, -1.0),
            point(1, 10.02, -1.0),
            point(2, 9.98, -1.0),
        ];
        let out = filter(points);
        assert_eq!(out.len(), 3);
        for w in out.windows(2) {
            assert!(w[0].position < w[1].position);
        }
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(filter(Vec::new()).is_empty());
    }
}
