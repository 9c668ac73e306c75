//! Isotropic bounding-box normalization (§4.1).

use crate::error::MatchError;
use crate::types::{Character, NormalizationMetadata, Point, Stroke};

/// Normalize a list of strokes into a common box whose larger dimension equals
/// `target_size`, preserving aspect ratio. An empty input returns an empty
/// output with default (zeroed) metadata.
pub fn normalize(strokes: &Character, target_size: f64) -> Result<(Character, NormalizationMetadata), MatchError> {
    if strokes.is_empty() {
        return Ok((Vec::new(), NormalizationMetadata::default()));
    }

    for stroke in strokes {
        if stroke.len() < 2 {
            return Err(MatchError::InvalidInput {
                reason: format!("stroke has {} point(s), need at least 2", stroke.len()),
            });
        }
    }

    let (x_min, y_min, x_max, y_max) = bounding_box(strokes);
    let width = x_max - x_min;
    let height = y_max - y_min;

    let scale = if width == 0.0 && height == 0.0 {
        1.0
    } else if width == 0.0 {
        target_size / height
    } else if height == 0.0 {
        target_size / width
    } else {
        target_size / width.max(height)
    };

    let normalized: Character = strokes
        .iter()
        .map(|stroke| {
            stroke
                .iter()
                .map(|&[x, y]| -> Point { [(x - x_min) * scale, (y - y_min) * scale] })
                .collect::<Stroke>()
        })
        .collect();

    let metadata = NormalizationMetadata {
        x_min,
        y_min,
        x_max,
        y_max,
        scale,
        width,
        height,
    };

    Ok((normalized, metadata))
}

fn bounding_box(strokes: &Character) -> (f64, f64, f64, f64) {
    let mut x_min = f64::INFINITY;
    let mut y_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for stroke in strokes {
        for &[x, y] in stroke {
            x_min = x_min.min(x);
            y_min = y_min.min(y);
            x_max = x_max.max(x);
            y_max = y_max.max(y);
        }
    }

    (x_min, y_min, x_max, y_max)
}
