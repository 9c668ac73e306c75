//! Per-stroke feature extraction (§4.2).

use crate::types::{Stroke, StrokeFeatures};

/// Extract features from a single stroke. Pure: depends only on the stroke's own points.
pub fn extract(stroke: &Stroke) -> StrokeFeatures {
    let n = stroke.len() as f64;
    let (sum_x, sum_y) = stroke
        .iter()
        .fold((0.0, 0.0), |(sx, sy), &[x, y]| (sx + x, sy + y));
    let center = [sum_x / n, sum_y / n];

    let length = stroke
        .windows(2)
        .map(|pair| {
            let [x0, y0] = pair[0];
            let [x1, y1] = pair[1];
            ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt()
        })
        .sum();

    let start = stroke[0];
    let end = stroke[stroke.len() - 1];
    let dx = end[0] - start[0];
    let dy = end[1] - start[1];

    let angle = if (dx * dx + dy * dy).sqrt() < 1e-6 {
        0.0
    } else {
        dx.atan2(dy)
    };

    StrokeFeatures {
        center,
        length,
        angle,
        start,
        end,
        points: stroke.clone(),
    }
}

/// Extract features for every stroke in a character, in order.
pub fn extract_all(strokes: &[Stroke]) -> Vec<StrokeFeatures> {
    strokes.iter().map(extract).collect()
}
