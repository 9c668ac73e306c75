//! Assignment scoring (§4.3).

use std::f64::consts::PI;

use crate::config::MatchConfig;
use crate::types::{Assignment, StrokeFeatures};

/// Fixed penalty for a written stroke with no reference partner (or an
/// out-of-range reference index, which the cost function treats as no match).
pub const UNMATCH_PENALTY: f64 = 1000.0;

/// Component-wise minimum over a set of centers: the top-left corner of their
/// bounding box. Returns `[0.0, 0.0]` for an empty set.
fn centers_top_left(features: &[StrokeFeatures]) -> [f64; 2] {
    features.iter().fold([f64::INFINITY; 2], |acc, f| {
        [acc[0].min(f.center[0]), acc[1].min(f.center[1])]
    }).map(|v| if v.is_finite() { v } else { 0.0 })
}

fn norm2(p: [f64; 2]) -> f64 {
    (p[0] * p[0] + p[1] * p[1]).sqrt()
}

fn sub(a: [f64; 2], b: [f64; 2]) -> [f64; 2] {
    [a[0] - b[0], a[1] - b[1]]
}

/// Shortest-arc angular distance on the circle, in `[0, pi]`.
fn angle_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).abs();
    if d > PI { 2.0 * PI - d } else { d }
}

/// Total distance for an assignment (lower is better). §4.3.
pub fn distance(
    written: &[StrokeFeatures],
    reference: &[StrokeFeatures],
    assignment: &Assignment,
    config: &MatchConfig,
) -> f64 {
    let reference_tl = centers_top_left(reference);
    let written_tl = centers_top_left(written);

    assignment
        .iter()
        .enumerate()
        .map(|(i, &m)| {
            if m == 0 || m > reference.len() {
                return UNMATCH_PENALTY;
            }
            let w = &written[i];
            let r = &reference[m - 1];

            let d_center = norm2(sub(w.center, r.center));
            let d_length = (w.length - r.length).abs();
            let d_angle = angle_distance(w.angle, r.angle);
            let d_rel = (norm2(sub(w.center, written_tl)) - norm2(sub(r.center, reference_tl))).abs();

            config.alpha * d_center + config.beta * d_length + config.gamma * d_angle + config.epsilon * d_rel
        })
        .sum()
}

/// Monotone transform of distance into a bounded fitness score in `(0, 1]`.
pub fn fitness(distance: f64) -> f64 {
    1.0 / (1.0 + distance)
}
