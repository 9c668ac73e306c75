//! Core data model shared by every stage of the matching engine.

use serde::{Deserialize, Serialize};

/// A single 2-D sample in drawing order.
pub type Point = [f64; 2];

/// An ordered polyline sampled in drawing direction. Must have at least two points.
pub type Stroke = Vec<Point>;

/// A finite ordered list of strokes making up one rendering of a character.
pub type Character = Vec<Stroke>;

/// Map from written stroke index to reference stroke index.
///
/// `assignment[i] == 0` means written stroke `i` has no reference partner (an extra).
/// `assignment[i] == k` for `k` in `1..=reference.len()` means written stroke `i`
/// is the learner's attempt at reference stroke `k - 1`.
pub type Assignment = Vec<usize>;

/// Derived, immutable per-stroke descriptors. Depends only on the stroke's own points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeFeatures {
    /// Arithmetic mean of the stroke's x- and y-coordinates.
    pub center: Point,
    /// Sum of Euclidean distances between consecutive points (arc length).
    pub length: f64,
    /// Orientation of the chord from first to last point, measured from the
    /// positive y-axis via `atan2(dx, dy)`, in `(-pi, pi]`. Zero for a zero-length chord.
    pub angle: f64,
    /// First point of the stroke.
    pub start: Point,
    /// Last point of the stroke.
    pub end: Point,
    /// The retained polyline, kept for extensibility; unused by the current fitness.
    pub points: Vec<Point>,
}

/// Normalization parameters sufficient for an inverse mapping back to original
/// coordinates. Reported to the caller; the engine itself does not consume it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizationMetadata {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
    pub scale: f64,
    pub width: f64,
    pub height: f64,
}

/// Per-generation fitness statistics recorded by the GA.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FitnessHistory {
    pub best_fitness: Vec<f64>,
    pub mean_fitness: Vec<f64>,
}

/// Output of the GA optimizer: the winning assignment and its evolution trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaOutcome {
    pub assignment: Assignment,
    pub fitness: f64,
    pub generations: usize,
    pub history: FitnessHistory,
}

/// One writing-error record emitted by the classifier (§4.5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ErrorRecord {
    /// Written strokes with no legitimate reference partner.
    #[serde(rename = "EXTRA")]
    Extra {
        description: String,
        written_indices: Vec<usize>,
        reference_index: Option<usize>,
    },
    /// A single reference stroke that the learner split across multiple written strokes.
    #[serde(rename = "BROKEN")]
    Broken {
        description: String,
        written_indices: Vec<usize>,
        reference_index: usize,
    },
    /// A reference stroke the learner never produced.
    #[serde(rename = "MISSING")]
    Missing {
        description: String,
        reference_index: usize,
    },
    /// A matched stroke drawn in (close to) the wrong direction.
    #[serde(rename = "ORIENTATION")]
    Orientation {
        description: String,
        written_index: usize,
        reference_index: usize,
        angle_diff_degrees: f64,
    },
    /// A matched stroke drawn at the wrong position in the sequence.
    #[serde(rename = "ORDER")]
    Order {
        description: String,
        written_index: usize,
        reference_index: usize,
        expected_position: usize,
    },
}

/// Full result of one `match_character` call (§6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub assignment: Assignment,
    pub fitness: f64,
    pub errors: Vec<ErrorRecord>,
    pub generations: usize,
    pub history: FitnessHistory,
    pub written_features: Vec<StrokeFeatures>,
    pub reference_features: Vec<StrokeFeatures>,
    pub normalization_metadata: MatchNormalizationMetadata,
}

/// Normalization metadata for both sides of a match call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchNormalizationMetadata {
    pub written: NormalizationMetadata,
    pub reference: NormalizationMetadata,
}
