//! Stroke-matching engine for logographic character handwriting feedback.
//!
//! Compares a learner's written character against a reference rendering of
//! the same character and reports missing, extra, misordered, misdirected,
//! and broken strokes. See `engine::match_character` for the entry point.

pub mod classifier;
pub mod config;
pub mod csv_data;
pub mod data;
pub mod engine;
pub mod error;
pub mod features;
pub mod fitness;
pub mod ga;
pub mod normalize;
pub mod rng;
pub mod socket_service;
pub mod types;

pub use config::MatchConfig;
pub use engine::match_character;
pub use error::{CorpusError, MatchError};
pub use rng::rng_from_seed;
pub use types::{Assignment, Character, ErrorRecord, MatchResult, Point, Stroke, StrokeFeatures};
