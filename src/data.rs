//! JSON character corpus loader (§10.1).
//!
//! Format: `[[character, [[[x, y], [x, y], ...], ...]], ...]` — a top-level array
//! of `(character, strokes)` pairs, each stroke a flat list of `[x, y]` points.

use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::CorpusError;
use crate::types::Character;

/// One corpus entry: a character and its reference strokes.
pub type CorpusEntry = (String, Character);

/// A loaded character corpus, in file order.
pub type CharacterCorpus = Vec<CorpusEntry>;

/// Load a character corpus from a `graphics.json`-shaped file.
pub fn load_graphics_json<P: AsRef<Path>>(path: P) -> Result<CharacterCorpus, CorpusError> {
    let content = fs::read_to_string(path)?;
    let data: Value = serde_json::from_str(&content)?;

    let Value::Array(entries) = data else {
        return Err(CorpusError::Malformed {
            reason: "expected a top-level array of [character, strokes] pairs".to_string(),
        });
    };

    let mut result = CharacterCorpus::new();
    for entry in entries {
        let Value::Array(pair) = entry else {
            return Err(CorpusError::Malformed {
                reason: "expected each entry to be a [character, strokes] pair".to_string(),
            });
        };
        if pair.len() != 2 {
            return Err(CorpusError::Malformed {
                reason: format!("expected a 2-element pair, got {} elements", pair.len()),
            });
        }

        let character = pair[0]
            .as_str()
            .ok_or_else(|| CorpusError::Malformed {
                reason: "first pair element must be a character string".to_string(),
            })?
            .to_string();

        let strokes = parse_strokes(&pair[1])?;
        result.push((character, strokes));
    }

    Ok(result)
}

/// Parse a `[[[x, y], ...], ...]` JSON value into a character's strokes.
fn parse_strokes(value: &Value) -> Result<Character, CorpusError> {
    let Value::Array(stroke_list) = value else {
        return Err(CorpusError::Malformed {
            reason: "expected an array of strokes".to_string(),
        });
    };

    let mut strokes = Character::new();
    for stroke_value in stroke_list {
        let Value::Array(points) = stroke_value else {
            return Err(CorpusError::Malformed {
                reason: "each stroke must be an array of points".to_string(),
            });
        };
        let mut stroke = Vec::with_capacity(points.len());
        for point in points {
            let Value::Array(coords) = point else {
                return Err(CorpusError::Malformed {
                    reason: "each point must be a [x, y] array".to_string(),
                });
            };
            if coords.len() < 2 {
                return Err(CorpusError::Malformed {
                    reason: "each point needs at least 2 coordinates".to_string(),
                });
            }
            let x = coords[0].as_f64().ok_or_else(|| CorpusError::Malformed {
                reason: "point x coordinate must be a number".to_string(),
            })?;
            let y = coords[1].as_f64().ok_or_else(|| CorpusError::Malformed {
                reason: "point y coordinate must be a number".to_string(),
            })?;
            stroke.push([x, y]);
        }
        strokes.push(stroke);
    }

    Ok(strokes)
}

/// Load a single character's strokes from a `[[[x, y], ...], ...]` JSON file
/// (one written or reference rendering, not a whole corpus).
pub fn load_character_json<P: AsRef<Path>>(path: P) -> Result<Character, CorpusError> {
    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;
    parse_strokes(&value)
}

/// Look up one character's reference strokes by exact name match.
pub fn find<'a>(corpus: &'a CharacterCorpus, character: &str) -> Option<&'a Character> {
    corpus
        .iter()
        .find(|(c, _)| c == character)
        .map(|(_, strokes)| strokes)
}
