//! CSV corpus loader/writer (§10.1).
//!
//! Format: `character\tx0,y0;x1,y1;...\tx0,y0;...` — tab-delimited, one field
//! per stroke, points semicolon-separated and coordinates comma-separated, so
//! that arbitrary-length polylines stay representable in a flat text row.

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::data::{CharacterCorpus, load_graphics_json};
use crate::error::CorpusError;
use crate::types::{Character, Stroke};

/// Convert a `graphics.json`-shaped corpus file to the CSV format above.
pub fn json_to_csv<P: AsRef<Path>, Q: AsRef<Path>>(json_path: P, csv_path: Q) -> Result<(), CorpusError> {
    let corpus = load_graphics_json(json_path)?;
    let mut file = fs::File::create(csv_path)?;

    for (character, strokes) in corpus {
        write!(file, "{character}")?;
        for stroke in &strokes {
            write!(file, "\t")?;
            write_stroke(&mut file, stroke)?;
        }
        writeln!(file)?;
    }

    Ok(())
}

fn write_stroke(file: &mut fs::File, stroke: &Stroke) -> std::io::Result<()> {
    for (i, [x, y]) in stroke.iter().enumerate() {
        if i > 0 {
            write!(file, ";")?;
        }
        write!(file, "{x},{y}")?;
    }
    Ok(())
}

/// Load a character corpus from the CSV format above.
pub fn load_graphics_csv<P: AsRef<Path>>(path: P) -> Result<CharacterCorpus, CorpusError> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    let mut result = CharacterCorpus::new();

    for line in reader.lines() {
        let line = line?;
        let mut parts = line.split('\t');

        let character = parts
            .next()
            .ok_or_else(|| CorpusError::Malformed {
                reason: "missing character column".to_string(),
            })?
            .to_string();

        let mut strokes = Character::new();
        for stroke_field in parts {
            let mut stroke = Stroke::new();
            for point_str in stroke_field.split(';') {
                let mut coords = point_str.split(',');
                let x: f64 = coords
                    .next()
                    .and_then(|s| s.parse().ok())
                    .ok_or_else(|| CorpusError::Malformed {
                        reason: format!("malformed x coordinate in '{point_str}'"),
                    })?;
                let y: f64 = coords
                    .next()
                    .and_then(|s| s.parse().ok())
                    .ok_or_else(|| CorpusError::Malformed {
                        reason: format!("malformed y coordinate in '{point_str}'"),
                    })?;
                stroke.push([x, y]);
            }
            strokes.push(stroke);
        }

        result.push((character, strokes));
    }

    Ok(result)
}
