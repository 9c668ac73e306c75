//! Unix socket request/response service fronting the matching engine (§10.2).
//!
//! Request line (tab-delimited, newline-terminated):
//!   `reference_character\tstroke1\tstroke2\t...`
//! where each `strokeN` is `x0,y0;x1,y1;...` (the written character's strokes,
//! matched against `reference_character` as looked up in the loaded corpus).
//!
//! Response line: `fitness\tgenerations\tassignment\terror1|error2|...`
//! where `assignment` is comma-separated written-to-reference gene values and
//! each `errorN` is `TYPE:detail` (detail varies by error kind).

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::Path;

use thiserror::Error;

use crate::config::MatchConfig;
use crate::data::{CharacterCorpus, find};
use crate::engine::match_character;
use crate::rng::rng_from_seed;
use crate::types::{Character, ErrorRecord, Stroke};

/// Failures specific to parsing and serving one socket request.
#[derive(Debug, Error)]
pub enum SocketServiceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("unknown reference character: {0}")]
    UnknownReference(String),

    #[error("match failed: {0}")]
    Match(#[from] crate::error::MatchError),
}

/// Unix socket service that matches a written character against a corpus
/// reference and reports the detected writing errors.
pub struct SocketService {
    corpus: CharacterCorpus,
    config: MatchConfig,
    socket_path: String,
}

impl SocketService {
    /// Create a new service with a loaded corpus and the default match config.
    pub fn new(corpus: CharacterCorpus, socket_path: String) -> Self {
        Self {
            corpus,
            config: MatchConfig::default(),
            socket_path,
        }
    }

    /// Start listening on the Unix socket, serving connections until the
    /// listener is closed or an unrecoverable I/O error occurs.
    pub fn start(&self) -> Result<(), SocketServiceError> {
        if let Some(parent) = Path::new(&self.socket_path).parent() {
            fs::create_dir_all(parent)?;
        }
        let _ = fs::remove_file(&self.socket_path);

        let listener = UnixListener::bind(&self.socket_path)?;
        tracing::info!(socket_path = %self.socket_path, "listening");

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    if let Err(e) = self.handle_client(stream) {
                        tracing::warn!(error = %e, "error handling client");
                    }
                }
                Err(e) => tracing::warn!(error = %e, "connection error"),
            }
        }

        Ok(())
    }

    fn handle_client(&self, mut stream: UnixStream) -> Result<(), SocketServiceError> {
        let mut line = String::new();
        {
            let mut reader = BufReader::new(&stream);
            reader.read_line(&mut line)?;
        }

        match self.handle_request(line.trim()) {
            Ok(response) => stream.write_all(response.as_bytes())?,
            Err(e) => stream.write_all(format!("ERROR\t{e}\n").as_bytes())?,
        }

        Ok(())
    }

    fn handle_request(&self, line: &str) -> Result<String, SocketServiceError> {
        let mut parts = line.split('\t');
        let reference_char = parts
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| SocketServiceError::InvalidRequest("missing reference character".to_string()))?;

        let reference = find(&self.corpus, reference_char)
            .ok_or_else(|| SocketServiceError::UnknownReference(reference_char.to_string()))?;

        let written = parse_written_strokes(parts)?;

        let mut rng = rng_from_seed(0);
        let result = match_character(&written, reference, &self.config, &mut rng)?;

        Ok(encode_response(&result))
    }
}

fn parse_written_strokes<'a>(fields: impl Iterator<Item = &'a str>) -> Result<Character, SocketServiceError> {
    let mut written = Character::new();
    for field in fields {
        let mut stroke = Stroke::new();
        for point_str in field.split(';') {
            let mut coords = point_str.split(',');
            let x: f64 = coords
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| SocketServiceError::InvalidRequest(format!("bad x coordinate in '{point_str}'")))?;
            let y: f64 = coords
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| SocketServiceError::InvalidRequest(format!("bad y coordinate in '{point_str}'")))?;
            stroke.push([x, y]);
        }
        written.push(stroke);
    }
    Ok(written)
}

fn encode_response(result: &crate::types::MatchResult) -> String {
    let assignment = result
        .assignment
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join(",");

    let errors = result
        .errors
        .iter()
        .map(encode_error)
        .collect::<Vec<_>>()
        .join("|");

    format!(
        "{:.6}\t{}\t{}\t{}\n",
        result.fitness, result.generations, assignment, errors
    )
}

fn encode_error(error: &ErrorRecord) -> String {
    match error {
        ErrorRecord::Extra { written_indices, .. } => {
            format!("EXTRA:{}", indices_csv(written_indices))
        }
        ErrorRecord::Broken { written_indices, reference_index, .. } => {
            format!("BROKEN:{}:{reference_index}", indices_csv(written_indices))
        }
        ErrorRecord::Missing { reference_index, .. } => format!("MISSING:{reference_index}"),
        ErrorRecord::Orientation { written_index, reference_index, angle_diff_degrees, .. } => {
            format!("ORIENTATION:{written_index}:{reference_index}:{angle_diff_degrees:.1}")
        }
        ErrorRecord::Order { written_index, reference_index, .. } => {
            format!("ORDER:{written_index}:{reference_index}")
        }
    }
}

fn indices_csv(indices: &[usize]) -> String {
    indices.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(",")
}

/// Default socket path, scoped to the invoking user.
pub fn default_socket_path() -> String {
    let uid = unsafe { libc::getuid() };
    format!("/run/user/{uid}/handwritten/strokematch.socket")
}
