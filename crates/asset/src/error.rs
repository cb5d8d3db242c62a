use std::{io, path::PathBuf};

use corelib::BufferError;
use thiserror::Error;

/// Reasons a model file fails to load. Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open OBJ file: {}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read line {line_number}")]
    Read {
        line_number: usize,
        #[source]
        source: io::Error,
    },
    #[error("Line {line_number} exceeds {limit} bytes")]
    LineTooLong { line_number: usize, limit: usize },
    #[error("Malformed record on line {line_number}: '{raw_text}'")]
    MalformedRecord { line_number: usize, raw_text: String },
    #[error("Face on line {line_number} has {count} corners (expected 3 or 4)")]
    UnsupportedFaceArity { line_number: usize, count: usize },
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Which per-corner attribute an index refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attribute {
    Position,
    Texcoord,
    Normal,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("Face {face}: {attribute:?} index {index} out of range (len={len})")]
    IndexOutOfRange {
        face: usize,
        attribute: Attribute,
        index: u32,
        len: usize,
    },
    #[error("Too many vertices in mesh (>{})", u32::MAX)]
    TooManyVertices,
}
