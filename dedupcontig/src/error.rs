//! Error types shared across the crate.

use std::path::PathBuf;

use thiserror::Error;

use crate::data_structs::typedef::{PosType, SeqName};

#[derive(Error, Debug)]
pub enum Error {
    /// Interval construction with `start > end`.
    #[error("malformed interval {seqname}:{start}-{end}: end must not be less than start")]
    MalformedInterval {
        seqname: SeqName,
        start:   PosType,
        end:     PosType,
    },

    /// Percent or centroid requested on a zero-length region.
    #[error("cannot compute {operation} on a region of length 0")]
    EmptyRegion { operation: &'static str },

    /// Centroid requested on a set spanning several contigs.
    #[error("cannot compute centroid on a set spanning {n_seqnames} contigs")]
    MultiContigCenter { n_seqnames: usize },

    /// Lookup of an unknown sequence identifier.
    #[error("unknown sequence identifier: {id}")]
    MissingIdentifier { id: String },

    /// Aligner invocation failed or produced unparseable output.
    #[error("external aligner failure: {message}")]
    ExternalToolFailure { message: String },

    /// A sequence contains a byte outside the IUPAC complement table.
    #[error("cannot complement byte {byte:#04x} in sequence {id}")]
    UnknownBase { id: SeqName, byte: u8 },

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn missing_id(id: impl Into<String>) -> Self {
        Self::MissingIdentifier { id: id.into() }
    }

    pub fn external(message: impl Into<String>) -> Self {
        Self::ExternalToolFailure {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
