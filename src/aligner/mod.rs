//! Alignment oracle.
//!
//! The [`Aligner`] trait is the single seam between the sampling engine and
//! the external alignment tool. [`blat::BlatAligner`] runs BLAT (or any tool
//! with the same command line and BLAST tabular output) once per read.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::alignment::AlignmentResult;
use crate::core::read::ReadRecord;
use crate::parsing::fastq::ParseError;
use crate::utils::validation::ValidationError;

pub mod blat;

#[cfg(test)]
pub(crate) mod scripted;

#[derive(Error, Debug)]
pub enum AlignerError {
    #[error(transparent)]
    InvalidReference(#[from] ValidationError),

    #[error("Reference not found: {}", .0.display())]
    ReferenceNotFound(PathBuf),

    #[error("Failed to prepare aligner input for read '{read_id}': {source}")]
    Artifact {
        read_id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to launch aligner '{program}' for read '{read_id}': {source}")]
    Launch {
        program: String,
        read_id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Aligner exited with {status} for read '{read_id}': {stderr}")]
    Failed {
        read_id: String,
        status: String,
        stderr: String,
    },

    #[error("Aligner wrote no result table for read '{read_id}'")]
    MissingOutput { read_id: String },

    #[error("Unparseable aligner output for read '{read_id}': {source}")]
    UnparseableOutput {
        read_id: String,
        #[source]
        source: ParseError,
    },
}

impl AlignerError {
    /// Identifier of the read whose alignment failed, when known
    pub fn read_id(&self) -> Option<&str> {
        match self {
            Self::Artifact { read_id, .. }
            | Self::Launch { read_id, .. }
            | Self::Failed { read_id, .. }
            | Self::MissingOutput { read_id }
            | Self::UnparseableOutput { read_id, .. } => Some(read_id),
            Self::InvalidReference(_) | Self::ReferenceNotFound(_) => None,
        }
    }
}

/// Aligns one read at a time against a named reference.
///
/// Calls are strictly sequential; an implementation may keep per-call
/// artifacts but must clean them up before returning.
pub trait Aligner {
    /// Align `read` against `reference` and report the ranked hits.
    ///
    /// Zero hits is a successful result. A tool failure or unreadable
    /// output is an error and must not be reported as zero hits.
    ///
    /// # Errors
    ///
    /// Returns an `AlignerError` if the tool cannot be run or its output
    /// cannot be parsed.
    fn align(
        &mut self,
        reference: &str,
        read: &ReadRecord,
    ) -> Result<AlignmentResult, AlignerError>;
}

impl<A: Aligner + ?Sized> Aligner for &mut A {
    fn align(
        &mut self,
        reference: &str,
        read: &ReadRecord,
    ) -> Result<AlignmentResult, AlignerError> {
        (**self).align(reference, read)
    }
}
