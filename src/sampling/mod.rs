//! Budgeted sampling and library-type inference.
//!
//! A run repeatedly takes the next read from the first FASTQ file, aligns it,
//! and, if it aligned uniquely, classifies it (together with its mate in
//! paired-end mode). Classified observations are tallied until enough have
//! been collected or the attempt budget runs out, and the tallies are then
//! turned into a [`LibraryType`](crate::core::types::LibraryType).
//!
//! - [`engine`]: The sampling loop and its report
//! - [`classify`]: Read and pair orientation classifier
//! - [`mate`]: Bounded mate lookup in the second file
//! - [`decision`]: Ratio-based decision rule
//! - [`config`]: Budgets, thresholds and overrides

use thiserror::Error;

use crate::aligner::AlignerError;
use crate::parsing::fastq::ParseError;

pub mod classify;
pub mod config;
pub mod decision;
pub mod engine;
pub mod mate;

/// Conditions that abort a sampling run
#[derive(Error, Debug)]
pub enum FailureKind {
    /// A read stream could not be read or is malformed
    #[error(transparent)]
    Input(#[from] ParseError),

    /// The aligner could not be run or returned unreadable output
    #[error(transparent)]
    Oracle(#[from] AlignerError),
}
