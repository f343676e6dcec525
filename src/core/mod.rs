//! Core data types for library-type inference.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`ReadRecord`](read::ReadRecord): A single sequencing read (identifier and residues)
//! - [`AlignmentHit`](alignment::AlignmentHit), [`AlignmentResult`](alignment::AlignmentResult): What the aligner reported for one read
//! - [`OrientationCategory`](types::OrientationCategory): Geometric class of one read or one read pair
//! - [`CategoryTally`](tally::CategoryTally): Per-category counts collected during sampling
//! - [`LibraryType`](types::LibraryType), [`SamplingMode`](types::SamplingMode): Final labels and the mode that produced them
//!
//! ## Library type codes
//!
//! Labels follow the usual RNA-seq shorthand:
//!
//! | Mode   | Forward | Reverse | Unstranded |
//! |--------|---------|---------|------------|
//! | Single | SF      | SR      | U          |
//! | Inward | ISF     | ISR     | IU         |
//! | Outward| OSF     | OSR     | OU         |

pub mod alignment;
pub mod read;
pub mod tally;
pub mod types;
