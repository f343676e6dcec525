//! # libguess
//!
//! Infers the strand orientation ("library type") of a sequencing library
//! from a small sample of its reads.
//!
//! Quantifiers and strand-aware counters need to know whether read 1 comes
//! from the transcript strand, the opposite strand, or either. That is rarely
//! recorded next to the FASTQ files. `libguess` answers the question by
//! aligning reads one at a time against a transcript reference with an
//! external aligner (BLAT by default) until enough of them have aligned to a
//! single transcript, then reading the answer off the alignment geometry.
//!
//! ## Features
//!
//! - **Single-end and paired-end**: `SF`/`SR`/`U` and `ISF`/`ISR`/`IU`/`OSF`/`OSR`/`OU`
//! - **Bounded work**: stops at a confident-observation target or an attempt budget
//! - **Unsorted mates**: mates are found by identifier within a lookahead window
//! - **Plain or gzip FASTQ**: `.gz` and `.bgz` inputs are decompressed on the fly
//!
//! ## Example
//!
//! ```rust,no_run
//! use libguess::aligner::blat::{BlatAligner, BlatConfig};
//! use libguess::sampling::config::SamplingConfig;
//! use libguess::sampling::engine::{ReadInputs, SamplingEngine};
//! use libguess::SamplingMode;
//!
//! let inputs = ReadInputs::paired("reads_1.fq.gz", "reads_2.fq.gz");
//! let config = SamplingConfig::for_mode(SamplingMode::Paired);
//!
//! let mut engine = SamplingEngine::new(BlatAligner::new(BlatConfig::default()), config);
//! let verdict = engine.infer("transcripts.fa", &inputs).unwrap();
//!
//! println!("{} ({} attempts)", verdict.label, verdict.attempts);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Reads, alignment hits, orientation categories and tallies
//! - [`parsing`]: FASTQ streaming and aligner hit-table parsing
//! - [`aligner`]: The alignment oracle and its BLAT implementation
//! - [`sampling`]: Classification, sampling loop, mate lookup and decision rule
//! - [`cli`]: Command-line interface implementation

pub mod aligner;
pub mod cli;
pub mod core;
pub mod parsing;
pub mod sampling;
pub mod utils;

// Re-export commonly used types for convenience
pub use aligner::{Aligner, AlignerError};
pub use core::alignment::{AlignmentHit, AlignmentResult};
pub use core::read::ReadRecord;
pub use core::tally::CategoryTally;
pub use core::types::*;
pub use sampling::decision::LibraryTypeVerdict;
pub use sampling::engine::{SamplingEngine, SamplingError};
