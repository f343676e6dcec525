//! Command-line interface for libguess.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **single**: Infer the library type of single-end reads
//! - **paired**: Infer the library type of paired-end reads
//!
//! ## Usage
//!
//! ```text
//! # Single-end reads against transcripts in ./reference_sequences
//! libguess single -r transcripts.fa reads.fq
//!
//! # Paired-end reads, JSON output
//! libguess paired -r transcripts.fa reads_1.fq.gz reads_2.fq.gz --format json
//!
//! # Larger sample, custom aligner location
//! libguess paired -r transcripts.fa r1.fq r2.fq --target 50 --aligner /opt/blat/blat
//! ```

use clap::{Parser, Subcommand};

pub mod common;
pub mod paired;
pub mod report;
pub mod single;

#[derive(Parser)]
#[command(name = "libguess")]
#[command(version)]
#[command(about = "Infer the strand orientation (library type) of sequencing reads")]
#[command(
    long_about = "libguess samples reads from a FASTQ file (or a pair of mate files), aligns them one at a time against a transcript reference with an external aligner, and classifies the geometry of uniquely aligned reads.\n\nThe forward/reverse (and inward/outward) counts are turned into a library-type code such as SF, SR, U, ISF, ISR or IU."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Infer the library type of single-end reads
    Single(single::SingleArgs),

    /// Infer the library type of paired-end reads
    Paired(paired::PairedArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
