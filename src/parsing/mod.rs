//! Parsers for the files libguess reads.
//!
//! This module provides parsers for:
//!
//! - **FASTQ files**: Forward-only record streaming, plain or gzip compressed
//! - **BLAST tabular hits**: The `blast8` table written by the aligner
//!
//! ## Example
//!
//! ```rust,no_run
//! use libguess::parsing::blast8::parse_hit_table_file;
//! use libguess::parsing::fastq::StreamCursor;
//! use std::path::Path;
//!
//! // Stream reads, skipping the first 1000 records
//! let mut cursor = StreamCursor::open(Path::new("reads.fq.gz"), 1000).unwrap();
//! while let Some(read) = cursor.advance().unwrap() {
//!     println!("{} ({} bp)", read.id, read.len());
//! }
//!
//! // Parse aligner output
//! let hits = parse_hit_table_file(Path::new("hits.m8")).unwrap();
//! ```
//!
//! ## Hit table columns
//!
//! | Column | Description | Required |
//! |--------|-------------|----------|
//! | 1  | Query identifier | Yes |
//! | 2  | Target identifier | Yes |
//! | 3  | Percent identity | Yes |
//! | 9  | Target start | Yes |
//! | 10 | Target end | Yes |
//! | 11 | E-value | Yes |
//! | 12 | Bit score | No |

pub mod blast8;
pub mod fastq;
