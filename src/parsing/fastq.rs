//! Resumable FASTQ cursor built on noodles.
//!
//! A [`StreamCursor`] hands out one [`ReadRecord`] per call and never rewinds.
//! It can be opened at a non-zero record offset so that a sampling run can
//! start part-way into a file. Plain and gzip/bgzip compressed files are
//! supported.

use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fastq;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::read::ReadRecord;
use crate::utils::validation::is_valid_residues;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed FASTQ record at offset {offset}: {message}")]
    Structural { offset: u64, message: String },

    #[error("Invalid hit table line {line}: {message}")]
    InvalidHitTable { line: usize, message: String },
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open a FASTQ file as a buffered reader, decompressing if needed.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened.
pub fn open_reader(path: &Path) -> Result<Box<dyn BufRead>, ParseError> {
    let file = std::fs::File::open(path)?;

    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Ordered, forward-only reader of FASTQ records.
///
/// The offset is counted in whole records and only ever increases.
pub struct StreamCursor<R> {
    reader: fastq::io::Reader<R>,
    record: fastq::Record,
    offset: u64,
    exhausted: bool,
}

impl StreamCursor<Box<dyn BufRead>> {
    /// Open a FASTQ file and skip ahead to `start_offset`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be opened, or
    /// `ParseError::Structural` if a skipped record is malformed.
    pub fn open(path: &Path, start_offset: u64) -> Result<Self, ParseError> {
        let reader = open_reader(path)?;
        Self::new(reader, start_offset)
    }
}

impl<R: BufRead> StreamCursor<R> {
    /// Wrap a reader and skip ahead to `start_offset`.
    ///
    /// Skipping past the end of the stream is not an error; the cursor is
    /// then exhausted and [`advance`](Self::advance) returns `None`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Structural` if a skipped record is malformed.
    pub fn new(inner: R, start_offset: u64) -> Result<Self, ParseError> {
        let mut cursor = Self {
            reader: fastq::io::Reader::new(inner),
            record: fastq::Record::default(),
            offset: 0,
            exhausted: false,
        };

        while cursor.offset < start_offset {
            if !cursor.read_next()? {
                warn!(
                    start_offset,
                    records = cursor.offset,
                    "Stream ended before the requested start offset"
                );
                break;
            }
        }

        Ok(cursor)
    }

    /// Number of records consumed so far, including skipped ones
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Read the next record.
    ///
    /// Returns `Ok(None)` once the stream has no further complete record.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Structural` if the record is malformed, or
    /// `ParseError::Io` on read failure.
    pub fn advance(&mut self) -> Result<Option<ReadRecord>, ParseError> {
        if !self.read_next()? {
            return Ok(None);
        }

        let read = ReadRecord::from_header(self.record.name(), self.record.sequence());
        debug!(offset = self.offset, id = %read.id, "Read record");
        Ok(Some(read))
    }

    /// Load the next record into the internal buffer and validate it.
    fn read_next(&mut self) -> Result<bool, ParseError> {
        if self.exhausted {
            return Ok(false);
        }

        match self.reader.read_record(&mut self.record) {
            Ok(0) => {
                self.exhausted = true;
                return Ok(false);
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                warn!(offset = self.offset, "Ignoring truncated trailing record");
                self.exhausted = true;
                return Ok(false);
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Err(ParseError::Structural {
                    offset: self.offset,
                    message: e.to_string(),
                });
            }
            Err(e) => return Err(ParseError::Io(e)),
        }

        self.validate_current()?;
        self.offset += 1;
        Ok(true)
    }

    fn validate_current(&self) -> Result<(), ParseError> {
        let sequence = self.record.sequence();
        let quality = self.record.quality_scores();

        if !is_valid_residues(sequence) {
            return Err(ParseError::Structural {
                offset: self.offset,
                message: "sequence contains residues outside A/C/G/T/N".to_string(),
            });
        }

        if sequence.len() != quality.len() {
            return Err(ParseError::Structural {
                offset: self.offset,
                message: format!(
                    "quality length {} does not match sequence length {}",
                    quality.len(),
                    sequence.len()
                ),
            });
        }

        Ok(())
    }
}
