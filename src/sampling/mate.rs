//! Mate lookup for paired-end sampling.
//!
//! Read identifiers in the mate file are not assumed to be sorted or
//! indexed, so every lookup rescans the mate file from its first record and
//! gives up after a fixed number of records.

use std::path::PathBuf;

use tracing::debug;

use crate::aligner::Aligner;
use crate::core::alignment::AlignmentResult;
use crate::core::read::{strip_mate_suffix, ReadRecord};
use crate::parsing::fastq::{ParseError, StreamCursor};
use crate::sampling::FailureKind;

/// Result of searching the mate file for one identifier
#[derive(Debug, Clone, PartialEq)]
pub enum MateLookup {
    /// The mate was found and aligned
    Found {
        mate: ReadRecord,
        result: AlignmentResult,
        scanned: usize,
    },
    /// No record with the identifier within the lookahead window
    NotFound { scanned: usize },
}

/// Finds and aligns the mate of a read in the second FASTQ file
#[derive(Debug, Clone)]
pub struct MateLocator {
    path: PathBuf,
    lookahead: usize,
    strip_suffix: bool,
}

impl MateLocator {
    pub fn new(path: impl Into<PathBuf>, lookahead: usize) -> Self {
        Self {
            path: path.into(),
            lookahead,
            strip_suffix: false,
        }
    }

    /// Compare identifiers without a trailing `/1` or `/2`
    #[must_use]
    pub fn with_strip_mate_suffix(mut self, strip: bool) -> Self {
        self.strip_suffix = strip;
        self
    }

    fn matches(&self, candidate: &ReadRecord, read_id: &str) -> bool {
        if self.strip_suffix {
            candidate.id_without_mate_suffix() == strip_mate_suffix(read_id)
        } else {
            candidate.id == read_id
        }
    }

    /// Scan the first `lookahead` records of the mate file for `read_id`.
    ///
    /// Returns the record and the number of records examined, or `None` with
    /// the count if the window or the file ran out first.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the mate file cannot be opened or a scanned
    /// record is malformed.
    pub fn find(&self, read_id: &str) -> Result<(Option<ReadRecord>, usize), ParseError> {
        let mut cursor = StreamCursor::open(&self.path, 0)?;
        let mut scanned = 0;

        while scanned < self.lookahead {
            let Some(record) = cursor.advance()? else {
                break;
            };
            scanned += 1;

            if self.matches(&record, read_id) {
                return Ok((Some(record), scanned));
            }
        }

        Ok((None, scanned))
    }

    /// Find the mate of `read_id` and align it.
    ///
    /// A mate that is not found is not an error; the aligner is not called
    /// and the lookup reports [`MateLookup::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns `FailureKind::Input` if the mate file is malformed, or
    /// `FailureKind::Oracle` if aligning the mate fails.
    pub fn locate<A: Aligner + ?Sized>(
        &self,
        aligner: &mut A,
        reference: &str,
        read_id: &str,
    ) -> Result<MateLookup, FailureKind> {
        let (found, scanned) = self.find(read_id)?;

        let Some(mate) = found else {
            debug!(read = read_id, scanned, "Mate not found within lookahead");
            return Ok(MateLookup::NotFound { scanned });
        };

        debug!(read = read_id, mate = %mate.id, scanned, "Aligning mate");
        let result = aligner.align(reference, &mate)?;

        Ok(MateLookup::Found {
            mate,
            result,
            scanned,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aligner::scripted::ScriptedAligner;
    use std::fmt::Write as _;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn mate_file(ids: &[&str]) -> NamedTempFile {
        let mut content = String::new();
        for id in ids {
            let _ = write!(content, "@{id} 2:N:0\nACGTAC\n+\nIIIIII\n");
        }
        let mut temp = NamedTempFile::with_suffix(".fq").unwrap();
        temp.write_all(content.as_bytes()).unwrap();
        temp.flush().unwrap();
        temp
    }

    #[test]
    fn test_find_mate() {
        let file = mate_file(&["a", "b", "c"]);
        let locator = MateLocator::new(file.path(), 1000);

        let (found, scanned) = locator.find("b").unwrap();
        assert_eq!(found.unwrap().id, "b");
        assert_eq!(scanned, 2);
    }

    #[test]
    fn test_every_lookup_restarts_from_first_record() {
        let file = mate_file(&["a", "b", "c"]);
        let locator = MateLocator::new(file.path(), 1000);

        assert_eq!(locator.find("c").unwrap().1, 3);
        assert_eq!(locator.find("a").unwrap().1, 1);
    }

    #[test]
    fn test_lookahead_bound() {
        let ids: Vec<String> = (0..20).map(|i| format!("r{i}")).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let file = mate_file(&refs);
        let locator = MateLocator::new(file.path(), 10);

        let (found, scanned) = locator.find("r9").unwrap();
        assert!(found.is_some());
        assert_eq!(scanned, 10);

        let (found, scanned) = locator.find("r10").unwrap();
        assert!(found.is_none());
        assert_eq!(scanned, 10);
    }

    #[test]
    fn test_not_found_is_not_an_error_and_skips_alignment() {
        let file = mate_file(&["a", "b"]);
        let locator = MateLocator::new(file.path(), 1000);
        let mut aligner = ScriptedAligner::new();

        let lookup = locator.locate(&mut aligner, "tx.fa", "zzz").unwrap();
        assert_eq!(lookup, MateLookup::NotFound { scanned: 2 });
        assert!(aligner.calls.is_empty());
    }

    #[test]
    fn test_locate_aligns_found_mate() {
        let file = mate_file(&["a", "b"]);
        let locator = MateLocator::new(file.path(), 1000);
        let mut aligner = ScriptedAligner::new().unique("b", "ENST1", 400, 300);

        let lookup = locator.locate(&mut aligner, "tx.fa", "b").unwrap();
        let MateLookup::Found { mate, result, .. } = lookup else {
            panic!("mate not found");
        };
        assert_eq!(mate.id, "b");
        assert!(result.is_unique());
        assert_eq!(aligner.calls, vec!["b".to_string()]);
    }

    #[test]
    fn test_strip_mate_suffix() {
        let file = mate_file(&["frag1/2", "frag2/2"]);

        let exact = MateLocator::new(file.path(), 1000);
        assert!(exact.find("frag2/1").unwrap().0.is_none());

        let stripped = MateLocator::new(file.path(), 1000).with_strip_mate_suffix(true);
        let (found, scanned) = stripped.find("frag2/1").unwrap();
        assert_eq!(found.unwrap().id, "frag2/2");
        assert_eq!(scanned, 2);

        // a read 1 identifier without a suffix still matches
        let (found, _) = stripped.find("frag1").unwrap();
        assert_eq!(found.unwrap().id, "frag1/2");
    }

    #[test]
    fn test_malformed_mate_file() {
        let mut temp = NamedTempFile::with_suffix(".fq").unwrap();
        temp.write_all(b"@a\nACGT\n+\nII\n").unwrap();
        temp.flush().unwrap();

        let locator = MateLocator::new(temp.path(), 1000);
        let mut aligner = ScriptedAligner::new();
        let err = locator.locate(&mut aligner, "tx.fa", "a").unwrap_err();
        assert!(matches!(err, FailureKind::Input(ParseError::Structural { .. })));
    }
}
