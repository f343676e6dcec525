use serde::{Deserialize, Serialize};

/// A single read taken from a FASTQ stream.
///
/// Only the identifier and the residues are retained; the separator and
/// quality lines are consumed by the cursor and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadRecord {
    /// First whitespace-delimited token of the header, without the `@`
    pub id: String,

    /// Residues over A/C/G/T/N, case preserved
    pub sequence: Vec<u8>,
}

impl ReadRecord {
    pub fn new(id: impl Into<String>, sequence: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
        }
    }

    /// Build a record from a raw header name, keeping only its first token.
    #[must_use]
    pub fn from_header(name: &[u8], sequence: &[u8]) -> Self {
        let name = String::from_utf8_lossy(name);
        let id = name
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        Self::new(id, sequence)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// The identifier with a trailing `/1` or `/2` mate suffix removed.
    #[must_use]
    pub fn id_without_mate_suffix(&self) -> &str {
        strip_mate_suffix(&self.id)
    }
}

/// Remove a trailing `/1` or `/2` from a read identifier, if present.
#[must_use]
pub fn strip_mate_suffix(id: &str) -> &str {
    id.strip_suffix("/1")
        .or_else(|| id.strip_suffix("/2"))
        .unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_header_keeps_first_token() {
        let record = ReadRecord::from_header(b"SRR001.1 length=36 extra", b"ACGT");
        assert_eq!(record.id, "SRR001.1");
        assert_eq!(record.sequence, b"ACGT");
        assert_eq!(record.len(), 4);
    }

    #[test]
    fn test_from_header_tab_delimited() {
        let record = ReadRecord::from_header(b"read7\tBC:Z:ACGT", b"A");
        assert_eq!(record.id, "read7");
    }

    #[test]
    fn test_strip_mate_suffix() {
        assert_eq!(strip_mate_suffix("frag12/1"), "frag12");
        assert_eq!(strip_mate_suffix("frag12/2"), "frag12");
        assert_eq!(strip_mate_suffix("frag12/3"), "frag12/3");
        assert_eq!(strip_mate_suffix("frag12"), "frag12");

        let record = ReadRecord::new("x/2", b"A".to_vec());
        assert_eq!(record.id_without_mate_suffix(), "x");
    }
}
