use std::path::Path;

use crate::core::alignment::{AlignmentHit, HitRank};
use crate::parsing::fastq::ParseError;

/// Minimum number of columns in a BLAST tabular (m8) row
const MIN_FIELDS: usize = 11;

const TARGET_COLUMN: usize = 1;
const IDENTITY_COLUMN: usize = 2;
const TARGET_START_COLUMN: usize = 8;
const TARGET_END_COLUMN: usize = 9;
const E_VALUE_COLUMN: usize = 10;
const BIT_SCORE_COLUMN: usize = 11;

/// Parse a BLAST tabular (m8) hit table from a file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::InvalidHitTable` if a row is malformed.
pub fn parse_hit_table_file(path: &Path) -> Result<Vec<AlignmentHit>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_hit_table(&content)
}

/// Parse BLAST tabular (m8) text into hits, preserving the best-first row order.
///
/// Columns: query, target, identity, length, mismatches, gap opens,
/// query start, query end, target start, target end, e-value, [bit score].
/// Blank lines and `#` comment lines are skipped.
///
/// # Errors
///
/// Returns `ParseError::InvalidHitTable` if a row has fewer than 11 fields
/// or a numeric column cannot be parsed.
pub fn parse_hit_table(text: &str) -> Result<Vec<AlignmentHit>, ParseError> {
    let mut hits = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim_end();
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();

        if fields.len() < MIN_FIELDS {
            return Err(ParseError::InvalidHitTable {
                line: line_num,
                message: format!(
                    "expected at least {MIN_FIELDS} fields, found {}",
                    fields.len()
                ),
            });
        }

        let bit_score = match fields.get(BIT_SCORE_COLUMN) {
            Some(s) if !s.is_empty() => Some(parse_column(s, "bit score", line_num)?),
            _ => None,
        };

        let rank = if hits.is_empty() {
            HitRank::Best
        } else {
            HitRank::RunnerUp
        };

        hits.push(AlignmentHit {
            target_id: fields[TARGET_COLUMN].to_string(),
            identity: parse_column(fields[IDENTITY_COLUMN], "identity", line_num)?,
            start: parse_column(fields[TARGET_START_COLUMN], "target start", line_num)?,
            end: parse_column(fields[TARGET_END_COLUMN], "target end", line_num)?,
            e_value: parse_column(fields[E_VALUE_COLUMN], "e-value", line_num)?,
            bit_score,
            rank,
        });
    }

    Ok(hits)
}

fn parse_column<T: std::str::FromStr>(
    value: &str,
    column: &str,
    line_num: usize,
) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidHitTable {
        line: line_num,
        message: format!("invalid {column}: '{value}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_HITS: &str = "r1\tENST0001\t98.50\t100\t1\t0\t1\t100\t201\t300\t3.2e-45\t180.0\n\
r1\tENST0002\t91.00\t100\t9\t0\t1\t100\t900\t801\t1.0e-20\t95.5\n";

    #[test]
    fn test_parse_hit_table() {
        let hits = parse_hit_table(TWO_HITS).unwrap();
        assert_eq!(hits.len(), 2);

        assert_eq!(hits[0].target_id, "ENST0001");
        assert_eq!(hits[0].start, 201);
        assert_eq!(hits[0].end, 300);
        assert!((hits[0].identity - 98.5).abs() < 1e-9);
        assert!((hits[0].e_value - 3.2e-45).abs() < 1e-50);
        assert_eq!(hits[0].bit_score, Some(180.0));
        assert_eq!(hits[0].rank, HitRank::Best);

        assert!(hits[1].is_reverse());
        assert_eq!(hits[1].rank, HitRank::RunnerUp);
    }

    #[test]
    fn test_empty_table_has_no_hits() {
        assert!(parse_hit_table("").unwrap().is_empty());
        assert!(parse_hit_table("\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_comments_skipped() {
        let text = "# BLAT 36\n# Fields: query, subject\n\
r1\tt9\t100.00\t50\t0\t0\t1\t50\t11\t60\t1e-10\n";
        let hits = parse_hit_table(text).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].bit_score, None);
    }

    #[test]
    fn test_too_few_fields() {
        let err = parse_hit_table("r1\tt1\t99.0\n").unwrap_err();
        match err {
            ParseError::InvalidHitTable { line, .. } => assert_eq!(line, 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_coordinate() {
        let text = "r1\tt1\t99.0\t50\t0\t0\t1\t50\tstart\t60\t1e-10\t80\n";
        let err = parse_hit_table(text).unwrap_err();
        assert!(err.to_string().contains("target start"));
    }
}
