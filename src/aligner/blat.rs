//! External aligner adapter.
//!
//! Each call writes the read to a one-record FASTA file inside a fresh
//! temporary directory, runs
//!
//! ```text
//! <executable> [args...] <reference_dir>/<reference> <query.fa> -out=blast8 <hits.m8>
//! ```
//!
//! and parses the BLAST tabular result. The directory is removed when the
//! call returns, on both success and failure paths.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use noodles::fasta;
use noodles::fasta::record::{Definition, Sequence};
use tracing::debug;

use crate::aligner::{Aligner, AlignerError};
use crate::core::alignment::AlignmentResult;
use crate::core::read::ReadRecord;
use crate::parsing::blast8::parse_hit_table_file;
use crate::utils::validation::validate_reference_name;

/// Default aligner executable
pub const DEFAULT_EXECUTABLE: &str = "blat";

/// Default directory reference names are resolved against
pub const DEFAULT_REFERENCE_DIR: &str = "reference_sequences";

const QUERY_FILE: &str = "query.fa";
const RESULT_FILE: &str = "hits.m8";
const OUTPUT_FORMAT_ARG: &str = "-out=blast8";

/// How to launch the external aligner
#[derive(Debug, Clone)]
pub struct BlatConfig {
    /// Program to run
    pub executable: PathBuf,
    /// Arguments placed before the reference path
    pub args: Vec<String>,
    /// Directory containing the reference sequences
    pub reference_dir: PathBuf,
    /// Where per-call temporary directories are created (system default if unset)
    pub scratch_dir: Option<PathBuf>,
}

impl Default for BlatConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from(DEFAULT_EXECUTABLE),
            args: Vec::new(),
            reference_dir: PathBuf::from(DEFAULT_REFERENCE_DIR),
            scratch_dir: None,
        }
    }
}

/// Runs the external aligner once per read
#[derive(Debug)]
pub struct BlatAligner {
    config: BlatConfig,
    calls: usize,
}

impl BlatAligner {
    pub fn new(config: BlatConfig) -> Self {
        Self { config, calls: 0 }
    }

    pub fn config(&self) -> &BlatConfig {
        &self.config
    }

    /// Number of times the aligner process has been launched
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Resolve a reference name inside the reference directory.
    ///
    /// # Errors
    ///
    /// Returns `AlignerError::InvalidReference` if the name could escape the
    /// directory, or `AlignerError::ReferenceNotFound` if no such file exists.
    pub fn reference_path(&self, reference: &str) -> Result<PathBuf, AlignerError> {
        let name = validate_reference_name(reference)?;
        let path = self.config.reference_dir.join(name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(AlignerError::ReferenceNotFound(path))
        }
    }

    fn scratch_dir(&self) -> std::io::Result<tempfile::TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("libguess-");
        match &self.config.scratch_dir {
            Some(dir) => builder.tempdir_in(dir),
            None => builder.tempdir(),
        }
    }

    fn run(
        &self,
        reference: &Path,
        query: &Path,
        output: &Path,
        read_id: &str,
    ) -> Result<(), AlignerError> {
        let result = Command::new(&self.config.executable)
            .args(&self.config.args)
            .arg(reference)
            .arg(query)
            .arg(OUTPUT_FORMAT_ARG)
            .arg(output)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| AlignerError::Launch {
                program: self.config.executable.display().to_string(),
                read_id: read_id.to_string(),
                source,
            })?;

        if !result.status.success() {
            return Err(AlignerError::Failed {
                read_id: read_id.to_string(),
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        if !output.is_file() {
            return Err(AlignerError::MissingOutput {
                read_id: read_id.to_string(),
            });
        }

        Ok(())
    }
}

impl Aligner for BlatAligner {
    fn align(
        &mut self,
        reference: &str,
        read: &ReadRecord,
    ) -> Result<AlignmentResult, AlignerError> {
        let reference_path = self.reference_path(reference)?;

        let artifact_error = |source| AlignerError::Artifact {
            read_id: read.id.clone(),
            source,
        };
        let unparseable = |source| AlignerError::UnparseableOutput {
            read_id: read.id.clone(),
            source,
        };

        // Dropped at the end of this call, removing both artifacts
        let workdir = self.scratch_dir().map_err(artifact_error)?;
        let query = workdir.path().join(QUERY_FILE);
        let output = workdir.path().join(RESULT_FILE);

        write_query(&query, read).map_err(artifact_error)?;

        self.calls += 1;
        self.run(&reference_path, &query, &output, &read.id)?;

        let hits = parse_hit_table_file(&output).map_err(unparseable)?;
        let result = AlignmentResult::from_hits(hits);

        if let Some(best) = &result.best {
            debug!(
                read = %read.id,
                hits = result.hit_count,
                target = %best.target_id,
                identity = best.identity,
                start = best.start,
                end = best.end,
                e_value = best.e_value,
                runner_up_e_value = result.runner_up.as_ref().map(|h| h.e_value),
                "Aligned read"
            );
        } else {
            debug!(read = %read.id, "No hits");
        }

        Ok(result)
    }
}

/// Write a read as a single-record FASTA file
fn write_query(path: &Path, read: &ReadRecord) -> std::io::Result<()> {
    let mut writer = fasta::io::Writer::new(Vec::new());
    let record = fasta::Record::new(
        Definition::new(read.id.as_str(), None),
        Sequence::from(read.sequence.clone()),
    );
    writer.write_record(&record)?;
    std::fs::write(path, writer.get_ref())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// A stand-in aligner: copies `<dir>/<read id>.m8` to the output path,
    /// or exits non-zero for reads named `boom`.
    const FAKE_ALIGNER: &str = r#"
dir=$(dirname "$0")
id=$(head -n 1 "$2" | cut -c 2- | cut -d ' ' -f 1)
cp "$2" "$dir/last_query.fa"
if [ "$id" = "boom" ]; then
  echo "simulated crash" >&2
  exit 3
fi
if [ "$id" = "silent" ]; then
  exit 0
fi
if [ -f "$dir/$id.m8" ]; then
  cp "$dir/$id.m8" "$4"
else
  : > "$4"
fi
"#;

    struct Fixture {
        dir: TempDir,
        scratch: TempDir,
        aligner: BlatAligner,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let script = dir.path().join("fake_blat.sh");
        fs::write(&script, FAKE_ALIGNER).unwrap();
        fs::write(dir.path().join("tx.fa"), ">t1\nACGT\n").unwrap();

        let aligner = BlatAligner::new(BlatConfig {
            executable: PathBuf::from("/bin/sh"),
            args: vec![script.display().to_string()],
            reference_dir: dir.path().to_path_buf(),
            scratch_dir: Some(scratch.path().to_path_buf()),
        });

        Fixture {
            dir,
            scratch,
            aligner,
        }
    }

    fn write_hits(fixture: &Fixture, read_id: &str, rows: &str) {
        fs::write(fixture.dir.path().join(format!("{read_id}.m8")), rows).unwrap();
    }

    #[test]
    fn test_unique_hit() {
        let mut fx = fixture();
        write_hits(
            &fx,
            "r1",
            "r1\tENST1\t99.0\t50\t0\t0\t1\t50\t101\t150\t1e-20\t90\n",
        );

        let read = ReadRecord::new("r1", b"ACGTACGT".to_vec());
        let result = fx.aligner.align("tx.fa", &read).unwrap();

        assert!(result.is_unique());
        let hit = result.unique_hit().unwrap();
        assert_eq!(hit.target_id, "ENST1");
        assert_eq!((hit.start, hit.end), (101, 150));
        assert_eq!(fx.aligner.calls(), 1);
    }

    #[test]
    fn test_query_payload_is_fasta() {
        let mut fx = fixture();
        let read = ReadRecord::new("r9", b"GATTACA".to_vec());
        fx.aligner.align("tx.fa", &read).unwrap();

        let payload = fs::read_to_string(fx.dir.path().join("last_query.fa")).unwrap();
        assert_eq!(payload, ">r9\nGATTACA\n");
    }

    #[test]
    fn test_zero_hits_is_not_an_error() {
        let mut fx = fixture();
        let read = ReadRecord::new("nohits", b"ACGT".to_vec());
        let result = fx.aligner.align("tx.fa", &read).unwrap();
        assert_eq!(result.hit_count, 0);
        assert!(result.best.is_none());
    }

    #[test]
    fn test_multiple_hits_counted() {
        let mut fx = fixture();
        write_hits(
            &fx,
            "multi",
            "multi\tA\t99\t50\t0\t0\t1\t50\t1\t50\t1e-20\t90\n\
multi\tB\t97\t50\t1\t0\t1\t50\t80\t31\t1e-18\t85\n\
multi\tC\t95\t50\t2\t0\t1\t50\t7\t56\t1e-15\t80\n",
        );
        let read = ReadRecord::new("multi", b"ACGT".to_vec());
        let result = fx.aligner.align("tx.fa", &read).unwrap();
        assert_eq!(result.hit_count, 3);
        assert!(result.unique_hit().is_none());
        assert_eq!(result.runner_up.unwrap().target_id, "B");
    }

    #[test]
    fn test_process_failure_is_error() {
        let mut fx = fixture();
        let read = ReadRecord::new("boom", b"ACGT".to_vec());
        let err = fx.aligner.align("tx.fa", &read).unwrap_err();

        assert!(matches!(err, AlignerError::Failed { .. }));
        assert_eq!(err.read_id(), Some("boom"));
        assert!(err.to_string().contains("simulated crash"));
    }

    #[test]
    fn test_missing_output_is_error() {
        let mut fx = fixture();
        let read = ReadRecord::new("silent", b"ACGT".to_vec());
        let err = fx.aligner.align("tx.fa", &read).unwrap_err();
        assert!(matches!(err, AlignerError::MissingOutput { .. }));
    }

    #[test]
    fn test_garbage_output_is_error() {
        let mut fx = fixture();
        write_hits(&fx, "junk", "this is not a hit table\n");
        let read = ReadRecord::new("junk", b"ACGT".to_vec());
        let err = fx.aligner.align("tx.fa", &read).unwrap_err();
        assert!(matches!(err, AlignerError::UnparseableOutput { .. }));
    }

    #[test]
    fn test_artifacts_removed_after_each_call() {
        let mut fx = fixture();
        let ok = ReadRecord::new("r1", b"ACGT".to_vec());
        let bad = ReadRecord::new("boom", b"ACGT".to_vec());

        fx.aligner.align("tx.fa", &ok).unwrap();
        assert!(fx.aligner.align("tx.fa", &bad).is_err());

        let leftovers = fs::read_dir(fx.scratch.path()).unwrap().count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_reference_resolution() {
        let mut fx = fixture();
        let read = ReadRecord::new("r1", b"ACGT".to_vec());

        let err = fx.aligner.align("missing.fa", &read).unwrap_err();
        assert!(matches!(err, AlignerError::ReferenceNotFound(_)));

        let err = fx.aligner.align("../tx.fa", &read).unwrap_err();
        assert!(matches!(err, AlignerError::InvalidReference(_)));
        assert_eq!(fx.aligner.calls(), 0);
    }

    #[test]
    fn test_launch_failure() {
        let fx = fixture();
        let mut aligner = BlatAligner::new(BlatConfig {
            executable: PathBuf::from("/nonexistent/aligner-binary"),
            ..fx.aligner.config().clone()
        });
        let read = ReadRecord::new("r1", b"ACGT".to_vec());
        let err = aligner.align("tx.fa", &read).unwrap_err();
        assert!(matches!(err, AlignerError::Launch { .. }));
    }
}
