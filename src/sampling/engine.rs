use std::io::BufRead;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::aligner::Aligner;
use crate::core::alignment::AlignmentHit;
use crate::core::read::ReadRecord;
use crate::core::tally::CategoryTally;
use crate::core::types::{OrientationCategory, SamplingMode};
use crate::parsing::fastq::StreamCursor;
use crate::sampling::classify::{classify_hits, classify_read};
use crate::sampling::config::SamplingConfig;
use crate::sampling::decision::LibraryTypeVerdict;
use crate::sampling::mate::{MateLocator, MateLookup};
use crate::sampling::FailureKind;

/// Why a sampling run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The confident-observation target was reached
    Succeeded,
    /// The attempt budget ran out first
    BudgetExhausted,
    /// The first read file ran out first
    EndOfStream,
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Succeeded => write!(f, "succeeded"),
            Self::BudgetExhausted => write!(f, "budget exhausted"),
            Self::EndOfStream => write!(f, "end of stream"),
        }
    }
}

/// Evidence that was thrown away, by reason
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DiscardCounts {
    /// Read 1 aligned to zero or several targets
    pub ambiguous: usize,
    /// No mate with the same identifier within the lookahead window
    pub mate_not_found: usize,
    /// The mate aligned to zero or several targets
    pub mate_ambiguous: usize,
    /// The mates aligned uniquely but to different targets
    pub target_mismatch: usize,
}

/// Counts collected by one sampling run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplingReport {
    pub mode: SamplingMode,
    pub termination: Termination,
    /// Read-1 alignment attempts spent
    pub attempts: usize,
    /// Records of the first file consumed, including skipped ones
    pub stream_offset: u64,
    pub tally: CategoryTally,
    pub discarded: DiscardCounts,
}

impl SamplingReport {
    fn new(mode: SamplingMode) -> Self {
        Self {
            mode,
            termination: Termination::BudgetExhausted,
            attempts: 0,
            stream_offset: 0,
            tally: CategoryTally::default(),
            discarded: DiscardCounts::default(),
        }
    }

    fn fail(&self, kind: FailureKind) -> SamplingError {
        SamplingError {
            kind,
            attempts: self.attempts,
            tally: self.tally,
        }
    }
}

/// A fatal error together with what had been collected before it happened
#[derive(Error, Debug)]
#[error("{kind} (after {attempts} attempts; partial tallies: {tally})")]
pub struct SamplingError {
    #[source]
    pub kind: FailureKind,
    pub attempts: usize,
    pub tally: CategoryTally,
}

impl From<FailureKind> for SamplingError {
    fn from(kind: FailureKind) -> Self {
        Self {
            kind,
            attempts: 0,
            tally: CategoryTally::default(),
        }
    }
}

/// The read files of one run
#[derive(Debug, Clone)]
pub struct ReadInputs {
    pub first: PathBuf,
    /// Mate file; present iff the run is paired-end
    pub second: Option<PathBuf>,
}

impl ReadInputs {
    pub fn single(first: impl Into<PathBuf>) -> Self {
        Self {
            first: first.into(),
            second: None,
        }
    }

    pub fn paired(first: impl Into<PathBuf>, second: impl Into<PathBuf>) -> Self {
        Self {
            first: first.into(),
            second: Some(second.into()),
        }
    }

    pub fn mode(&self) -> SamplingMode {
        if self.second.is_some() {
            SamplingMode::Paired
        } else {
            SamplingMode::Single
        }
    }
}

/// Drives the aligner over sampled reads until a verdict can be made
pub struct SamplingEngine<A> {
    aligner: A,
    config: SamplingConfig,
}

impl<A: Aligner> SamplingEngine<A> {
    pub fn new(aligner: A, config: SamplingConfig) -> Self {
        Self { aligner, config }
    }

    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    pub fn aligner(&self) -> &A {
        &self.aligner
    }

    /// Sample the given read files and decide their library type.
    ///
    /// # Errors
    ///
    /// Returns a `SamplingError` if a read file is malformed or the aligner
    /// fails; the error carries the tallies collected up to that point.
    pub fn infer(
        &mut self,
        reference: &str,
        inputs: &ReadInputs,
    ) -> Result<LibraryTypeVerdict, SamplingError> {
        let mut cursor = StreamCursor::open(&inputs.first, self.config.start_offset)
            .map_err(FailureKind::from)?;

        let report = match &inputs.second {
            None => self.run_single(reference, &mut cursor)?,
            Some(path) => {
                let mates = MateLocator::new(path, self.config.mate_lookahead)
                    .with_strip_mate_suffix(self.config.strip_mate_suffix);
                self.run_paired(reference, &mut cursor, &mates)?
            }
        };

        let verdict = LibraryTypeVerdict::from_report(&report, &self.config.decision);
        info!(
            label = %verdict.label,
            success = verdict.success,
            tally = %verdict.tally,
            "Library type decided"
        );
        Ok(verdict)
    }

    /// Sample single-end reads.
    ///
    /// # Errors
    ///
    /// Returns a `SamplingError` if the read file is malformed or the aligner fails.
    pub fn run_single<R: BufRead>(
        &mut self,
        reference: &str,
        cursor: &mut StreamCursor<R>,
    ) -> Result<SamplingReport, SamplingError> {
        self.sample(SamplingMode::Single, reference, cursor, |_, read, hit, _| {
            let category = classify_read(hit.start, hit.end);
            debug!(read = %read.id, start = hit.start, end = hit.end, %category, "Classified read");
            Ok(Some(category))
        })
    }

    /// Sample paired-end reads, looking up each uniquely aligned read's mate.
    ///
    /// # Errors
    ///
    /// Returns a `SamplingError` if either read file is malformed or the aligner fails.
    pub fn run_paired<R: BufRead>(
        &mut self,
        reference: &str,
        cursor: &mut StreamCursor<R>,
        mates: &MateLocator,
    ) -> Result<SamplingReport, SamplingError> {
        let thresholds = self.config.orientation;

        self.sample(SamplingMode::Paired, reference, cursor, |aligner, read, hit, discarded| {
            let lookup = mates.locate(aligner, reference, &read.id)?;
            let MateLookup::Found { result, .. } = lookup else {
                discarded.mate_not_found += 1;
                return Ok(None);
            };

            let Some(mate_hit) = result.unique_hit() else {
                debug!(read = %read.id, hits = result.hit_count, "Mate not uniquely aligned");
                discarded.mate_ambiguous += 1;
                return Ok(None);
            };

            if mate_hit.target_id != hit.target_id {
                debug!(
                    read = %read.id,
                    first = %hit.target_id,
                    second = %mate_hit.target_id,
                    "Mates aligned to different targets"
                );
                discarded.target_mismatch += 1;
                return Ok(None);
            }

            let category = classify_hits(hit, mate_hit, &thresholds);
            debug!(
                read = %read.id,
                delta = mate_hit.midpoint() - hit.midpoint(),
                %category,
                "Classified pair"
            );
            Ok(Some(category))
        })
    }

    /// The shared loop. `observe` turns a uniquely aligned read into a
    /// category, or `None` when the evidence has to be discarded.
    fn sample<R, F>(
        &mut self,
        mode: SamplingMode,
        reference: &str,
        cursor: &mut StreamCursor<R>,
        mut observe: F,
    ) -> Result<SamplingReport, SamplingError>
    where
        R: BufRead,
        F: FnMut(
            &mut A,
            &ReadRecord,
            &AlignmentHit,
            &mut DiscardCounts,
        ) -> Result<Option<OrientationCategory>, FailureKind>,
    {
        let target = self.config.target_confident;
        let budget = self.config.max_attempts;
        let mut report = SamplingReport::new(mode);

        info!(%mode, target, budget, start_offset = cursor.offset(), "Sampling reads");

        let termination = loop {
            if report.tally.confident() >= target {
                break Termination::Succeeded;
            }
            if report.attempts >= budget {
                break Termination::BudgetExhausted;
            }

            let read = match cursor.advance() {
                Ok(Some(read)) => read,
                Ok(None) => break Termination::EndOfStream,
                Err(e) => return Err(report.fail(e.into())),
            };

            report.attempts += 1;
            let result = match self.aligner.align(reference, &read) {
                Ok(result) => result,
                Err(e) => return Err(report.fail(e.into())),
            };

            let Some(hit) = result.unique_hit() else {
                debug!(read = %read.id, hits = result.hit_count, "Discarding ambiguous alignment");
                report.discarded.ambiguous += 1;
                continue;
            };

            match observe(&mut self.aligner, &read, hit, &mut report.discarded) {
                Ok(Some(category)) => report.tally.record(category),
                Ok(None) => {}
                Err(kind) => return Err(report.fail(kind)),
            }
        };

        report.termination = termination;
        report.stream_offset = cursor.offset();

        match termination {
            Termination::Succeeded => info!(
                attempts = report.attempts,
                confident = report.tally.confident(),
                "Collected enough confident observations"
            ),
            Termination::BudgetExhausted => warn!(
                attempts = report.attempts,
                confident = report.tally.confident(),
                target,
                "Attempt budget exhausted before reaching target"
            ),
            Termination::EndOfStream => warn!(
                attempts = report.attempts,
                confident = report.tally.confident(),
                target,
                records = report.stream_offset,
                "Read stream ended before reaching target"
            ),
        }

        Ok(report)
    }
}
