//! Library-type decision rule.
//!
//! Single-end: the forward/reverse ratio decides between SF, SR and U.
//! Paired-end: whichever of inward and outward pairs is more common selects
//! the family, then the forward/reverse ratio within that family decides.
//! Equal inward and outward totals leave the verdict undetermined.

use serde::{Deserialize, Serialize};

use crate::core::tally::CategoryTally;
use crate::core::types::{LibraryType, SamplingMode};
use crate::sampling::engine::{DiscardCounts, SamplingReport, Termination};

/// Ratio used when there are no reverse observations
pub const RATIO_SENTINEL: f64 = 9.0;

/// Forward/reverse ratio above which a library is called stranded-forward
pub const DEFAULT_STRANDED_RATIO: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionThresholds {
    /// Ratio above which a library is stranded-forward; its inverse is the
    /// stranded-reverse cutoff
    pub stranded_ratio: f64,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            stranded_ratio: DEFAULT_STRANDED_RATIO,
        }
    }
}

/// Strandedness implied by a forward/reverse ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strandedness {
    Forward,
    Reverse,
    Unstranded,
}

/// Forward over reverse, or [`RATIO_SENTINEL`] when `reverse` is zero
#[must_use]
#[allow(clippy::cast_precision_loss)] // Tallies are small counts
pub fn strand_ratio(forward: usize, reverse: usize) -> f64 {
    if reverse == 0 {
        RATIO_SENTINEL
    } else {
        forward as f64 / reverse as f64
    }
}

fn strandedness(forward: usize, reverse: usize, thresholds: &DecisionThresholds) -> Strandedness {
    let ratio = strand_ratio(forward, reverse);
    if ratio > thresholds.stranded_ratio {
        Strandedness::Forward
    } else if ratio < 1.0 / thresholds.stranded_ratio {
        Strandedness::Reverse
    } else {
        Strandedness::Unstranded
    }
}

/// Decide the library type of single-end reads
#[must_use]
pub fn decide_single(
    forward: usize,
    reverse: usize,
    thresholds: &DecisionThresholds,
) -> LibraryType {
    match strandedness(forward, reverse, thresholds) {
        Strandedness::Forward => LibraryType::StrandedForward,
        Strandedness::Reverse => LibraryType::StrandedReverse,
        Strandedness::Unstranded => LibraryType::Unstranded,
    }
}

/// Decide the library type of paired-end reads
#[must_use]
pub fn decide_paired(tally: &CategoryTally, thresholds: &DecisionThresholds) -> LibraryType {
    let inward = tally.inward_total();
    let outward = tally.outward_total();

    if inward > outward {
        match strandedness(tally.inward_forward, tally.inward_reverse, thresholds) {
            Strandedness::Forward => LibraryType::InwardStrandedForward,
            Strandedness::Reverse => LibraryType::InwardStrandedReverse,
            Strandedness::Unstranded => LibraryType::InwardUnstranded,
        }
    } else if outward > inward {
        match strandedness(tally.outward_forward, tally.outward_reverse, thresholds) {
            Strandedness::Forward => LibraryType::OutwardStrandedForward,
            Strandedness::Reverse => LibraryType::OutwardStrandedReverse,
            Strandedness::Unstranded => LibraryType::OutwardUnstranded,
        }
    } else {
        LibraryType::Undetermined
    }
}

/// Decide the library type for the given mode
#[must_use]
pub fn decide(
    mode: SamplingMode,
    tally: &CategoryTally,
    thresholds: &DecisionThresholds,
) -> LibraryType {
    match mode {
        SamplingMode::Single => decide_single(tally.forward, tally.reverse, thresholds),
        SamplingMode::Paired => decide_paired(tally, thresholds),
    }
}

/// Final outcome of a sampling run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryTypeVerdict {
    pub mode: SamplingMode,
    pub label: LibraryType,
    /// True iff enough confident observations were collected
    pub success: bool,
    pub termination: Termination,
    pub attempts: usize,
    pub tally: CategoryTally,
    pub discarded: DiscardCounts,
}

impl LibraryTypeVerdict {
    /// Apply the decision rule to a finished run.
    ///
    /// Runs that stopped before reaching their target report their partial
    /// tallies with an undetermined label.
    #[must_use]
    pub fn from_report(report: &SamplingReport, thresholds: &DecisionThresholds) -> Self {
        let success = report.termination == Termination::Succeeded;
        let label = if success {
            decide(report.mode, &report.tally, thresholds)
        } else {
            LibraryType::Undetermined
        };

        Self {
            mode: report.mode,
            label,
            success,
            termination: report.termination,
            attempts: report.attempts,
            tally: report.tally,
            discarded: report.discarded,
        }
    }
}
