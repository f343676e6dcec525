use serde::{Deserialize, Serialize};

/// Position of a hit in the aligner's best-first ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitRank {
    Best,
    RunnerUp,
}

/// One row of the aligner's hit table.
///
/// `start` and `end` are 1-based coordinates on the reference target.
/// A hit with `start > end` lies on the reverse strand of the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentHit {
    /// Reference target (transcript) the read aligned to
    pub target_id: String,

    /// Percent identity as reported by the aligner
    pub identity: f64,

    /// Target coordinate where the alignment starts
    pub start: u64,

    /// Target coordinate where the alignment ends
    pub end: u64,

    /// Expectation value of the hit
    pub e_value: f64,

    /// Bit score, when the table carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_score: Option<f64>,

    pub rank: HitRank,
}

impl AlignmentHit {
    pub fn new(target_id: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            target_id: target_id.into(),
            identity: 100.0,
            start,
            end,
            e_value: 0.0,
            bit_score: None,
            rank: HitRank::Best,
        }
    }

    #[must_use]
    pub fn with_rank(mut self, rank: HitRank) -> Self {
        self.rank = rank;
        self
    }

    /// True when the read runs along the target in increasing coordinates
    #[must_use]
    pub fn is_forward(&self) -> bool {
        self.start < self.end
    }

    /// True when the read runs along the target in decreasing coordinates
    #[must_use]
    pub fn is_reverse(&self) -> bool {
        self.start > self.end
    }

    /// Midpoint of the aligned span on the target
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Transcript coordinates are far below 2^52
    pub fn midpoint(&self) -> f64 {
        (self.start as f64 + self.end as f64) / 2.0
    }
}

/// Outcome of aligning one read.
///
/// Only a result with exactly one hit is usable evidence. Zero hits and
/// multiple hits are both treated as ambiguous and discarded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlignmentResult {
    /// Number of rows the aligner reported
    pub hit_count: usize,

    /// First row, present iff `hit_count >= 1`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best: Option<AlignmentHit>,

    /// Second row, present iff `hit_count >= 2`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runner_up: Option<AlignmentHit>,
}

impl AlignmentResult {
    /// A result with no hits
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a result from the hit rows, which must already be ordered best-first
    #[must_use]
    pub fn from_hits(hits: Vec<AlignmentHit>) -> Self {
        let hit_count = hits.len();
        let mut rows = hits.into_iter();
        let best = rows.next().map(|h| h.with_rank(HitRank::Best));
        let runner_up = rows.next().map(|h| h.with_rank(HitRank::RunnerUp));

        Self {
            hit_count,
            best,
            runner_up,
        }
    }

    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.hit_count == 1
    }

    /// The single hit, if and only if the read aligned uniquely
    #[must_use]
    pub fn unique_hit(&self) -> Option<&AlignmentHit> {
        if self.is_unique() {
            self.best.as_ref()
        } else {
            None
        }
    }
}
