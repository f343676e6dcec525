//! Orientation classifier.
//!
//! Single reads are classified by the direction of their alignment on the
//! target. Pairs are classified by the strands of both mates and by the
//! distance between their midpoints:
//!
//! | Read 1  | Read 2  | Midpoint delta (r2 - r1)        | Category       |
//! |---------|---------|---------------------------------|----------------|
//! | forward | reverse | `0 < d < inward_max`            | InwardForward  |
//! | forward | reverse | `d < -outward_min`              | OutwardForward |
//! | reverse | forward | `-inward_max < d < 0`           | InwardReverse  |
//! | reverse | forward | `d > outward_min`               | OutwardReverse |
//!
//! Everything else, including same-strand pairs, is `Unclassified`.

use serde::{Deserialize, Serialize};

use crate::core::alignment::AlignmentHit;
use crate::core::types::OrientationCategory;

/// Largest midpoint distance accepted for inward-facing mates
pub const DEFAULT_INWARD_MAX_DISTANCE: f64 = 1000.0;

/// Smallest midpoint distance accepted for outward-facing mates
pub const DEFAULT_OUTWARD_MIN_DISTANCE: f64 = 750.0;

/// Distance cutoffs for pair classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationThresholds {
    pub inward_max_distance: f64,
    pub outward_min_distance: f64,
}

impl Default for OrientationThresholds {
    fn default() -> Self {
        Self {
            inward_max_distance: DEFAULT_INWARD_MAX_DISTANCE,
            outward_min_distance: DEFAULT_OUTWARD_MIN_DISTANCE,
        }
    }
}

/// Classify a single read by its alignment direction
#[must_use]
pub fn classify_read(start: u64, end: u64) -> OrientationCategory {
    match start.cmp(&end) {
        std::cmp::Ordering::Less => OrientationCategory::Forward,
        std::cmp::Ordering::Greater => OrientationCategory::Reverse,
        std::cmp::Ordering::Equal => OrientationCategory::Unclassified,
    }
}

/// Distance from the midpoint of read 1 to the midpoint of read 2
#[must_use]
#[allow(clippy::cast_precision_loss)] // Transcript coordinates are far below 2^52
pub fn midpoint_delta(start1: u64, end1: u64, start2: u64, end2: u64) -> f64 {
    (start2 as f64 + end2 as f64) / 2.0 - (start1 as f64 + end1 as f64) / 2.0
}

/// Classify a read pair from the coordinates of both mates
#[must_use]
pub fn classify_pair(
    start1: u64,
    end1: u64,
    start2: u64,
    end2: u64,
    thresholds: &OrientationThresholds,
) -> OrientationCategory {
    let delta = midpoint_delta(start1, end1, start2, end2);
    let inward = thresholds.inward_max_distance;
    let outward = thresholds.outward_min_distance;

    let first = classify_read(start1, end1);
    let second = classify_read(start2, end2);

    match (first, second) {
        (OrientationCategory::Forward, OrientationCategory::Reverse) => {
            if delta > 0.0 && delta < inward {
                OrientationCategory::InwardForward
            } else if delta < -outward {
                OrientationCategory::OutwardForward
            } else {
                OrientationCategory::Unclassified
            }
        }
        (OrientationCategory::Reverse, OrientationCategory::Forward) => {
            if delta < 0.0 && delta > -inward {
                OrientationCategory::InwardReverse
            } else if delta > outward {
                OrientationCategory::OutwardReverse
            } else {
                OrientationCategory::Unclassified
            }
        }
        _ => OrientationCategory::Unclassified,
    }
}

/// Classify a read pair from the two unique hits
#[must_use]
pub fn classify_hits(
    first: &AlignmentHit,
    second: &AlignmentHit,
    thresholds: &OrientationThresholds,
) -> OrientationCategory {
    classify_pair(first.start, first.end, second.start, second.end, thresholds)
}
