use serde::{Deserialize, Serialize};

use crate::core::types::OrientationCategory;

/// Per-category counts collected during one sampling run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryTally {
    pub forward: usize,
    pub reverse: usize,
    pub inward_forward: usize,
    pub inward_reverse: usize,
    pub outward_forward: usize,
    pub outward_reverse: usize,
    pub unclassified: usize,
}

impl CategoryTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one observation
    pub fn record(&mut self, category: OrientationCategory) {
        let slot = match category {
            OrientationCategory::Forward => &mut self.forward,
            OrientationCategory::Reverse => &mut self.reverse,
            OrientationCategory::InwardForward => &mut self.inward_forward,
            OrientationCategory::InwardReverse => &mut self.inward_reverse,
            OrientationCategory::OutwardForward => &mut self.outward_forward,
            OrientationCategory::OutwardReverse => &mut self.outward_reverse,
            OrientationCategory::Unclassified => &mut self.unclassified,
        };
        *slot += 1;
    }

    /// Observations that landed in a classified category
    #[must_use]
    pub fn confident(&self) -> usize {
        self.forward + self.reverse + self.inward_total() + self.outward_total()
    }

    #[must_use]
    pub fn inward_total(&self) -> usize {
        self.inward_forward + self.inward_reverse
    }

    #[must_use]
    pub fn outward_total(&self) -> usize {
        self.outward_forward + self.outward_reverse
    }
}

impl std::fmt::Display for CategoryTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "F: {}, R: {}, IF: {}, IR: {}, OF: {}, OR: {}, unclassified: {}",
            self.forward,
            self.reverse,
            self.inward_forward,
            self.inward_reverse,
            self.outward_forward,
            self.outward_reverse,
            self.unclassified
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_confident() {
        let mut tally = CategoryTally::new();
        tally.record(OrientationCategory::InwardForward);
        tally.record(OrientationCategory::InwardForward);
        tally.record(OrientationCategory::OutwardReverse);
        tally.record(OrientationCategory::Unclassified);

        assert_eq!(tally.inward_forward, 2);
        assert_eq!(tally.inward_total(), 2);
        assert_eq!(tally.outward_total(), 1);
        assert_eq!(tally.unclassified, 1);
        assert_eq!(tally.confident(), 3);
    }

    #[test]
    fn test_display() {
        let mut tally = CategoryTally::new();
        tally.record(OrientationCategory::Forward);
        assert_eq!(
            tally.to_string(),
            "F: 1, R: 0, IF: 0, IR: 0, OF: 0, OR: 0, unclassified: 0"
        );
    }
}
