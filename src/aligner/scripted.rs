//! In-memory aligner for unit tests.

use std::collections::HashMap;

use crate::aligner::{Aligner, AlignerError};
use crate::core::alignment::{AlignmentHit, AlignmentResult};
use crate::core::read::ReadRecord;

/// Returns canned results keyed by read identifier; unknown reads get no hits.
#[derive(Debug, Default)]
pub struct ScriptedAligner {
    results: HashMap<String, AlignmentResult>,
    failing: Option<String>,
    pub calls: Vec<String>,
}

impl ScriptedAligner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `read_id` align uniquely to `target` at `start..end`
    pub fn unique(mut self, read_id: &str, target: &str, start: u64, end: u64) -> Self {
        let hit = AlignmentHit::new(target, start, end);
        self.results
            .insert(read_id.to_string(), AlignmentResult::from_hits(vec![hit]));
        self
    }

    /// Make `read_id` align to two targets
    pub fn ambiguous(mut self, read_id: &str) -> Self {
        let hits = vec![
            AlignmentHit::new("multi_a", 1, 50),
            AlignmentHit::new("multi_b", 1, 50),
        ];
        self.results
            .insert(read_id.to_string(), AlignmentResult::from_hits(hits));
        self
    }

    /// Make the aligner fail when it sees `read_id`
    pub fn failing_on(mut self, read_id: &str) -> Self {
        self.failing = Some(read_id.to_string());
        self
    }
}

impl Aligner for ScriptedAligner {
    fn align(
        &mut self,
        _reference: &str,
        read: &ReadRecord,
    ) -> Result<AlignmentResult, AlignerError> {
        self.calls.push(read.id.clone());

        if self.failing.as_deref() == Some(read.id.as_str()) {
            return Err(AlignerError::Failed {
                read_id: read.id.clone(),
                status: "exit status: 1".to_string(),
                stderr: "scripted failure".to_string(),
            });
        }

        Ok(self.results.get(&read.id).cloned().unwrap_or_default())
    }
}
