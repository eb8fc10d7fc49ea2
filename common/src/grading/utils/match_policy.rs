use crate::grading::utils::bounding_box::BoundingBox;
use crate::utils::log_entry::grading::GradingEntry;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.5;

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct MatchPolicy {
    pub threshold: f64,
    /// Only pair boxes carrying the same label.
    pub class_aware: bool,
}

impl MatchPolicy {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            class_aware: false,
        }
    }

    pub fn class_aware(mut self, class_aware: bool) -> Self {
        self.class_aware = class_aware;
        self
    }

    pub fn validate(&self) -> Result<(), GradingEntry> {
        if self.threshold.is_finite() && (0.0..=1.0).contains(&self.threshold) {
            Ok(())
        } else {
            Err(GradingEntry::InvalidThreshold(self.threshold))
        }
    }

    pub fn is_candidate(&self, submitted: &BoundingBox, ground_truth: &BoundingBox) -> bool {
        !self.class_aware || submitted.label == ground_truth.label
    }
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_THRESHOLD)
    }
}
