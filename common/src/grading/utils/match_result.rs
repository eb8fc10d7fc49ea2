use serde::{Deserialize, Serialize};

/// One submitted box paired with the ground-truth box it was credited for.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct MatchPair {
    pub submitted: usize,
    pub ground_truth: usize,
    pub iou: f64,
}

/// Outcome of one grading pass. Metrics are rounded to two decimals.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub total_ground_truth: usize,
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub matches: Vec<MatchPair>,
}

impl MatchResult {
    pub fn new(total_ground_truth: usize, matches: Vec<MatchPair>, false_positives: usize) -> Self {
        let true_positives = matches.len();
        let false_negatives = total_ground_truth.saturating_sub(true_positives);
        let precision = ratio(true_positives, true_positives + false_positives);
        let recall = ratio(true_positives, total_ground_truth);
        // derived from the unrounded pair
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };
        Self {
            total_ground_truth,
            true_positives,
            false_positives,
            false_negatives,
            precision: round_two_decimals(precision),
            recall: round_two_decimals(recall),
            f1: round_two_decimals(f1),
            matches,
        }
    }

    /// The single scalar surfaced to students.
    #[inline(always)]
    pub fn score(&self) -> f64 {
        self.f1
    }

    pub fn matched_ground_truth(&self) -> Vec<usize> {
        let mut indices = self.matches.iter().map(|pair| pair.ground_truth).collect::<Vec<usize>>();
        indices.sort_unstable();
        indices
    }

    pub fn report(&self) -> GradingReport {
        GradingReport {
            total_lesions: self.total_ground_truth,
            correct_detections: self.true_positives,
            false_positives: self.false_positives,
            missed_lesions: self.false_negatives,
            precision: self.precision,
            recall: self.recall,
            f1: self.f1,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GradingReport {
    pub total_lesions: usize,
    pub correct_detections: usize,
    pub false_positives: usize,
    pub missed_lesions: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Exact halves go to the even cent: 0.125 reports as 0.12, 0.375 as 0.38.
pub fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
