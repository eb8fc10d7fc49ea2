use crate::grading::iou::iou;
use crate::grading::utils::bounding_box::{validate_boxes, BoundingBox, BoxSetKind};
use crate::grading::utils::match_policy::MatchPolicy;
use crate::grading::utils::match_result::{MatchPair, MatchResult};
use crate::utils::log_entry::grading::GradingEntry;

/// Greedy one-to-one matching of submitted boxes against ground truth.
///
/// Submitted boxes are visited in order. Each one takes the unmatched
/// ground-truth box with the highest IoU (lowest index on ties) and counts as a
/// true positive when that IoU reaches `threshold`; otherwise it is a false
/// positive. A ground-truth box is consumed by at most one submission.
///
/// Only malformed input is an error. Empty sets and zero-area boxes resolve to
/// zero metrics.
pub fn grade(ground_truth: &[BoundingBox], submitted: &[BoundingBox], threshold: f64) -> Result<MatchResult, GradingEntry> {
    grade_with_policy(ground_truth, submitted, &MatchPolicy::new(threshold))
}

pub fn grade_with_policy(ground_truth: &[BoundingBox], submitted: &[BoundingBox], policy: &MatchPolicy) -> Result<MatchResult, GradingEntry> {
    policy.validate()?;
    validate_boxes(ground_truth, BoxSetKind::GroundTruth)?;
    validate_boxes(submitted, BoxSetKind::Submitted)?;

    let mut matched = vec![false; ground_truth.len()];
    let mut matches = Vec::new();
    let mut false_positives = 0_usize;
    for (submitted_index, submitted_box) in submitted.iter().enumerate() {
        match best_candidate(ground_truth, &matched, submitted_box, policy) {
            Some((ground_truth_index, overlap)) if overlap >= policy.threshold => {
                matched[ground_truth_index] = true;
                matches.push(MatchPair {
                    submitted: submitted_index,
                    ground_truth: ground_truth_index,
                    iou: overlap,
                });
            }
            _ => false_positives += 1,
        }
    }
    Ok(MatchResult::new(ground_truth.len(), matches, false_positives))
}

fn best_candidate(ground_truth: &[BoundingBox], matched: &[bool], submitted: &BoundingBox, policy: &MatchPolicy) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, candidate) in ground_truth.iter().enumerate() {
        if matched[index] || !policy.is_candidate(submitted, candidate) {
            continue;
        }
        let overlap = iou(submitted, candidate);
        match best {
            // strict: an equal IoU never displaces an earlier index
            Some((_, best_overlap)) if overlap <= best_overlap => {}
            _ => best = Some((index, overlap)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::utils::match_result::GradingReport;

    fn rect(x: f64, y: f64, width: f64, height: f64) -> BoundingBox {
        BoundingBox::new(x, y, width, height)
    }

    #[test]
    fn empty_sets() {
        let result = grade(&[], &[], 0.5).unwrap();
        assert_eq!(result.report(), GradingReport {
            total_lesions: 0,
            correct_detections: 0,
            false_positives: 0,
            missed_lesions: 0,
            precision: 0.0,
            recall: 0.0,
            f1: 0.0,
        });
        assert!(result.matches.is_empty());
    }

    #[test]
    fn missing_submission() {
        let result = grade(&[rect(0.0, 0.0, 10.0, 10.0)], &[], 0.5).unwrap();
        assert_eq!(result.true_positives, 0);
        assert_eq!(result.false_negatives, 1);
        assert_eq!(result.precision, 0.0);
        assert_eq!(result.recall, 0.0);
        assert_eq!(result.f1, 0.0);
    }

    #[test]
    fn nothing_to_find() {
        let result = grade(&[], &[rect(0.0, 0.0, 10.0, 10.0)], 0.5).unwrap();
        assert_eq!(result.true_positives, 0);
        assert_eq!(result.false_positives, 1);
        assert_eq!(result.false_negatives, 0);
        assert_eq!(result.precision, 0.0);
        assert_eq!(result.recall, 0.0);
    }

    #[test]
    fn identical_box() {
        let result = grade(&[rect(0.0, 0.0, 10.0, 10.0)], &[rect(0.0, 0.0, 10.0, 10.0)], 0.5).unwrap();
        assert_eq!((result.true_positives, result.false_positives, result.false_negatives), (1, 0, 0));
        assert_eq!((result.precision, result.recall, result.f1), (1.0, 1.0, 1.0));
        assert_eq!(result.matched_ground_truth(), vec![0]);
    }

    #[test]
    fn disjoint_box() {
        let result = grade(&[rect(0.0, 0.0, 10.0, 10.0)], &[rect(100.0, 100.0, 10.0, 10.0)], 0.5).unwrap();
        assert_eq!((result.true_positives, result.false_positives, result.false_negatives), (0, 1, 1));
        assert_eq!((result.precision, result.recall, result.f1), (0.0, 0.0, 0.0));
    }

    #[test]
    fn threshold_is_inclusive() {
        // IoU is exactly 0.5
        let ground_truth = [rect(0.0, 0.0, 10.0, 10.0)];
        let submitted = [rect(0.0, 0.0, 10.0, 5.0)];
        assert_eq!(grade(&ground_truth, &submitted, 0.5).unwrap().true_positives, 1);
        assert_eq!(grade(&ground_truth, &submitted, 0.51).unwrap().true_positives, 0);
    }

    #[test]
    fn ground_truth_is_used_once() {
        let ground_truth = [rect(0.0, 0.0, 10.0, 10.0)];
        let submitted = [rect(0.0, 0.0, 10.0, 10.0), rect(0.0, 0.0, 10.0, 10.0), rect(1.0, 0.0, 10.0, 10.0)];
        let result = grade(&ground_truth, &submitted, 0.5).unwrap();
        assert_eq!(result.true_positives, 1);
        assert_eq!(result.false_positives, 2);
        assert_eq!(result.matches[0].submitted, 0);
    }

    #[test]
    fn matched_indices_are_unique() {
        let ground_truth = [
            rect(0.0, 0.0, 10.0, 10.0),
            rect(2.0, 0.0, 10.0, 10.0),
            rect(4.0, 0.0, 10.0, 10.0),
        ];
        let submitted = [
            rect(2.0, 0.0, 10.0, 10.0),
            rect(2.0, 0.0, 10.0, 10.0),
            rect(2.0, 0.0, 10.0, 10.0),
            rect(2.0, 0.0, 10.0, 10.0),
        ];
        let result = grade(&ground_truth, &submitted, 0.5).unwrap();
        let mut matched = result.matched_ground_truth();
        matched.dedup();
        assert_eq!(matched.len(), result.true_positives);
        assert_eq!(result.true_positives, 3);
        assert_eq!(result.false_positives, 1);
    }

    #[test]
    fn tie_goes_to_lowest_index() {
        // both ground-truth boxes overlap the submission with IoU 0.6
        let ground_truth = [rect(0.0, 0.0, 6.0, 10.0), rect(4.0, 0.0, 6.0, 10.0)];
        let submitted = [rect(0.0, 0.0, 10.0, 10.0)];
        let result = grade(&ground_truth, &submitted, 0.5).unwrap();
        assert_eq!(result.matches[0].ground_truth, 0);
        assert_eq!(result.matches[0].iou, 0.6);
    }

    #[test]
    fn greedy_follows_submission_order() {
        // the first submission takes the box the second one fits best
        let ground_truth = [rect(0.0, 0.0, 10.0, 10.0), rect(8.0, 0.0, 10.0, 10.0)];
        let submitted = [rect(3.0, 0.0, 10.0, 10.0), rect(0.0, 0.0, 10.0, 10.0)];
        let result = grade(&ground_truth, &submitted, 0.5).unwrap();
        assert_eq!(result.matches[0].ground_truth, 0);
        assert_eq!(result.true_positives, 1);
        assert_eq!(result.false_positives, 1);
        assert_eq!(result.false_negatives, 1);
    }

    #[test]
    fn mixed_detections() {
        let ground_truth = [
            rect(0.0, 0.0, 10.0, 10.0),
            rect(50.0, 50.0, 10.0, 10.0),
            rect(100.0, 0.0, 20.0, 20.0),
        ];
        let submitted = [
            rect(101.0, 1.0, 20.0, 20.0),
            rect(300.0, 300.0, 5.0, 5.0),
            rect(0.0, 0.0, 10.0, 10.0),
        ];
        let result = grade(&ground_truth, &submitted, 0.5).unwrap();
        assert_eq!(result.matched_ground_truth(), vec![0, 2]);
        assert_eq!(result.report(), GradingReport {
            total_lesions: 3,
            correct_detections: 2,
            false_positives: 1,
            missed_lesions: 1,
            precision: 0.67,
            recall: 0.67,
            f1: 0.67,
        });
    }

    #[test]
    fn degenerate_boxes_are_not_errors() {
        let ground_truth = [rect(5.0, 5.0, 0.0, 0.0)];
        let submitted = [rect(5.0, 5.0, 0.0, 0.0)];
        let result = grade(&ground_truth, &submitted, 0.5).unwrap();
        assert_eq!((result.true_positives, result.false_positives, result.false_negatives), (0, 1, 1));
    }

    #[test]
    fn malformed_boxes_are_rejected() {
        let valid = [rect(0.0, 0.0, 10.0, 10.0)];
        let negative = [rect(0.0, 0.0, 10.0, -1.0)];
        assert_eq!(
            grade(&negative, &valid, 0.5),
            Err(GradingEntry::NegativeDimension(BoxSetKind::GroundTruth, 0))
        );
        assert_eq!(
            grade(&valid, &negative, 0.5),
            Err(GradingEntry::NegativeDimension(BoxSetKind::Submitted, 0))
        );
        assert_eq!(grade(&valid, &valid, 2.0), Err(GradingEntry::InvalidThreshold(2.0)));
    }

    #[test]
    fn class_aware_matching() {
        let ground_truth = [rect(0.0, 0.0, 10.0, 10.0).with_label("acne")];
        let submitted = [rect(0.0, 0.0, 10.0, 10.0).with_label("mole")];
        let agnostic = grade_with_policy(&ground_truth, &submitted, &MatchPolicy::default()).unwrap();
        assert_eq!(agnostic.true_positives, 1);
        let aware = grade_with_policy(&ground_truth, &submitted, &MatchPolicy::default().class_aware(true)).unwrap();
        assert_eq!(aware.true_positives, 0);
        assert_eq!(aware.false_positives, 1);
        assert_eq!(aware.false_negatives, 1);
    }

    #[test]
    fn grading_is_idempotent() {
        let ground_truth = [rect(0.0, 0.0, 10.0, 10.0), rect(20.0, 20.0, 7.0, 3.0)];
        let submitted = [rect(1.0, 1.0, 9.0, 9.0), rect(21.0, 20.0, 7.0, 3.0), rect(60.0, 0.0, 1.0, 1.0)];
        let first = grade(&ground_truth, &submitted, 0.5).unwrap();
        let second = grade(&ground_truth, &submitted, 0.5).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.f1.to_bits(), second.f1.to_bits());
    }

    #[test]
    fn extra_perfect_detection_never_lowers_f1() {
        let ground_truth = [rect(0.0, 0.0, 10.0, 10.0), rect(40.0, 40.0, 10.0, 10.0), rect(80.0, 0.0, 5.0, 5.0)];
        let mut submitted = vec![rect(0.0, 0.0, 10.0, 10.0), rect(200.0, 200.0, 3.0, 3.0)];
        let mut previous = grade(&ground_truth, &submitted, 0.5).unwrap().f1;
        for unmatched in &ground_truth[1..] {
            submitted.push(unmatched.clone());
            let current = grade(&ground_truth, &submitted, 0.5).unwrap().f1;
            assert!(current >= previous);
            previous = current;
        }
    }
}
