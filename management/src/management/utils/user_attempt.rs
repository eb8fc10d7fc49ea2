use crate::management::utils::attempt_status::AttemptStatus;
use crate::management::utils::record_metadata::RecordMetadata;
use common::grading::utils::bounding_box::BoundingBox;
use common::grading::utils::match_result::{GradingReport, MatchResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One student's submission for one assessment image.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserAttempt {
    pub uuid: Uuid,
    pub user_id: Uuid,
    pub assessment_id: Uuid,
    pub boxes: Vec<BoundingBox>,
    pub status: AttemptStatus,
    pub score: Option<f64>,
    pub report: Option<GradingReport>,
    pub error: Option<String>,
    #[serde(flatten)]
    pub metadata: RecordMetadata,
}

impl UserAttempt {
    pub fn new(user_id: Uuid, assessment_id: Uuid, boxes: Vec<BoundingBox>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            user_id,
            assessment_id,
            boxes,
            status: AttemptStatus::Pending,
            score: None,
            report: None,
            error: None,
            metadata: RecordMetadata::new(),
        }
    }

    pub fn change_status(&mut self, status: AttemptStatus) {
        self.status = status;
        self.metadata.touch();
    }

    /// Replaces any earlier outcome.
    pub fn graded(&mut self, result: &MatchResult) {
        self.score = Some(result.score());
        self.report = Some(result.report());
        self.error = None;
        self.change_status(AttemptStatus::Graded);
    }

    pub fn failed(&mut self, error: String) {
        self.score = None;
        self.report = None;
        self.error = Some(error);
        self.change_status(AttemptStatus::Failed);
    }

    pub fn is_graded(&self) -> bool {
        self.status == AttemptStatus::Graded
    }
}
