use crate::management::utils::difficulty::Difficulty;
use crate::management::utils::record_metadata::RecordMetadata;
use common::grading::utils::bounding_box::BoundingBox;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The image a student annotates, with the lesions they are expected to find.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AssessmentImage {
    pub uuid: Uuid,
    pub image_file: String,
    pub ground_truth: Vec<BoundingBox>,
    pub difficulty: Difficulty,
    #[serde(flatten)]
    pub metadata: RecordMetadata,
}

impl AssessmentImage {
    pub fn new(image_file: String, ground_truth: Vec<BoundingBox>, difficulty: Difficulty) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            image_file,
            ground_truth,
            difficulty,
            metadata: RecordMetadata::new(),
        }
    }
}
