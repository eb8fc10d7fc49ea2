use crate::management::utils::assessment_image::AssessmentImage;
use crate::utils::logging::*;
use lazy_static::lazy_static;
use std::collections::HashMap;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

lazy_static! {
    static ref ASSESSMENT_MANAGER: RwLock<AssessmentManager> = RwLock::new(AssessmentManager::new());
}

pub struct AssessmentManager {
    assessments: HashMap<Uuid, AssessmentImage>,
}

impl AssessmentManager {
    fn new() -> Self {
        Self {
            assessments: HashMap::new(),
        }
    }

    pub async fn instance() -> RwLockReadGuard<'static, Self> {
        ASSESSMENT_MANAGER.read().await
    }

    pub async fn instance_mut() -> RwLockWriteGuard<'static, Self> {
        ASSESSMENT_MANAGER.write().await
    }

    pub async fn add_assessment(assessment: AssessmentImage) -> Uuid {
        let uuid = assessment.uuid;
        Self::instance_mut().await.assessments.insert(uuid, assessment);
        uuid
    }

    /// Registers the image unless one with the same file name exists.
    pub async fn add_if_absent(assessment: AssessmentImage) -> Result<Uuid, RecordEntry> {
        let mut assessment_manager = Self::instance_mut().await;
        let duplicate = assessment_manager.assessments.values()
            .any(|existing| existing.image_file == assessment.image_file);
        if duplicate {
            return Err(RecordEntry::DuplicateImage(assessment.image_file));
        }
        let uuid = assessment.uuid;
        assessment_manager.assessments.insert(uuid, assessment);
        Ok(uuid)
    }

    pub async fn get_assessment(uuid: Uuid) -> Result<AssessmentImage, RecordEntry> {
        match Self::instance().await.assessments.get(&uuid) {
            Some(assessment) if assessment.metadata.is_deleted => Err(RecordEntry::RecordDeleted(uuid)),
            Some(assessment) => Ok(assessment.clone()),
            None => Err(RecordEntry::AssessmentDoesNotExist(uuid)),
        }
    }

    pub async fn list_assessments(with_deleted: bool) -> Vec<AssessmentImage> {
        let mut assessments = Self::instance().await.assessments.values()
            .filter(|assessment| with_deleted || !assessment.metadata.is_deleted)
            .cloned()
            .collect::<Vec<AssessmentImage>>();
        assessments.sort_by_key(|assessment| assessment.metadata.date_created);
        assessments
    }

    pub async fn soft_delete(uuid: Uuid) -> Result<(), RecordEntry> {
        let mut assessment_manager = Self::instance_mut().await;
        let assessment = assessment_manager.assessments.get_mut(&uuid)
            .ok_or(RecordEntry::AssessmentDoesNotExist(uuid))?;
        if assessment.metadata.soft_delete() {
            Ok(())
        } else {
            Err(RecordEntry::RecordDeleted(uuid))
        }
    }

    pub async fn restore(uuid: Uuid) -> Result<(), RecordEntry> {
        let mut assessment_manager = Self::instance_mut().await;
        let assessment = assessment_manager.assessments.get_mut(&uuid)
            .ok_or(RecordEntry::AssessmentDoesNotExist(uuid))?;
        if assessment.metadata.restore() {
            Ok(())
        } else {
            Err(RecordEntry::RecordNotDeleted(uuid))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::management::utils::difficulty::Difficulty;
    use common::grading::utils::bounding_box::BoundingBox;

    fn assessment(image_file: &str) -> AssessmentImage {
        AssessmentImage::new(image_file.to_string(), vec![BoundingBox::new(0.0, 0.0, 10.0, 10.0)], Difficulty::Easy)
    }

    #[tokio::test]
    async fn add_and_get() {
        let uuid = AssessmentManager::add_assessment(assessment("add_and_get.jpg")).await;
        let stored = AssessmentManager::get_assessment(uuid).await.unwrap();
        assert_eq!(stored.image_file, "add_and_get.jpg");
        assert_eq!(stored.ground_truth.len(), 1);
        let missing = Uuid::new_v4();
        assert_eq!(AssessmentManager::get_assessment(missing).await.unwrap_err(), RecordEntry::AssessmentDoesNotExist(missing));
    }

    #[tokio::test]
    async fn duplicate_image_is_rejected() {
        assert!(AssessmentManager::add_if_absent(assessment("duplicate.jpg")).await.is_ok());
        assert_eq!(
            AssessmentManager::add_if_absent(assessment("duplicate.jpg")).await,
            Err(RecordEntry::DuplicateImage("duplicate.jpg".to_string()))
        );
    }

    #[tokio::test]
    async fn soft_delete_hides_assessment() {
        let uuid = AssessmentManager::add_assessment(assessment("soft_delete.jpg")).await;
        AssessmentManager::soft_delete(uuid).await.unwrap();
        assert_eq!(AssessmentManager::soft_delete(uuid).await, Err(RecordEntry::RecordDeleted(uuid)));
        assert_eq!(AssessmentManager::get_assessment(uuid).await.unwrap_err(), RecordEntry::RecordDeleted(uuid));
        assert!(!AssessmentManager::list_assessments(false).await.iter().any(|stored| stored.uuid == uuid));
        assert!(AssessmentManager::list_assessments(true).await.iter().any(|stored| stored.uuid == uuid));
        AssessmentManager::restore(uuid).await.unwrap();
        assert!(AssessmentManager::get_assessment(uuid).await.is_ok());
        assert_eq!(AssessmentManager::restore(uuid).await, Err(RecordEntry::RecordNotDeleted(uuid)));
    }
}
