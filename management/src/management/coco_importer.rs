use crate::management::assessment_manager::AssessmentManager;
use crate::management::utils::assessment_image::AssessmentImage;
use crate::management::utils::difficulty::Difficulty;
use crate::utils::logging::*;
use common::grading::utils::bounding_box::{validate_boxes, BoundingBox, BoxSetKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

pub const ANNOTATION_FILE: &str = "_annotations.coco.json";
const DEFAULT_LABEL: &str = "acne";

#[derive(Deserialize, Debug, Clone)]
pub struct CocoDataset {
    pub images: Vec<CocoImage>,
    #[serde(default)]
    pub annotations: Vec<CocoAnnotation>,
    #[serde(default)]
    pub categories: Vec<CocoCategory>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CocoImage {
    pub id: u64,
    pub file_name: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CocoAnnotation {
    pub image_id: u64,
    pub bbox: [f64; 4], //x, y, width, height
    #[serde(default)]
    pub category_id: Option<u64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CocoCategory {
    pub id: u64,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

pub struct CocoImporter;

impl CocoImporter {
    pub fn parse(json: &str) -> Result<CocoDataset, String> {
        Ok(serde_json::from_str::<CocoDataset>(json).map_err(IOEntry::SerdeDeserializeError)?)
    }

    /// Ground-truth boxes per image file, in the dataset's image order.
    /// Images without annotations keep an empty ground truth.
    pub fn group(dataset: &CocoDataset) -> Vec<(String, Vec<BoundingBox>)> {
        let categories = dataset.categories.iter()
            .map(|category| (category.id, category.name.as_str()))
            .collect::<HashMap<u64, &str>>();
        let mut annotations: HashMap<u64, Vec<BoundingBox>> = HashMap::new();
        for annotation in &dataset.annotations {
            let [x, y, width, height] = annotation.bbox.map(f64::trunc);
            let label = annotation.category_id
                .and_then(|category_id| categories.get(&category_id).copied())
                .unwrap_or(DEFAULT_LABEL);
            annotations.entry(annotation.image_id)
                .or_default()
                .push(BoundingBox::new(x, y, width, height).with_label(label));
        }
        dataset.images.iter()
            .map(|image| (image.file_name.clone(), annotations.remove(&image.id).unwrap_or_default()))
            .collect()
    }

    pub async fn import(dataset: &CocoDataset) -> ImportSummary {
        let mut summary = ImportSummary::default();
        for (image_file, ground_truth) in Self::group(dataset) {
            if let Err(entry) = validate_boxes(&ground_truth, BoxSetKind::GroundTruth) {
                logging_warning!(entry, format!("Image: {image_file}"));
                summary.skipped += 1;
                continue;
            }
            let assessment = AssessmentImage::new(image_file, ground_truth, Difficulty::Medium);
            match AssessmentManager::add_if_absent(assessment).await {
                Ok(_) => summary.imported += 1,
                Err(entry) => {
                    logging_debug!(entry);
                    summary.skipped += 1;
                }
            }
        }
        logging_information!(SystemEntry::ImportComplete(summary.imported, summary.skipped));
        summary
    }

    pub async fn import_folder(folder: &Path) -> Result<ImportSummary, String> {
        let json_path = folder.join(ANNOTATION_FILE);
        let json = fs::read_to_string(&json_path).await
            .map_err(|err| IOEntry::ReadFileError(json_path.display(), err))?;
        let dataset = Self::parse(&json)?;
        Ok(Self::import(&dataset).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn dataset(prefix: &str) -> String {
        format!(r#"{{
            "images": [
                {{"id": 1, "file_name": "{prefix}_a.jpg", "width": 640, "height": 640}},
                {{"id": 2, "file_name": "{prefix}_b.jpg"}},
                {{"id": 3, "file_name": "{prefix}_c.jpg"}}
            ],
            "annotations": [
                {{"id": 10, "image_id": 1, "bbox": [10.7, 20.2, 30.9, 40.0], "category_id": 1}},
                {{"id": 11, "image_id": 2, "bbox": [1, 2, 3, 4], "category_id": 9}},
                {{"id": 12, "image_id": 1, "bbox": [100, 100, 5, 5]}}
            ],
            "categories": [{{"id": 1, "name": "papule"}}]
        }}"#)
    }

    #[test]
    fn group_annotations_per_image() {
        let dataset = CocoImporter::parse(&dataset("group")).unwrap();
        let grouped = CocoImporter::group(&dataset);
        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped[0].0, "group_a.jpg");
        assert_eq!(grouped[0].1, vec![
            BoundingBox::new(10.0, 20.0, 30.0, 40.0).with_label("papule"),
            BoundingBox::new(100.0, 100.0, 5.0, 5.0).with_label("acne"),
        ]);
        assert_eq!(grouped[1].1, vec![BoundingBox::new(1.0, 2.0, 3.0, 4.0).with_label("acne")]);
        assert!(grouped[2].1.is_empty());
    }

    #[test]
    fn parse_rejects_malformed_json() {
        assert!(CocoImporter::parse(r#"{"annotations": []}"#).is_err());
    }

    #[tokio::test]
    async fn import_skips_registered_images() {
        let prefix = Uuid::new_v4().to_string();
        let dataset = CocoImporter::parse(&dataset(&prefix)).unwrap();
        assert_eq!(CocoImporter::import(&dataset).await, ImportSummary { imported: 3, skipped: 0 });
        assert_eq!(CocoImporter::import(&dataset).await, ImportSummary { imported: 0, skipped: 3 });
        let stored = AssessmentManager::list_assessments(false).await.into_iter()
            .find(|assessment| assessment.image_file == format!("{prefix}_a.jpg"))
            .unwrap();
        assert_eq!(stored.difficulty, Difficulty::Medium);
        assert_eq!(stored.ground_truth.len(), 2);
    }

    #[tokio::test]
    async fn import_skips_malformed_ground_truth() {
        let prefix = Uuid::new_v4().to_string();
        let dataset = CocoImporter::parse(&format!(r#"{{
            "images": [{{"id": 1, "file_name": "{prefix}_bad.jpg"}}, {{"id": 2, "file_name": "{prefix}_good.jpg"}}],
            "annotations": [
                {{"image_id": 1, "bbox": [0, 0, -5, 10]}},
                {{"image_id": 2, "bbox": [0, 0, 5, 10]}}
            ]
        }}"#)).unwrap();
        assert_eq!(CocoImporter::import(&dataset).await, ImportSummary { imported: 1, skipped: 1 });
        let registered = AssessmentManager::list_assessments(true).await.into_iter()
            .filter(|assessment| assessment.image_file.starts_with(&prefix))
            .map(|assessment| assessment.image_file)
            .collect::<Vec<String>>();
        assert_eq!(registered, vec![format!("{prefix}_good.jpg")]);
    }

    #[tokio::test]
    async fn import_folder_reports_missing_file() {
        let folder = std::env::temp_dir().join(Uuid::new_v4().to_string());
        assert!(CocoImporter::import_folder(&folder).await.is_err());
    }

    #[tokio::test]
    async fn import_folder_reads_annotation_file() {
        let folder = std::env::temp_dir().join(Uuid::new_v4().to_string());
        fs::create_dir_all(&folder).await.unwrap();
        let prefix = Uuid::new_v4().to_string();
        fs::write(folder.join(ANNOTATION_FILE), dataset(&prefix)).await.unwrap();
        let summary = CocoImporter::import_folder(&folder).await.unwrap();
        assert_eq!(summary.imported, 3);
        fs::remove_dir_all(&folder).await.unwrap();
    }
}
