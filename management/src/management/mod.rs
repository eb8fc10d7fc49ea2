pub mod assessment_manager;
pub mod attempt_manager;
pub mod coco_importer;
pub mod grade_manager;
pub mod management;
pub mod utils;
