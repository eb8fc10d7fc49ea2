pub mod assessment_image;
pub mod attempt_status;
pub mod difficulty;
pub mod record_metadata;
pub mod user_attempt;
