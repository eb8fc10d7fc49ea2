use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordEntry {
    #[error("Assessment {0} does not exist")]
    AssessmentDoesNotExist(Uuid),
    #[error("Attempt {0} does not exist")]
    AttemptDoesNotExist(Uuid),
    #[error("Record {0} is deleted")]
    RecordDeleted(Uuid),
    #[error("Record {0} is not deleted")]
    RecordNotDeleted(Uuid),
    #[error("Image {0} is already registered")]
    DuplicateImage(String),
}

impl From<RecordEntry> for String {
    #[inline(always)]
    fn from(value: RecordEntry) -> Self {
        value.to_string()
    }
}
