use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum TaskEntry {
    #[error("Attempt {0} is waiting for grading")]
    Enqueued(Uuid),
    #[error("Worker {1} is grading attempt {0}")]
    Grading(Uuid, usize),
    #[error("Attempt {0} graded: score {1}, missed {2}")]
    Graded(Uuid, f64, usize),
    #[error("Attempt {0} cannot be graded")]
    GradingFailed(Uuid),
    #[error("Attempt {0} is queued for regrading")]
    Regrade(Uuid),
}

impl From<TaskEntry> for String {
    #[inline(always)]
    fn from(value: TaskEntry) -> Self {
        value.to_string()
    }
}
