use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum AttemptStatus {
    Pending,
    Grading,
    Graded,
    Failed,
}
