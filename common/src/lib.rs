pub mod grading;
pub mod utils;
