use std::io::Error as IoError;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Error, Debug)]
pub enum SystemEntry {
    #[error("Online now")]
    Online,
    #[error("Initializing")]
    Initializing,
    #[error("Initialization completed")]
    InitializeComplete,
    #[error("Termination in process")]
    Terminating,
    #[error("Termination completed")]
    TerminateComplete,
    #[error("Invalid configuration")]
    InvalidConfig,
    #[error("Configuration not found")]
    ConfigNotFound,
    #[error("Configuration updated")]
    ConfigUpdated,
    #[error("Web service ready")]
    WebReady,
    #[error("Web service panic: {0}")]
    WebPanic(IoError),
    #[error("Grading worker {0} is online")]
    WorkerOnline(usize),
    #[error("Grading worker {0} is offline")]
    WorkerOffline(usize),
    #[error("Task panic while execution: {0}")]
    TaskPanickedError(JoinError),
    #[error("Imported {0} assessment images, skipped {1}")]
    ImportComplete(usize, usize),
}

impl From<SystemEntry> for String {
    #[inline(always)]
    fn from(value: SystemEntry) -> Self {
        value.to_string()
    }
}
