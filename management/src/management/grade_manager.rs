use crate::management::assessment_manager::AssessmentManager;
use crate::management::attempt_manager::AttemptManager;
use crate::utils::config::Config;
use crate::utils::logging::*;
use common::grading::matcher::grade_with_policy;
use common::grading::utils::match_policy::MatchPolicy;
use common::grading::utils::match_result::MatchResult;
use lazy_static::lazy_static;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use uuid::Uuid;

lazy_static! {
    static ref GRADE_MANAGER: RwLock<GradeManager> = RwLock::new(GradeManager::new());
}

// Tests that start the workers or expect an enqueued attempt to stay pending share one queue.
#[cfg(test)]
lazy_static! {
    pub static ref QUEUE_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::new(());
}

/// Queue of attempts waiting to be graded and the workers draining it.
pub struct GradeManager {
    pending: VecDeque<Uuid>,
    workers: Vec<JoinHandle<()>>,
    terminate: bool,
}

impl GradeManager {
    fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            workers: Vec::new(),
            terminate: false,
        }
    }

    pub async fn instance() -> RwLockReadGuard<'static, Self> {
        GRADE_MANAGER.read().await
    }

    pub async fn instance_mut() -> RwLockWriteGuard<'static, Self> {
        GRADE_MANAGER.write().await
    }

    pub async fn run() {
        let config = Config::now().await;
        let mut grade_manager = Self::instance_mut().await;
        grade_manager.terminate = false;
        for worker_id in 0..config.grading_workers {
            grade_manager.workers.push(tokio::spawn(async move {
                Self::grading_worker(worker_id).await;
            }));
        }
    }

    pub async fn terminate() {
        let workers = {
            let mut grade_manager = Self::instance_mut().await;
            grade_manager.terminate = true;
            grade_manager.workers.drain(..).collect::<Vec<JoinHandle<()>>>()
        };
        for worker in workers {
            if let Err(err) = worker.await {
                logging_critical!(SystemEntry::TaskPanickedError(err));
            }
        }
    }

    pub async fn add_task(attempt_id: Uuid) {
        Self::instance_mut().await.pending.push_back(attempt_id);
        logging_information!(attempt_id, TaskEntry::Enqueued(attempt_id), "");
    }

    pub async fn regrade(attempt_id: Uuid) -> Result<(), RecordEntry> {
        AttemptManager::reset_pending(attempt_id).await?;
        logging_information!(attempt_id, TaskEntry::Regrade(attempt_id), "");
        Self::add_task(attempt_id).await;
        Ok(())
    }

    pub async fn pending_tasks() -> usize {
        Self::instance().await.pending.len()
    }

    async fn grading_worker(worker_id: usize) {
        logging_information!(SystemEntry::WorkerOnline(worker_id));
        while !Self::instance().await.terminate {
            let attempt_id = Self::instance_mut().await.pending.pop_front();
            match attempt_id {
                Some(attempt_id) => {
                    let policy = Config::now().await.match_policy();
                    logging_debug!(attempt_id, TaskEntry::Grading(attempt_id, worker_id), "");
                    // failures are already recorded on the attempt
                    Self::grade_attempt(attempt_id, &policy).await.ok();
                }
                None => sleep(Duration::from_millis(Config::now().await.internal_timestamp)).await,
            }
        }
        logging_information!(SystemEntry::WorkerOffline(worker_id));
    }

    /// Grades one attempt and writes the outcome back onto it.
    ///
    /// Running it again for the same attempt replaces the stored result.
    pub async fn grade_attempt(attempt_id: Uuid, policy: &MatchPolicy) -> Result<MatchResult, String> {
        match Self::evaluate(attempt_id, policy).await {
            Ok(result) => {
                if let Err(err) = AttemptManager::record_result(attempt_id, &result).await {
                    logging_error!(attempt_id, TaskEntry::GradingFailed(attempt_id), format!("Err: {err}"));
                    return Err(err.into());
                }
                logging_information!(attempt_id, TaskEntry::Graded(attempt_id, result.score(), result.false_negatives), "");
                Ok(result)
            }
            Err(err) => {
                if let Err(record_err) = AttemptManager::record_failure(attempt_id, err.clone()).await {
                    logging_warning!(attempt_id, record_err, "");
                }
                logging_error!(attempt_id, TaskEntry::GradingFailed(attempt_id), format!("Err: {err}"));
                Err(err)
            }
        }
    }

    async fn evaluate(attempt_id: Uuid, policy: &MatchPolicy) -> Result<MatchResult, String> {
        let attempt = AttemptManager::start_grading(attempt_id).await?;
        let assessment = AssessmentManager::get_assessment(attempt.assessment_id).await?;
        Ok(grade_with_policy(&assessment.ground_truth, &attempt.boxes, policy)?)
    }
}
