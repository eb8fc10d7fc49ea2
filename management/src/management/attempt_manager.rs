use crate::management::utils::attempt_status::AttemptStatus;
use crate::management::utils::user_attempt::UserAttempt;
use crate::utils::logging::*;
use common::grading::utils::match_result::MatchResult;
use lazy_static::lazy_static;
use std::collections::HashMap;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

lazy_static! {
    static ref ATTEMPT_MANAGER: RwLock<AttemptManager> = RwLock::new(AttemptManager::new());
}

pub struct AttemptManager {
    attempts: HashMap<Uuid, UserAttempt>,
}

impl AttemptManager {
    fn new() -> Self {
        Self {
            attempts: HashMap::new(),
        }
    }

    pub async fn instance() -> RwLockReadGuard<'static, Self> {
        ATTEMPT_MANAGER.read().await
    }

    pub async fn instance_mut() -> RwLockWriteGuard<'static, Self> {
        ATTEMPT_MANAGER.write().await
    }

    pub async fn add_attempt(attempt: UserAttempt) -> Uuid {
        let uuid = attempt.uuid;
        Self::instance_mut().await.attempts.insert(uuid, attempt);
        uuid
    }

    pub async fn get_attempt(uuid: Uuid) -> Result<UserAttempt, RecordEntry> {
        match Self::instance().await.attempts.get(&uuid) {
            Some(attempt) if attempt.metadata.is_deleted => Err(RecordEntry::RecordDeleted(uuid)),
            Some(attempt) => Ok(attempt.clone()),
            None => Err(RecordEntry::AttemptDoesNotExist(uuid)),
        }
    }

    /// Oldest first, so the list reads as the user's learning curve.
    pub async fn user_attempts(user_id: Uuid) -> Vec<UserAttempt> {
        let mut attempts = Self::instance().await.attempts.values()
            .filter(|attempt| attempt.user_id == user_id && !attempt.metadata.is_deleted)
            .cloned()
            .collect::<Vec<UserAttempt>>();
        attempts.sort_by_key(|attempt| attempt.metadata.date_created);
        attempts
    }

    /// Moves the attempt to `Grading` and hands back the boxes to grade.
    pub async fn start_grading(uuid: Uuid) -> Result<UserAttempt, RecordEntry> {
        Self::modify(uuid, |attempt| attempt.change_status(AttemptStatus::Grading)).await
    }

    pub async fn reset_pending(uuid: Uuid) -> Result<UserAttempt, RecordEntry> {
        Self::modify(uuid, |attempt| attempt.change_status(AttemptStatus::Pending)).await
    }

    pub async fn record_result(uuid: Uuid, result: &MatchResult) -> Result<UserAttempt, RecordEntry> {
        Self::modify(uuid, |attempt| attempt.graded(result)).await
    }

    pub async fn record_failure(uuid: Uuid, error: String) -> Result<UserAttempt, RecordEntry> {
        Self::modify(uuid, |attempt| attempt.failed(error)).await
    }

    pub async fn soft_delete(uuid: Uuid) -> Result<(), RecordEntry> {
        let mut attempt_manager = Self::instance_mut().await;
        let attempt = attempt_manager.attempts.get_mut(&uuid)
            .ok_or(RecordEntry::AttemptDoesNotExist(uuid))?;
        if attempt.metadata.soft_delete() {
            Ok(())
        } else {
            Err(RecordEntry::RecordDeleted(uuid))
        }
    }

    pub async fn restore(uuid: Uuid) -> Result<(), RecordEntry> {
        let mut attempt_manager = Self::instance_mut().await;
        let attempt = attempt_manager.attempts.get_mut(&uuid)
            .ok_or(RecordEntry::AttemptDoesNotExist(uuid))?;
        if attempt.metadata.restore() {
            Ok(())
        } else {
            Err(RecordEntry::RecordNotDeleted(uuid))
        }
    }

    async fn modify<F: FnOnce(&mut UserAttempt)>(uuid: Uuid, modify: F) -> Result<UserAttempt, RecordEntry> {
        let mut attempt_manager = Self::instance_mut().await;
        match attempt_manager.attempts.get_mut(&uuid) {
            Some(attempt) if attempt.metadata.is_deleted => Err(RecordEntry::RecordDeleted(uuid)),
            Some(attempt) => {
                modify(attempt);
                Ok(attempt.clone())
            }
            None => Err(RecordEntry::AttemptDoesNotExist(uuid)),
        }
    }
}
