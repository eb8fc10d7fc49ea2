pub use crate::{logging_console, logging_critical, logging_debug, logging_emergency, logging_entry, logging_error, logging_information, logging_warning};
pub use common::utils::log_entry::grading::GradingEntry;
pub use common::utils::log_entry::io::IOEntry;
pub use common::utils::log_entry::network::NetworkEntry;
pub use common::utils::log_entry::record::RecordEntry;
pub use common::utils::log_entry::system::SystemEntry;
pub use common::utils::log_entry::task::TaskEntry;
pub use common::utils::logging::*;
pub use common::{emergency_entry, error_entry, information_entry, warning_entry};

use chrono::{DateTime, Local};
use lazy_static::lazy_static;
use std::collections::HashMap;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

lazy_static! {
    static ref LOGGER: RwLock<Logger> = RwLock::new(Logger::new());
}

/// Process-wide log store. Entries about a specific attempt are kept apart
/// from the system log so a grading history can be read back per attempt.
pub struct Logger {
    system_log: Vec<LogEntry>,
    attempt_log: HashMap<Uuid, Vec<LogEntry>>,
}

impl Logger {
    fn new() -> Self {
        Self {
            system_log: vec![information_entry!("Logger", "Online now")],
            attempt_log: HashMap::new(),
        }
    }

    pub async fn instance() -> RwLockReadGuard<'static, Logger> {
        LOGGER.read().await
    }

    pub async fn instance_mut() -> RwLockWriteGuard<'static, Logger> {
        LOGGER.write().await
    }

    pub async fn add_system_log<T: Into<String>, U: Into<String>, V: Into<String>>(level: LogLevel, position: T, message: U, debug_info: V) {
        Self::add_system_log_entry(LogEntry::new(level, position, message, debug_info)).await;
    }

    pub async fn add_attempt_log<T: Into<String>, U: Into<String>, V: Into<String>>(attempt_id: Uuid, level: LogLevel, position: T, message: U, debug_info: V) {
        Self::add_attempt_log_entry(attempt_id, LogEntry::new(level, position, message, debug_info)).await;
    }

    pub async fn add_system_log_entry(log_entry: LogEntry) {
        Self::logging_console(&log_entry);
        Self::instance_mut().await.system_log.push(log_entry);
    }

    pub async fn add_attempt_log_entry(attempt_id: Uuid, log_entry: LogEntry) {
        Self::logging_console(&log_entry);
        Self::instance_mut().await.attempt_log
            .entry(attempt_id)
            .or_default()
            .push(log_entry);
    }

    pub fn logging_console(log_entry: &LogEntry) {
        println!("{}", log_entry.to_colored_string());
    }

    pub async fn get_system_logs() -> Vec<LogEntry> {
        Self::instance().await.system_log.clone()
    }

    pub async fn get_attempt_logs(attempt_id: Uuid) -> Option<Vec<LogEntry>> {
        Self::instance().await.attempt_log.get(&attempt_id).cloned()
    }

    pub async fn get_system_logs_since(time: DateTime<Local>) -> Vec<LogEntry> {
        let logger = Self::instance().await;
        Self::since(&logger.system_log, time)
    }

    pub async fn get_attempt_logs_since(attempt_id: Uuid, time: DateTime<Local>) -> Option<Vec<LogEntry>> {
        let logger = Self::instance().await;
        let logs = logger.attempt_log.get(&attempt_id)?;
        Some(Self::since(logs, time))
    }

    fn since(logs: &[LogEntry], time: DateTime<Local>) -> Vec<LogEntry> {
        // entries are appended in time order
        let index = logs.partition_point(|entry| entry.timestamp < time);
        logs[index..].to_vec()
    }
}

#[macro_export]
macro_rules! logging_with_level {
    ($level:ident, $message:expr) => {
        $crate::utils::logging::Logger::add_system_log($crate::utils::logging::LogLevel::$level, format!("{}:{}", file!(), line!()), $message, "").await
    };
    ($level:ident, $message:expr, $debug_info:expr) => {
        $crate::utils::logging::Logger::add_system_log($crate::utils::logging::LogLevel::$level, format!("{}:{}", file!(), line!()), $message, $debug_info).await
    };
    ($level:ident, $uuid:expr, $message:expr, $debug_info:expr) => {
        $crate::utils::logging::Logger::add_attempt_log($uuid, $crate::utils::logging::LogLevel::$level, format!("{}:{}", file!(), line!()), $message, $debug_info).await
    };
}

#[macro_export]
macro_rules! logging_debug {
    ($($argument:expr),+) => {
        $crate::logging_with_level!(Debug, $($argument),+)
    };
}

#[macro_export]
macro_rules! logging_information {
    ($($argument:expr),+) => {
        $crate::logging_with_level!(Information, $($argument),+)
    };
}

#[macro_export]
macro_rules! logging_warning {
    ($($argument:expr),+) => {
        $crate::logging_with_level!(Warning, $($argument),+)
    };
}

#[macro_export]
macro_rules! logging_error {
    ($($argument:expr),+) => {
        $crate::logging_with_level!(Error, $($argument),+)
    };
}

#[macro_export]
macro_rules! logging_critical {
    ($($argument:expr),+) => {
        $crate::logging_with_level!(Critical, $($argument),+)
    };
}

#[macro_export]
macro_rules! logging_emergency {
    ($($argument:expr),+) => {
        $crate::logging_with_level!(Emergency, $($argument),+)
    };
}

#[macro_export]
macro_rules! logging_entry {
    ($entry:expr) => {
        $crate::utils::logging::Logger::add_system_log_entry($entry).await
    };
    ($uuid:expr, $entry:expr) => {
        $crate::utils::logging::Logger::add_attempt_log_entry($uuid, $entry).await
    };
}

#[macro_export]
macro_rules! logging_console {
    ($entry:expr) => {
        $crate::utils::logging::Logger::logging_console(&$entry)
    };
}
