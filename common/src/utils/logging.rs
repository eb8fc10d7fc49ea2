use chrono::{DateTime, Local};
use colored::*;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Information,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
    Emergency,
}

impl LogLevel {
    pub fn to_plain_string(&self) -> String {
        format!("{:<11}", self.name())
    }

    pub fn to_colored_string(&self) -> ColoredString {
        let plain = self.to_plain_string();
        match self {
            LogLevel::Debug => plain.bright_black(),
            LogLevel::Information => plain.bright_blue(),
            LogLevel::Notice => plain.bright_green(),
            LogLevel::Warning => plain.yellow(),
            LogLevel::Error => plain.bright_red(),
            LogLevel::Critical => plain.bright_yellow(),
            LogLevel::Alert => plain.red(),
            LogLevel::Emergency => plain.magenta(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            LogLevel::Debug => "Debug",
            LogLevel::Information => "Information",
            LogLevel::Notice => "Notice",
            LogLevel::Warning => "Warning",
            LogLevel::Error => "Error",
            LogLevel::Critical => "Critical",
            LogLevel::Alert => "Alert",
            LogLevel::Emergency => "Emergency",
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub timestamp: DateTime<Local>,
    pub position: String,
    pub message: String,
    pub debug_info: String,
}

impl LogEntry {
    pub fn new<T: Into<String>, U: Into<String>, V: Into<String>>(level: LogLevel, position: T, message: U, debug_info: V) -> Self {
        Self {
            level,
            timestamp: Local::now(),
            position: position.into(),
            message: message.into(),
            debug_info: debug_info.into(),
        }
    }

    pub fn to_plain_string(&self) -> String {
        let timestamp = self.timestamp.format("%Y/%m/%d %H:%M:%S");
        if self.debug_info.is_empty() {
            format!("[{}] {} {}: {}", self.level.to_plain_string(), timestamp, self.position, self.message)
        } else {
            format!("[{}] {} {}: {}\n{}", self.level.to_plain_string(), timestamp, self.position, self.message, self.debug_info)
        }
    }

    pub fn to_colored_string(&self) -> String {
        let level = self.level.to_colored_string();
        let timestamp = self.timestamp.format("%Y/%m/%d %H:%M:%S");
        let position = self.position.cyan();
        let message = self.message.white();
        if self.debug_info.is_empty() {
            format!("[{}] {} {}: {}", level, timestamp, position, message)
        } else {
            format!("[{}] {} {}: {}\n{}", level, timestamp, position, message, self.debug_info.bright_black())
        }
    }
}

impl Display for LogEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}

#[macro_export]
macro_rules! log_entry {
    ($level:ident, $position:expr, $message:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::$level, $position, $message, "")
    };
    ($level:ident, $position:expr, $message:expr, $debug_info:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::$level, $position, $message, format!("{}:{} {}", file!(), line!(), $debug_info))
    };
}

#[macro_export]
macro_rules! information_entry {
    ($($argument:expr),+) => {
        $crate::log_entry!(Information, $($argument),+)
    };
}

#[macro_export]
macro_rules! warning_entry {
    ($($argument:expr),+) => {
        $crate::log_entry!(Warning, $($argument),+)
    };
}

#[macro_export]
macro_rules! error_entry {
    ($($argument:expr),+) => {
        $crate::log_entry!(Error, $($argument),+)
    };
}

#[macro_export]
macro_rules! emergency_entry {
    ($($argument:expr),+) => {
        $crate::log_entry!(Emergency, $($argument),+)
    };
}
