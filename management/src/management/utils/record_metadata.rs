use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Bookkeeping shared by every stored record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RecordMetadata {
    pub date_created: DateTime<Local>,
    pub date_modified: DateTime<Local>,
    pub is_deleted: bool,
    pub deleted_date: Option<DateTime<Local>>,
}

impl RecordMetadata {
    pub fn new() -> Self {
        let now = Local::now();
        Self {
            date_created: now,
            date_modified: now,
            is_deleted: false,
            deleted_date: None,
        }
    }

    pub fn touch(&mut self) {
        self.date_modified = Local::now();
    }

    /// Returns `false` when the record was already deleted.
    pub fn soft_delete(&mut self) -> bool {
        if self.is_deleted {
            return false;
        }
        self.is_deleted = true;
        self.deleted_date = Some(Local::now());
        self.touch();
        true
    }

    /// Returns `false` when the record was not deleted.
    pub fn restore(&mut self) -> bool {
        if !self.is_deleted {
            return false;
        }
        self.is_deleted = false;
        self.deleted_date = None;
        self.touch();
        true
    }
}

impl Default for RecordMetadata {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soft_delete_then_restore() {
        let mut metadata = RecordMetadata::new();
        assert!(metadata.soft_delete());
        assert!(metadata.is_deleted);
        let deleted_date = metadata.deleted_date;
        assert!(deleted_date.is_some());
        assert!(!metadata.soft_delete());
        assert_eq!(metadata.deleted_date, deleted_date);
        assert!(metadata.restore());
        assert!(!metadata.is_deleted);
        assert_eq!(metadata.deleted_date, None);
        assert!(!metadata.restore());
        assert!(metadata.date_modified >= metadata.date_created);
    }
}
