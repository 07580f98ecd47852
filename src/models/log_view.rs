use crate::models::log_record::LogRecord;
use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// API projection of a log record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogView {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub ip: Option<String>,
    pub action: String,
    pub message: Option<String>,
    /// RFC 3339 timestamp
    pub created_at: String,
}

impl From<LogRecord> for LogView {
    fn from(record: LogRecord) -> Self {
        let created_at = match DateTime::from_timestamp(record.created_at, 0) {
            Some(dt) => dt.to_rfc3339(),
            None => "Unknown".to_string(),
        };

        LogView {
            id: record.id,
            user_id: record.user_id,
            username: record.username,
            ip: record.ip,
            action: record.action,
            message: record.message,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(created_at: i64) -> LogRecord {
        LogRecord {
            id: 7,
            user_id: 1,
            username: "alice".to_string(),
            ip: Some("10.0.0.1".to_string()),
            action: "LOGIN".to_string(),
            message: None,
            created_at,
        }
    }

    #[test]
    fn test_from_record_copies_fields() {
        let view = LogView::from(record(0));

        assert_eq!(view.id, 7);
        assert_eq!(view.user_id, 1);
        assert_eq!(view.username, "alice");
        assert_eq!(view.ip.as_deref(), Some("10.0.0.1"));
        assert_eq!(view.action, "LOGIN");
        assert_eq!(view.message, None);
        assert_eq!(view.created_at, "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_from_record_out_of_range_timestamp() {
        let view = LogView::from(record(i64::MAX));
        assert_eq!(view.created_at, "Unknown");
    }
}
