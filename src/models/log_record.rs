/// A persisted log entry. `id` is 0 until the record has been saved.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub ip: Option<String>,
    pub action: String,
    pub message: Option<String>,
    /// Unix timestamp in seconds
    pub created_at: i64,
}
