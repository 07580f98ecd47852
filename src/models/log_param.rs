use serde::{Deserialize, Serialize};

/// Request parameters for creating a log
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogParam {
    /// Client address the action came from
    #[serde(default)]
    pub ip: Option<String>,

    /// What happened, e.g. LOGIN
    pub action: String,

    #[serde(default)]
    pub message: Option<String>,
}
