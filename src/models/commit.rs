use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of a commit log, newest first when part of a history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub hash: String,
    pub short_hash: String,
    pub author: String,
    pub email: String,
    pub date: DateTime<Utc>,
    pub subject: String,
    pub relative_time: String,
}
