//! Per-user ordered group.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named entry in a user's ordered list of groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    /// Zero-based sort key within the owner's groups
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Maximum length of a group name
pub const MAX_GROUP_NAME_LENGTH: usize = 255;
