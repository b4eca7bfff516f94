//! User domain model.

use serde::{Deserialize, Serialize};

use super::RowId;

/// Stable user identifier.
pub type UserId = RowId;

/// Names inserted by the storage reset, in insertion order.
pub const SEED_USER_NAMES: [&str; 3] = ["Alice", "Bob", "Charlie"];

/// A participant in the follow graph.
///
/// Users are immutable once created and are only removed by a full
/// storage reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
}

/// Normalizes a user display name.
///
/// Returns `None` when the name is empty after trimming.
pub fn normalize_user_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
