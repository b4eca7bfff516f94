//! Notification delivery record.

use serde::{Deserialize, Serialize};

use super::activity::ActivityId;
use super::user::UserId;
use super::RowId;

/// One delivery of an activity to one recipient.
///
/// Append-only; there is no read/unread state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: RowId,
    /// Recipient.
    pub user_id: UserId,
    /// Originating activity.
    pub activity_id: ActivityId,
    pub content: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}
