//! Follow edge model.
//!
//! # Invariants
//! - At most one edge exists per `(follower_id, followee_id)` pair.
//! - `follower_id != followee_id`.

use serde::{Deserialize, Serialize};

use super::user::UserId;
use super::RowId;

/// Directed edge: `follower_id` receives notifications about
/// `followee_id`'s activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    pub id: RowId,
    pub follower_id: UserId,
    pub followee_id: UserId,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// Whether a follow request toggles the edge on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeChange {
    Follow,
    Unfollow,
}
