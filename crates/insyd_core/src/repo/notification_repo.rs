//! Notification repository contracts and SQLite implementation.
//!
//! # Invariants
//! - At most one notification per `(recipient, activity)` pair.
//! - Recipient listings are newest first: `created_at DESC, id DESC`.
//! - `list_for_activity` is an audit lookup for one activity's deliveries;
//!   services only append and list per recipient.

use crate::model::activity::ActivityId;
use crate::model::notification::Notification;
use crate::model::user::UserId;
use crate::repo::RepoResult;
use rusqlite::{params, Connection, Row};

const NOTIFICATION_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    activity_id,
    content,
    created_at
FROM notifications";

/// Repository interface for notification delivery records.
pub trait NotificationRepository {
    fn append_notification(
        &self,
        recipient: UserId,
        activity_id: ActivityId,
        content: &str,
    ) -> RepoResult<Notification>;
    /// Lists one recipient's notifications, newest first.
    fn list_for_recipient(&self, recipient: UserId) -> RepoResult<Vec<Notification>>;
    /// Lists every delivery of one activity in insertion order.
    fn list_for_activity(&self, activity_id: ActivityId) -> RepoResult<Vec<Notification>>;
}

/// SQLite-backed notification repository.
pub struct SqliteNotificationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNotificationRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NotificationRepository for SqliteNotificationRepository<'_> {
    fn append_notification(
        &self,
        recipient: UserId,
        activity_id: ActivityId,
        content: &str,
    ) -> RepoResult<Notification> {
        let notification = self.conn.query_row(
            "INSERT INTO notifications (user_id, activity_id, content)
             VALUES (?1, ?2, ?3)
             RETURNING id, user_id, activity_id, content, created_at;",
            params![recipient, activity_id, content],
            parse_notification_row,
        )?;
        Ok(notification)
    }

    fn list_for_recipient(&self, recipient: UserId) -> RepoResult<Vec<Notification>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTIFICATION_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY created_at DESC, id DESC;"
        ))?;
        let notifications = stmt
            .query_map([recipient], parse_notification_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(notifications)
    }

    fn list_for_activity(&self, activity_id: ActivityId) -> RepoResult<Vec<Notification>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTIFICATION_SELECT_SQL}
             WHERE activity_id = ?1
             ORDER BY id ASC;"
        ))?;
        let notifications = stmt
            .query_map([activity_id], parse_notification_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(notifications)
    }
}

fn parse_notification_row(row: &Row<'_>) -> rusqlite::Result<Notification> {
    Ok(Notification {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        activity_id: row.get("activity_id")?,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
    })
}
