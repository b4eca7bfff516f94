//! Activity log repository contracts and SQLite implementation.
//!
//! # Invariants
//! - The log is append-only: no update or delete API exists.
//! - Rows with an unknown `type` are reported as `InvalidData`.
//! - `get_activity` is a lookup for callers resolving a notification's
//!   `activity_id`; services only append and list.

use crate::model::activity::{Activity, ActivityId, ActivityKind, NewActivity};
use crate::model::user::UserId;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const ACTIVITY_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    type,
    content,
    created_at
FROM activities";

/// Repository interface for the activity log.
pub trait ActivityRepository {
    fn append_activity(&self, activity: &NewActivity) -> RepoResult<Activity>;
    fn get_activity(&self, id: ActivityId) -> RepoResult<Option<Activity>>;
    /// Lists one user's activities, newest first.
    fn list_activities_for_user(&self, user_id: UserId) -> RepoResult<Vec<Activity>>;
}

/// SQLite-backed activity repository.
pub struct SqliteActivityRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteActivityRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ActivityRepository for SqliteActivityRepository<'_> {
    fn append_activity(&self, activity: &NewActivity) -> RepoResult<Activity> {
        let mut stmt = self.conn.prepare(
            "INSERT INTO activities (user_id, type, content)
             VALUES (?1, ?2, ?3)
             RETURNING id, user_id, type, content, created_at;",
        )?;
        let mut rows = stmt.query(params![
            activity.user_id,
            activity.kind.as_str(),
            activity.content.as_str(),
        ])?;
        if let Some(row) = rows.next()? {
            return parse_activity_row(row);
        }
        Err(RepoError::InvalidData(
            "activity insert returned no row".to_string(),
        ))
    }

    fn get_activity(&self, id: ActivityId) -> RepoResult<Option<Activity>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACTIVITY_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_activity_row(row)?));
        }
        Ok(None)
    }

    fn list_activities_for_user(&self, user_id: UserId) -> RepoResult<Vec<Activity>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ACTIVITY_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY created_at DESC, id DESC;"
        ))?;
        let mut rows = stmt.query([user_id])?;
        let mut activities = Vec::new();
        while let Some(row) = rows.next()? {
            activities.push(parse_activity_row(row)?);
        }
        Ok(activities)
    }
}

fn parse_activity_row(row: &Row<'_>) -> RepoResult<Activity> {
    let type_text: String = row.get("type")?;
    let kind = ActivityKind::parse(&type_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid activity type `{type_text}` in activities.type"
        ))
    })?;

    Ok(Activity {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        kind,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
    })
}
