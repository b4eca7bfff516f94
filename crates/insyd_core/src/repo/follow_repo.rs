//! Follow edge repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist and query directed follower -> followee edges.
//!
//! # Invariants
//! - The schema rejects duplicate pairs and self-edges; such inserts surface
//!   as `RepoError::Constraint`.
//! - Edge listings are in insertion order (`id ASC`).

use crate::model::follow::Follow;
use crate::model::user::UserId;
use crate::repo::RepoResult;
use rusqlite::{params, Connection, OptionalExtension, Row};

const FOLLOW_SELECT_SQL: &str = "SELECT
    id,
    follower_id,
    followee_id,
    created_at
FROM follows";

/// Repository interface for follow edges.
pub trait FollowRepository {
    fn find_edge(&self, follower_id: UserId, followee_id: UserId) -> RepoResult<Option<Follow>>;
    fn insert_edge(&self, follower_id: UserId, followee_id: UserId) -> RepoResult<Follow>;
    /// Deletes the edge; returns whether a row was removed.
    fn delete_edge(&self, follower_id: UserId, followee_id: UserId) -> RepoResult<bool>;
    /// Users that `follower_id` follows.
    fn list_followee_ids(&self, follower_id: UserId) -> RepoResult<Vec<UserId>>;
    /// Users following `followee_id` (fan-out targets).
    fn list_follower_ids(&self, followee_id: UserId) -> RepoResult<Vec<UserId>>;
}

/// SQLite-backed follow edge repository.
pub struct SqliteFollowRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFollowRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn list_ids(&self, sql: &str, id: UserId) -> RepoResult<Vec<UserId>> {
        let mut stmt = self.conn.prepare(sql)?;
        let ids = stmt
            .query_map([id], |row| row.get::<_, UserId>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }
}

impl FollowRepository for SqliteFollowRepository<'_> {
    fn find_edge(&self, follower_id: UserId, followee_id: UserId) -> RepoResult<Option<Follow>> {
        let edge = self
            .conn
            .query_row(
                &format!("{FOLLOW_SELECT_SQL} WHERE follower_id = ?1 AND followee_id = ?2;"),
                params![follower_id, followee_id],
                parse_follow_row,
            )
            .optional()?;
        Ok(edge)
    }

    fn insert_edge(&self, follower_id: UserId, followee_id: UserId) -> RepoResult<Follow> {
        let edge = self.conn.query_row(
            "INSERT INTO follows (follower_id, followee_id)
             VALUES (?1, ?2)
             RETURNING id, follower_id, followee_id, created_at;",
            params![follower_id, followee_id],
            parse_follow_row,
        )?;
        Ok(edge)
    }

    fn delete_edge(&self, follower_id: UserId, followee_id: UserId) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM follows WHERE follower_id = ?1 AND followee_id = ?2;",
            params![follower_id, followee_id],
        )?;
        Ok(changed > 0)
    }

    fn list_followee_ids(&self, follower_id: UserId) -> RepoResult<Vec<UserId>> {
        self.list_ids(
            "SELECT followee_id FROM follows WHERE follower_id = ?1 ORDER BY id ASC;",
            follower_id,
        )
    }

    fn list_follower_ids(&self, followee_id: UserId) -> RepoResult<Vec<UserId>> {
        self.list_ids(
            "SELECT follower_id FROM follows WHERE followee_id = ?1 ORDER BY id ASC;",
            followee_id,
        )
    }
}

fn parse_follow_row(row: &Row<'_>) -> rusqlite::Result<Follow> {
    Ok(Follow {
        id: row.get("id")?,
        follower_id: row.get("follower_id")?,
        followee_id: row.get("followee_id")?,
        created_at: row.get("created_at")?,
    })
}
