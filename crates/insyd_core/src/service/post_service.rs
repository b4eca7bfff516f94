//! Blog/comment posting with follower fan-out.
//!
//! # Responsibility
//! - Append a `blog` or `comment` activity for an existing user.
//! - Deliver one notification per current follower.
//!
//! # Invariants
//! - Unknown posters are rejected with `UserNotFound` before any write.
//! - Fan-out count equals the follower count read inside the same
//!   transaction that writes the notifications.
//! - Every notification of one post references the same activity.

use crate::model::activity::{Activity, ActivityKind, NewActivity};
use crate::model::user::UserId;
use crate::repo::activity_repo::{ActivityRepository, SqliteActivityRepository};
use crate::repo::follow_repo::{FollowRepository, SqliteFollowRepository};
use crate::repo::notification_repo::{NotificationRepository, SqliteNotificationRepository};
use crate::repo::user_repo::SqliteUserRepository;
use crate::service::{require_user, ServiceError, ServiceResult};
use log::info;
use rusqlite::{Connection, TransactionBehavior};

/// Result of one post and its fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostOutcome {
    pub activity: Activity,
    /// Followers that received a notification, in edge creation order.
    pub recipients: Vec<UserId>,
}

impl PostOutcome {
    /// Number of notifications written.
    pub fn notified(&self) -> usize {
        self.recipients.len()
    }
}

/// Posting service over one SQLite connection.
pub struct PostService<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> PostService<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    /// Posts a blog entry and notifies every follower.
    pub fn post_blog(&mut self, user_id: UserId, content: &str) -> ServiceResult<PostOutcome> {
        self.post(ActivityKind::Blog, user_id, content)
    }

    /// Posts a comment and notifies every follower.
    pub fn post_comment(&mut self, user_id: UserId, content: &str) -> ServiceResult<PostOutcome> {
        self.post(ActivityKind::Comment, user_id, content)
    }

    /// Posts content of a publishable kind (`Blog` or `Comment`).
    ///
    /// Content is stored verbatim; emptiness is left to callers.
    pub fn post(
        &mut self,
        kind: ActivityKind,
        user_id: UserId,
        content: &str,
    ) -> ServiceResult<PostOutcome> {
        if !matches!(kind, ActivityKind::Blog | ActivityKind::Comment) {
            return Err(ServiceError::InvalidInput(format!(
                "`{}` activities cannot be posted",
                kind.as_str()
            )));
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let poster = require_user(&SqliteUserRepository::new(&tx), user_id)?;
        let new_activity = NewActivity::post(&poster, kind, content);
        let activity = SqliteActivityRepository::new(&tx).append_activity(&new_activity)?;

        let recipients = SqliteFollowRepository::new(&tx).list_follower_ids(user_id)?;
        let text = new_activity.notification_text(&poster);
        let notifications = SqliteNotificationRepository::new(&tx);
        for recipient in &recipients {
            notifications.append_notification(*recipient, activity.id, &text)?;
        }
        tx.commit()?;

        info!(
            "event=post module=service status=ok kind={} user_id={} activity_id={} notified={}",
            kind.as_str(),
            user_id,
            activity.id,
            recipients.len()
        );
        Ok(PostOutcome {
            activity,
            recipients,
        })
    }
}
