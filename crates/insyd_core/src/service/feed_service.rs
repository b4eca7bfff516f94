//! Read-side queries over notifications and the activity log.
//!
//! # Invariants
//! - Both listings are newest first: `created_at DESC, id DESC`.
//! - Unknown users yield empty lists, not errors.

use crate::model::activity::Activity;
use crate::model::notification::Notification;
use crate::model::user::UserId;
use crate::repo::activity_repo::{ActivityRepository, SqliteActivityRepository};
use crate::repo::notification_repo::{NotificationRepository, SqliteNotificationRepository};
use crate::service::ServiceResult;
use rusqlite::Connection;

/// Feed service facade over repository implementations.
pub struct FeedService<N: NotificationRepository, A: ActivityRepository> {
    notifications: N,
    activities: A,
}

impl<'conn> FeedService<SqliteNotificationRepository<'conn>, SqliteActivityRepository<'conn>> {
    /// Builds a feed service reading straight from `conn`.
    pub fn from_connection(conn: &'conn Connection) -> Self {
        Self::new(
            SqliteNotificationRepository::new(conn),
            SqliteActivityRepository::new(conn),
        )
    }
}

impl<N: NotificationRepository, A: ActivityRepository> FeedService<N, A> {
    pub fn new(notifications: N, activities: A) -> Self {
        Self {
            notifications,
            activities,
        }
    }

    /// Every notification delivered to `user_id`, newest first.
    pub fn notifications_for(&self, user_id: UserId) -> ServiceResult<Vec<Notification>> {
        Ok(self.notifications.list_for_recipient(user_id)?)
    }

    /// Every activity performed by `user_id`, newest first.
    pub fn activities_for(&self, user_id: UserId) -> ServiceResult<Vec<Activity>> {
        Ok(self.activities.list_activities_for_user(user_id)?)
    }
}
