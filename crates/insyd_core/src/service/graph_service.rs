//! Follow graph use-case service.
//!
//! # Responsibility
//! - Create and remove follow edges.
//! - Log each change as an activity and notify the followee.
//! - Answer following/followers queries.
//!
//! # Invariants
//! - Self-reference is rejected before any storage access.
//! - A successful follow/unfollow writes exactly one activity and exactly one
//!   notification, in the same immediate transaction as the edge change.
//! - A failed call leaves storage untouched.

use crate::model::activity::{Activity, NewActivity};
use crate::model::follow::EdgeChange;
use crate::model::notification::Notification;
use crate::model::user::UserId;
use crate::repo::activity_repo::{ActivityRepository, SqliteActivityRepository};
use crate::repo::follow_repo::{FollowRepository, SqliteFollowRepository};
use crate::repo::notification_repo::{NotificationRepository, SqliteNotificationRepository};
use crate::repo::user_repo::SqliteUserRepository;
use crate::repo::RepoError;
use crate::service::{require_user, ServiceError, ServiceResult};
use log::{info, warn};
use rusqlite::{Connection, TransactionBehavior};

/// Rows written by one successful follow or unfollow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowOutcome {
    pub activity: Activity,
    /// Delivery to the followee.
    pub notification: Notification,
}

/// Follow graph service over one SQLite connection.
pub struct GraphService<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> GraphService<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    /// Makes `follower_id` follow `followee_id`.
    ///
    /// # Errors
    /// - `SelfReference` when both ids are equal.
    /// - `UserNotFound` when either user is missing.
    /// - `DuplicateEdge` when the edge already exists.
    pub fn follow(
        &mut self,
        follower_id: UserId,
        followee_id: UserId,
    ) -> ServiceResult<FollowOutcome> {
        self.change_edge(EdgeChange::Follow, follower_id, followee_id)
    }

    /// Removes the `follower_id -> followee_id` edge.
    ///
    /// # Errors
    /// - `SelfReference` when both ids are equal.
    /// - `UserNotFound` when either user is missing.
    /// - `EdgeNotFound` when no such edge exists.
    pub fn unfollow(
        &mut self,
        follower_id: UserId,
        followee_id: UserId,
    ) -> ServiceResult<FollowOutcome> {
        self.change_edge(EdgeChange::Unfollow, follower_id, followee_id)
    }

    /// Ids `user_id` follows, in edge creation order.
    pub fn following(&self, user_id: UserId) -> ServiceResult<Vec<UserId>> {
        Ok(SqliteFollowRepository::new(self.conn).list_followee_ids(user_id)?)
    }

    /// Ids following `user_id`, in edge creation order.
    pub fn followers(&self, user_id: UserId) -> ServiceResult<Vec<UserId>> {
        Ok(SqliteFollowRepository::new(self.conn).list_follower_ids(user_id)?)
    }

    fn change_edge(
        &mut self,
        change: EdgeChange,
        follower_id: UserId,
        followee_id: UserId,
    ) -> ServiceResult<FollowOutcome> {
        let event = match change {
            EdgeChange::Follow => "follow",
            EdgeChange::Unfollow => "unfollow",
        };

        if follower_id == followee_id {
            warn!(
                "event={event} module=service status=rejected reason=self_reference user_id={follower_id}"
            );
            return Err(ServiceError::SelfReference(follower_id));
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let users = SqliteUserRepository::new(&tx);
        let follower = require_user(&users, follower_id)?;
        require_user(&users, followee_id)?;

        let edges = SqliteFollowRepository::new(&tx);
        let new_activity = match change {
            EdgeChange::Follow => {
                if edges.find_edge(follower_id, followee_id)?.is_some() {
                    return Err(ServiceError::DuplicateEdge {
                        follower: follower_id,
                        followee: followee_id,
                    });
                }
                edges
                    .insert_edge(follower_id, followee_id)
                    .map_err(|err| match err {
                        RepoError::Constraint(_) => ServiceError::DuplicateEdge {
                            follower: follower_id,
                            followee: followee_id,
                        },
                        other => ServiceError::Repo(other),
                    })?;
                NewActivity::follow(&follower, followee_id)
            }
            EdgeChange::Unfollow => {
                if !edges.delete_edge(follower_id, followee_id)? {
                    return Err(ServiceError::EdgeNotFound {
                        follower: follower_id,
                        followee: followee_id,
                    });
                }
                NewActivity::unfollow(&follower, followee_id)
            }
        };

        let activity = SqliteActivityRepository::new(&tx).append_activity(&new_activity)?;
        let notification = SqliteNotificationRepository::new(&tx).append_notification(
            followee_id,
            activity.id,
            &new_activity.notification_text(&follower),
        )?;
        tx.commit()?;

        info!(
            "event={} module=service status=ok follower_id={} followee_id={} activity_id={}",
            event, follower_id, followee_id, activity.id
        );
        Ok(FollowOutcome {
            activity,
            notification,
        })
    }
}
