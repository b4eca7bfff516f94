//! Activity log model.
//!
//! # Responsibility
//! - Represent one action taken by a user.
//! - Render the human-readable texts derived from an action.
//!
//! # Invariants
//! - Activities are append-only; they are never updated or deleted outside a
//!   full storage reset.
//! - `kind` maps one-to-one onto the persisted `type` column.

use serde::{Deserialize, Serialize};

use super::user::{User, UserId};
use super::RowId;

/// Stable activity identifier.
pub type ActivityId = RowId;

/// Category of a logged action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Follow,
    Unfollow,
    Blog,
    Comment,
}

impl ActivityKind {
    /// Persisted/wire name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Follow => "follow",
            Self::Unfollow => "unfollow",
            Self::Blog => "blog",
            Self::Comment => "comment",
        }
    }

    /// Parses a persisted kind name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "follow" => Some(Self::Follow),
            "unfollow" => Some(Self::Unfollow),
            "blog" => Some(Self::Blog),
            "comment" => Some(Self::Comment),
            _ => None,
        }
    }
}

/// Immutable log entry for one user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: ActivityId,
    /// Acting user.
    pub user_id: UserId,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub content: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// Activity row that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    pub user_id: UserId,
    pub kind: ActivityKind,
    pub content: String,
}

impl NewActivity {
    /// Log entry for `actor` following `followee_id`.
    pub fn follow(actor: &User, followee_id: UserId) -> Self {
        Self {
            user_id: actor.id,
            kind: ActivityKind::Follow,
            content: format!("{} followed User {}", actor.name, followee_id),
        }
    }

    /// Log entry for `actor` unfollowing `followee_id`.
    pub fn unfollow(actor: &User, followee_id: UserId) -> Self {
        Self {
            user_id: actor.id,
            kind: ActivityKind::Unfollow,
            content: format!("{} unfollowed User {}", actor.name, followee_id),
        }
    }

    /// Log entry for a blog or comment; content is stored verbatim.
    pub fn post(actor: &User, kind: ActivityKind, content: impl Into<String>) -> Self {
        Self {
            user_id: actor.id,
            kind,
            content: content.into(),
        }
    }

    /// Text delivered to each recipient of this activity.
    pub fn notification_text(&self, actor: &User) -> String {
        match self.kind {
            ActivityKind::Follow => format!("You have a new follower: {}!", actor.name),
            ActivityKind::Unfollow => format!("{} unfollowed you", actor.name),
            ActivityKind::Blog => format!("{} posted a new blog: {}", actor.name, self.content),
            ActivityKind::Comment => format!("{} commented: {}", actor.name, self.content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ActivityKind, NewActivity};
    use crate::model::user::User;

    fn alice() -> User {
        User {
            id: 1,
            name: "Alice".to_string(),
        }
    }

    #[test]
    fn kind_names_parse_back() {
        for kind in [
            ActivityKind::Follow,
            ActivityKind::Unfollow,
            ActivityKind::Blog,
            ActivityKind::Comment,
        ] {
            assert_eq!(ActivityKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ActivityKind::parse("like"), None);
    }

    #[test]
    fn follow_texts_name_actor_and_target() {
        let activity = NewActivity::follow(&alice(), 2);
        assert_eq!(activity.content, "Alice followed User 2");
        assert_eq!(
            activity.notification_text(&alice()),
            "You have a new follower: Alice!"
        );

        let activity = NewActivity::unfollow(&alice(), 2);
        assert_eq!(activity.content, "Alice unfollowed User 2");
        assert_eq!(activity.notification_text(&alice()), "Alice unfollowed you");
    }

    #[test]
    fn post_texts_embed_content() {
        let blog = NewActivity::post(&alice(), ActivityKind::Blog, "hello");
        assert_eq!(blog.content, "hello");
        assert_eq!(
            blog.notification_text(&alice()),
            "Alice posted a new blog: hello"
        );

        let comment = NewActivity::post(&alice(), ActivityKind::Comment, "nice");
        assert_eq!(comment.notification_text(&alice()), "Alice commented: nice");
    }
}
