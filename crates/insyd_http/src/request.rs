//! Request bodies and their validation into core inputs.
//!
//! Ids are accepted as JSON numbers or numeric strings; the form client
//! submits `<select>` values as strings.

use crate::error::ApiError;
use insyd_core::UserId;
use serde::{Deserialize, Serialize};

/// User id as sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    fn resolve(&self, field: &str) -> Result<UserId, ApiError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => text
                .trim()
                .parse::<UserId>()
                .map_err(|_| ApiError::validation(format!("`{field}` must be a user id"))),
        }
    }
}

/// Parses a user id taken from a URL path segment.
pub fn parse_path_id(segment: &str) -> Result<UserId, ApiError> {
    RawId::Text(segment.to_string()).resolve("userId")
}

fn require_id(value: Option<&RawId>, field: &str) -> Result<UserId, ApiError> {
    value
        .ok_or_else(|| ApiError::validation(format!("`{field}` is required")))?
        .resolve(field)
}

/// Body of `/follow` and `/unfollow`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowRequest {
    pub follower_id: Option<RawId>,
    pub followee_id: Option<RawId>,
}

impl FollowRequest {
    /// Returns `(follower_id, followee_id)`.
    pub fn validate(&self) -> Result<(UserId, UserId), ApiError> {
        Ok((
            require_id(self.follower_id.as_ref(), "followerId")?,
            require_id(self.followee_id.as_ref(), "followeeId")?,
        ))
    }
}

/// Body of `/blog` and `/comment`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub user_id: Option<RawId>,
    #[serde(default)]
    pub content: String,
}

impl PostRequest {
    pub fn validate(&self) -> Result<UserId, ApiError> {
        require_id(self.user_id.as_ref(), "userId")
    }
}

/// Body of `POST /users`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
}

/// Success body of `/follow` and `/unfollow`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeResponse {
    pub success: bool,
    pub activity_id: i64,
}

/// Success body of `/blog` and `/comment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub success: bool,
    pub activity_id: i64,
    pub notified: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
