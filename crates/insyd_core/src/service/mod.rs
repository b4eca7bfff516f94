//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Own transaction boundaries for multi-step mutations.
//! - Classify every failure into a stable, machine-readable `ErrorKind`.
//!
//! # Invariants
//! - Validation and conflict checks run before any write.
//! - Every mutating use-case commits all of its rows or none of them.

use crate::db::DbError;
use crate::model::user::{User, UserId};
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod admin_service;
pub mod feed_service;
pub mod graph_service;
pub mod post_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Machine-readable failure category shared by every boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input rejected before touching storage.
    Validation,
    /// Write would duplicate existing state.
    Conflict,
    /// Referenced user or edge does not exist.
    NotFound,
    /// Operation disabled by configuration.
    Forbidden,
    /// Anything else.
    Unhandled,
}

impl ErrorKind {
    /// Stable wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation_error",
            Self::Conflict => "conflict",
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::Unhandled => "unhandled",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service error for social use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// A user tried to follow or unfollow themself.
    SelfReference(UserId),
    /// The follow edge already exists.
    DuplicateEdge { follower: UserId, followee: UserId },
    /// The follow edge to remove does not exist.
    EdgeNotFound { follower: UserId, followee: UserId },
    UserNotFound(UserId),
    InvalidInput(String),
    /// Storage reset requested while disabled.
    ResetDisabled,
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SelfReference(_) | Self::InvalidInput(_) => ErrorKind::Validation,
            Self::DuplicateEdge { .. } => ErrorKind::Conflict,
            Self::EdgeNotFound { .. } | Self::UserNotFound(_) => ErrorKind::NotFound,
            Self::ResetDisabled => ErrorKind::Forbidden,
            Self::Repo(_) => ErrorKind::Unhandled,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelfReference(user_id) => {
                write!(f, "user {user_id} cannot follow or unfollow themself")
            }
            Self::DuplicateEdge { follower, followee } => {
                write!(f, "user {follower} already follows user {followee}")
            }
            Self::EdgeNotFound { follower, followee } => {
                write!(f, "user {follower} does not follow user {followee}")
            }
            Self::UserNotFound(user_id) => write!(f, "user not found: {user_id}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::ResetDisabled => write!(f, "storage reset is disabled"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<DbError> for ServiceError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

impl From<rusqlite::Error> for ServiceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(RepoError::from(value))
    }
}

/// Loads a user or fails with `UserNotFound`.
pub(crate) fn require_user(users: &impl UserRepository, user_id: UserId) -> ServiceResult<User> {
    users
        .get_user(user_id)?
        .ok_or(ServiceError::UserNotFound(user_id))
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, ServiceError};
    use crate::repo::RepoError;

    #[test]
    fn kinds_follow_error_taxonomy() {
        assert_eq!(ServiceError::SelfReference(1).kind(), ErrorKind::Validation);
        assert_eq!(
            ServiceError::DuplicateEdge {
                follower: 1,
                followee: 2
            }
            .kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            ServiceError::EdgeNotFound {
                follower: 1,
                followee: 2
            }
            .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(ServiceError::UserNotFound(9).kind(), ErrorKind::NotFound);
        assert_eq!(ServiceError::ResetDisabled.kind(), ErrorKind::Forbidden);
        assert_eq!(
            ServiceError::Repo(RepoError::InvalidData("x".to_string())).kind(),
            ErrorKind::Unhandled
        );
    }

    #[test]
    fn kind_names_are_stable() {
        assert_eq!(ErrorKind::Validation.as_str(), "validation_error");
        assert_eq!(ErrorKind::NotFound.to_string(), "not_found");
    }
}
