//! Core domain logic for insyd.
//! This crate is the single source of truth for follow-graph and
//! notification fan-out invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget,
};
pub use model::activity::{Activity, ActivityId, ActivityKind, NewActivity};
pub use model::follow::Follow;
pub use model::notification::Notification;
pub use model::user::{User, UserId, SEED_USER_NAMES};
pub use repo::{RepoError, RepoResult};
pub use service::admin_service::AdminService;
pub use service::feed_service::FeedService;
pub use service::graph_service::{FollowOutcome, GraphService};
pub use service::post_service::{PostOutcome, PostService};
pub use service::{ErrorKind, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
