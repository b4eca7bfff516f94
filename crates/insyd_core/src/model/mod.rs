//! Social domain model.
//!
//! # Responsibility
//! - Define the records persisted by core: users, follow edges, activities
//!   and notifications.
//! - Keep wire naming (`camelCase`) stable for HTTP and CLI callers.
//!
//! # Invariants
//! - Every record is identified by a store-generated, monotonic `i64` id.
//! - Activities and notifications are append-only.
//! - A follow edge never points from a user to itself.

pub mod activity;
pub mod follow;
pub mod notification;
pub mod user;

/// Store-generated row identifier shared by every table.
pub type RowId = i64;
