//! Administrative user management and storage reset.
//!
//! # Responsibility
//! - Wipe and re-seed storage for demo/test environments.
//! - Create and list users.
//!
//! # Invariants
//! - Reset is refused unless explicitly allowed at construction.
//! - Reset rebuilds the schema and inserts `SEED_USER_NAMES` in one
//!   transaction; ids restart at 1.

use crate::db::migrations::reset_schema_in_tx;
use crate::model::user::{normalize_user_name, User, SEED_USER_NAMES};
use crate::repo::user_repo::{SqliteUserRepository, UserRepository};
use crate::service::{ServiceError, ServiceResult};
use log::{info, warn};
use rusqlite::{Connection, TransactionBehavior};

/// User/admin service over one SQLite connection.
pub struct AdminService<'conn> {
    conn: &'conn mut Connection,
    allow_reset: bool,
}

impl<'conn> AdminService<'conn> {
    /// Creates the service; `allow_reset` gates [`AdminService::reset_and_seed`].
    pub fn new(conn: &'conn mut Connection, allow_reset: bool) -> Self {
        Self { conn, allow_reset }
    }

    /// Destroys all rows, recreates the schema and inserts the starter users.
    ///
    /// # Errors
    /// - `ResetDisabled` when the service was built without reset permission.
    pub fn reset_and_seed(&mut self) -> ServiceResult<Vec<User>> {
        if !self.allow_reset {
            warn!("event=reset module=service status=rejected reason=disabled");
            return Err(ServiceError::ResetDisabled);
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        reset_schema_in_tx(&tx)?;

        let users = SqliteUserRepository::new(&tx);
        let mut seeded = Vec::with_capacity(SEED_USER_NAMES.len());
        for name in SEED_USER_NAMES {
            seeded.push(users.create_user(name)?);
        }
        tx.commit()?;

        info!(
            "event=reset module=service status=ok seeded_users={}",
            seeded.len()
        );
        Ok(seeded)
    }

    /// Creates one user from a display name.
    ///
    /// # Errors
    /// - `InvalidInput` when the name is blank.
    pub fn create_user(&self, name: &str) -> ServiceResult<User> {
        let name = normalize_user_name(name)
            .ok_or_else(|| ServiceError::InvalidInput("user name cannot be empty".to_string()))?;
        let user = SqliteUserRepository::new(self.conn).create_user(&name)?;
        info!(
            "event=user_create module=service status=ok user_id={}",
            user.id
        );
        Ok(user)
    }

    /// Lists every user ordered by id.
    pub fn list_users(&self) -> ServiceResult<Vec<User>> {
        Ok(SqliteUserRepository::new(self.conn).list_users()?)
    }
}
