//! Shared handler state.
//!
//! # Invariants
//! - One SQLite connection serves every request; access is serialized by a
//!   mutex and runs on the blocking thread pool.

use crate::error::ApiError;
use insyd_core::ServiceResult;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
    allow_reset: bool,
}

impl AppState {
    pub fn new(conn: Connection, allow_reset: bool) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            allow_reset,
        }
    }

    pub fn allow_reset(&self) -> bool {
        self.allow_reset
    }

    /// Runs `op` against the connection on the blocking pool.
    pub async fn run<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut Connection) -> ServiceResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let joined = tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| ApiError::internal("storage mutex poisoned"))?;
            op(&mut guard).map_err(ApiError::from)
        })
        .await;

        match joined {
            Ok(result) => result,
            Err(err) => Err(ApiError::internal(format!("storage task failed: {err}"))),
        }
    }
}
