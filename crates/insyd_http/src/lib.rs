//! HTTP boundary for insyd core.
//!
//! # Responsibility
//! - Parse and validate JSON requests into core inputs.
//! - Map core error kinds onto HTTP statuses and a stable error envelope.
//! - Own process configuration and the server lifecycle.
//!
//! # Invariants
//! - Handlers never panic on bad input; every failure is an `ApiError`.
//! - Domain rules live in `insyd_core`; this crate only translates.

pub mod config;
pub mod error;
pub mod request;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;

use log::info;
use rusqlite::Connection;

/// Serves the API on `config.bind` until Ctrl-C.
pub async fn serve(config: &ServerConfig, conn: Connection) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    let router = build_router(AppState::new(conn, config.allow_reset));

    info!(
        "event=server_start module=http status=ok bind={} allow_reset={}",
        listener.local_addr()?,
        config.allow_reset
    );
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("event=server_stop module=http status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("event=server_stop module=http status=error error={err}");
    }
}
