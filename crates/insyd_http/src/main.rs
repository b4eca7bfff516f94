//! `insyd-server` entry point.

use insyd_core::db::open_db;
use insyd_core::{init_logging, init_stderr_logging};
use insyd_http::{serve, ServerConfig};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("insyd-server: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let config = ServerConfig::from_env()?;
    match config.log_dir.as_deref() {
        Some(dir) => init_logging(&config.log_level, dir)?,
        None => init_stderr_logging(&config.log_level)?,
    }

    let conn = open_db(&config.db_path)
        .map_err(|err| format!("failed to open `{}`: {err}", config.db_path.display()))?;
    serve(&config, conn)
        .await
        .map_err(|err| format!("server failed: {err}"))
}
