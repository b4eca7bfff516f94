//! `insyd` command-line entry point.
//!
//! # Responsibility
//! - Drive core use-cases against a database file without the HTTP server.
//! - Print results as JSON on stdout and failures as `kind: message`.

use clap::Parser;
use insyd_core::db::{open_db, open_db_in_memory};
use insyd_core::{init_logging, init_stderr_logging};
use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let logging = match cli.log_dir.as_deref() {
        Some(dir) => init_logging(&cli.log_level, dir),
        None => init_stderr_logging(&cli.log_level),
    };
    if let Err(err) = logging {
        eprintln!("logging: {err}");
        return ExitCode::FAILURE;
    }

    let opened = if cli.command.needs_db() {
        open_db(&cli.db)
    } else {
        open_db_in_memory()
    };
    let mut conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("unhandled: failed to open `{}`: {err}", cli.db.display());
            return ExitCode::FAILURE;
        }
    };

    match cli.command.execute(&mut conn) {
        Ok(output) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&output).unwrap_or_else(|_| output.to_string())
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}: {err}", err.kind());
            ExitCode::FAILURE
        }
    }
}
