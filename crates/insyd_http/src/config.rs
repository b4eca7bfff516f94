//! Server configuration loaded from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `INSYD_BIND` | `0.0.0.0:$PORT` |
//! | `PORT` | `4000` |
//! | `INSYD_DB` | `insyd.db` |
//! | `INSYD_LOG_LEVEL` | build-mode default |
//! | `INSYD_LOG_DIR` | unset (stderr) |
//! | `INSYD_ALLOW_RESET` | `true` in debug builds, `false` in release |

use insyd_core::default_log_level;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_DB_PATH: &str = "insyd.db";

/// Runtime settings for `insyd-server`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` logs to stderr.
    pub log_dir: Option<String>,
    /// Enables the destructive `/init` and `/admin/reset` endpoints.
    pub allow_reset: bool,
}

impl ServerConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind = match get("INSYD_BIND") {
            Some(value) => value
                .parse::<SocketAddr>()
                .map_err(|err| format!("invalid INSYD_BIND `{value}`: {err}"))?,
            None => {
                let port = match get("PORT") {
                    Some(value) => value
                        .parse::<u16>()
                        .map_err(|err| format!("invalid PORT `{value}`: {err}"))?,
                    None => DEFAULT_PORT,
                };
                SocketAddr::from(([0, 0, 0, 0], port))
            }
        };

        let allow_reset = match get("INSYD_ALLOW_RESET") {
            Some(value) => parse_flag(&value)
                .ok_or_else(|| format!("invalid INSYD_ALLOW_RESET `{value}`; expected true|false"))?,
            None => cfg!(debug_assertions),
        };

        Ok(Self {
            bind,
            db_path: PathBuf::from(get("INSYD_DB").unwrap_or_else(|| DEFAULT_DB_PATH.to_string())),
            log_level: get("INSYD_LOG_LEVEL").unwrap_or_else(|| default_log_level().to_string()),
            log_dir: get("INSYD_LOG_DIR"),
            allow_reset,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::ServerConfig;
    use std::collections::HashMap;
    use std::net::SocketAddr;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_match_original_port_and_db_file() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind, SocketAddr::from(([0, 0, 0, 0], 4000)));
        assert_eq!(config.db_path.to_str(), Some("insyd.db"));
        assert_eq!(config.log_dir, None);
        assert_eq!(config.allow_reset, cfg!(debug_assertions));
    }

    #[test]
    fn bind_overrides_port() {
        let config = config_from(&[("PORT", "5000"), ("INSYD_BIND", "127.0.0.1:7000")]).unwrap();
        assert_eq!(config.bind, SocketAddr::from(([127, 0, 0, 1], 7000)));

        let config = config_from(&[("PORT", "5000")]).unwrap();
        assert_eq!(config.bind.port(), 5000);
    }

    #[test]
    fn invalid_values_are_reported() {
        assert!(config_from(&[("PORT", "http")]).unwrap_err().contains("PORT"));
        assert!(config_from(&[("INSYD_ALLOW_RESET", "maybe")])
            .unwrap_err()
            .contains("INSYD_ALLOW_RESET"));
    }

    #[test]
    fn reset_flag_and_blank_values() {
        let config = config_from(&[("INSYD_ALLOW_RESET", "OFF"), ("INSYD_LOG_DIR", "  ")]).unwrap();
        assert!(!config.allow_reset);
        assert_eq!(config.log_dir, None);
    }
}
