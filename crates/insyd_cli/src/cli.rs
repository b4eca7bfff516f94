//! Command-line definitions and dispatch onto core services.

use insyd_core::{
    core_version, AdminService, FeedService, GraphService, PostService, ServiceResult, UserId,
};
use rusqlite::Connection;
use serde_json::{json, Value};
use std::path::PathBuf;

/// Administrative and demo client for an insyd database.
#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file
    #[clap(long, env = "INSYD_DB", default_value = "insyd.db")]
    pub db: PathBuf,

    /// Absolute directory for log files; logs go to stderr when unset
    #[clap(long, env = "INSYD_LOG_DIR")]
    pub log_dir: Option<String>,

    /// trace|debug|info|warn|error
    #[clap(long, env = "INSYD_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, clap::Subcommand)]
pub enum Command {
    /// Wipe all data and seed Alice, Bob and Charlie
    Reset,
    /// List users
    Users,
    /// Create a user
    AddUser { name: String },
    /// Follow a user
    Follow { follower: UserId, followee: UserId },
    /// Unfollow a user
    Unfollow { follower: UserId, followee: UserId },
    /// Post a blog entry and notify followers
    Blog { user: UserId, content: String },
    /// Post a comment and notify followers
    Comment { user: UserId, content: String },
    /// List a user's notifications, newest first
    Notifications { user: UserId },
    /// List ids a user follows
    Following { user: UserId },
    /// List ids following a user
    Followers { user: UserId },
    /// List a user's activities, newest first
    Activities { user: UserId },
    /// Print the core version
    Version,
}

impl Command {
    /// Whether the command needs an open database.
    pub fn needs_db(&self) -> bool {
        !matches!(self, Self::Version)
    }

    /// Runs the command and returns its JSON output.
    pub fn execute(&self, conn: &mut Connection) -> ServiceResult<Value> {
        let output = match self {
            Self::Reset => json!(AdminService::new(conn, true).reset_and_seed()?),
            Self::Users => json!(AdminService::new(conn, false).list_users()?),
            Self::AddUser { name } => json!(AdminService::new(conn, false).create_user(name)?),
            Self::Follow { follower, followee } => {
                let outcome = GraphService::new(conn).follow(*follower, *followee)?;
                json!({ "success": true, "activityId": outcome.activity.id })
            }
            Self::Unfollow { follower, followee } => {
                let outcome = GraphService::new(conn).unfollow(*follower, *followee)?;
                json!({ "success": true, "activityId": outcome.activity.id })
            }
            Self::Blog { user, content } => {
                let outcome = PostService::new(conn).post_blog(*user, content)?;
                json!({
                    "success": true,
                    "activityId": outcome.activity.id,
                    "notified": outcome.notified(),
                })
            }
            Self::Comment { user, content } => {
                let outcome = PostService::new(conn).post_comment(*user, content)?;
                json!({
                    "success": true,
                    "activityId": outcome.activity.id,
                    "notified": outcome.notified(),
                })
            }
            Self::Notifications { user } => {
                json!(FeedService::from_connection(conn).notifications_for(*user)?)
            }
            Self::Following { user } => json!(GraphService::new(conn).following(*user)?),
            Self::Followers { user } => json!(GraphService::new(conn).followers(*user)?),
            Self::Activities { user } => {
                json!(FeedService::from_connection(conn).activities_for(*user)?)
            }
            Self::Version => json!({ "version": core_version() }),
        };
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;
    use insyd_core::db::open_db_in_memory;
    use insyd_core::ErrorKind;

    #[test]
    fn parses_subcommands_with_ids() {
        let cli = Cli::try_parse_from(["insyd", "--db", "demo.db", "follow", "2", "1"]).unwrap();
        assert_eq!(cli.db.to_str(), Some("demo.db"));
        assert_eq!(
            cli.command,
            Command::Follow {
                follower: 2,
                followee: 1
            }
        );

        assert!(Cli::try_parse_from(["insyd", "follow", "two", "1"]).is_err());
    }

    #[test]
    fn executes_demo_flow_against_in_memory_db() {
        let mut conn = open_db_in_memory().unwrap();

        let users = Command::Reset.execute(&mut conn).unwrap();
        assert_eq!(users[0]["name"], "Alice");

        Command::Follow {
            follower: 2,
            followee: 1,
        }
        .execute(&mut conn)
        .unwrap();
        let posted = Command::Blog {
            user: 1,
            content: "hello".to_string(),
        }
        .execute(&mut conn)
        .unwrap();
        assert_eq!(posted["notified"], 1);

        let feed = Command::Notifications { user: 2 }
            .execute(&mut conn)
            .unwrap();
        assert_eq!(feed[0]["content"], "Alice posted a new blog: hello");
    }

    #[test]
    fn surfaces_error_kinds() {
        let mut conn = open_db_in_memory().unwrap();
        Command::Reset.execute(&mut conn).unwrap();

        let err = Command::Unfollow {
            follower: 1,
            followee: 2,
        }
        .execute(&mut conn)
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(!Command::Version.needs_db());
    }
}
