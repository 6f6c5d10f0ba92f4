use clap::Parser;
use std::{path::PathBuf, time::Duration};

/// Log in to (or sign up for) gram from the terminal
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Config {
    /// The GraphQL endpoint to talk to
    #[clap(
        long,
        env = "GRAM_SERVER",
        default_value = "http://localhost:4000/graphql"
    )]
    pub server: String,

    /// Where should we store data?
    #[clap(long, env = "GRAM_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Request timeout, in seconds
    #[clap(long, env = "GRAM_REQUEST_TIMEOUT", default_value = "30", value_parser = duration_parser)]
    pub request_timeout: Duration,
}

fn duration_parser(s: &str) -> Result<Duration, std::num::ParseIntError> {
    s.parse().map(Duration::from_secs)
}

impl Config {
    /// Get either the configured or a default data directory. If no data
    /// directory can be found (e.g. because `$HOME` is unset) we will use the
    /// current directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("com", "gram", "gram")
                    .map(|dirs| dirs.data_local_dir().to_owned())
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Where the session (and so the auth token) is kept between runs
    pub fn session_file(&self) -> PathBuf {
        self.data_dir().join("session.json")
    }

    /// Where logs go. The terminal is busy with the UI.
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir().join("logs")
    }
}
