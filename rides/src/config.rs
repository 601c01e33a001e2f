use clap::Parser;
use std::path::PathBuf;

/// A TUI for logging into the campus rides service
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Config {
    /// Base URL of the rides server
    #[clap(long, default_value = "http://localhost:8080")]
    pub server: String,

    /// Where should we store data (the saved token, logs)?
    #[clap(long)]
    data_dir: Option<PathBuf>,
}

impl Config {
    /// Get either the configured or a default data directory. If no data
    /// directory can be found (e.g. because `$HOME` is unset) we will use
    /// the current directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("edu", "campus", "rides")
                    .map(|dirs| dirs.data_local_dir().to_owned())
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
