//! Command line configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "upnext", version, about = "Terminal music player with a persistent play queue")]
pub struct Args {
    /// Playlist file (JSON) whose tracks are added to the queue on startup
    #[arg(long)]
    pub playlist: Option<PathBuf>,

    /// Directory for the saved session and favorites
    #[arg(long, default_value = ".cache")]
    pub state_dir: PathBuf,

    /// Directory for log files
    #[arg(long, default_value = ".logs")]
    pub log_dir: PathBuf,

    /// Length of every simulated track, in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub track_secs: u64,

    /// How often the engine reports progress, in milliseconds
    #[arg(long, default_value_t = 250, value_parser = clap::value_parser!(u64).range(10..))]
    pub status_interval_ms: u64,

    /// Keep session and favorites in memory only
    #[arg(long)]
    pub ephemeral: bool,
}

impl Args {
    pub fn track_duration(&self) -> Duration {
        Duration::from_secs(self.track_secs)
    }

    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(self.status_interval_ms)
    }
}
