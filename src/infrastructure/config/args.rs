use std::path::PathBuf;

use clap::Parser;

use super::app_config::LogLevel;
use crate::domain::entities::CachingPolicy;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "asyncimage",
    version,
    about = "Fetch remote images through an in-memory session cache",
    long_about = None
)]
pub struct CliArgs {
    /// Image URLs to fetch.
    #[arg(required = true, value_name = "URL")]
    pub urls: Vec<String>,

    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Caching policy.
    #[arg(short, long, value_enum)]
    pub policy: Option<CachingPolicy>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// `User-Agent` header value.
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Number of times each URL is fetched.
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub repeat: u32,

    /// Empty the session cache between repeat rounds.
    #[arg(long)]
    pub clear_cache: bool,
}
