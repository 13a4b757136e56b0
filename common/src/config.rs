use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.ssllabs.com/api/v2";
pub const DEFAULT_CACHE_DIR: &str = "cache";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const POLL_INTERVAL_INITIAL: Duration = Duration::from_secs(5);
pub const POLL_INTERVAL_RUNNING: Duration = Duration::from_secs(10);
pub const MAX_WAIT_TIME: Duration = Duration::from_secs(15 * 60);

/// Cadence used while waiting for a remote assessment to finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay before the first status check, and after every `DNS` status.
    pub initial_interval: Duration,
    /// Delay once the assessment reports `IN_PROGRESS`.
    pub running_interval: Duration,
    /// Total wall-clock budget of a run.
    pub max_wait: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_interval: POLL_INTERVAL_INITIAL,
            running_interval: POLL_INTERVAL_RUNNING,
            max_wait: MAX_WAIT_TIME,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Disables ANSI colors in every piece of terminal output.
    pub no_color: bool,
    /// 0 prints everything, 1 hides progress chatter, 2 only prints the report.
    pub quiet: u8,
    /// When false, results are neither read from nor written to disk.
    pub use_cache: bool,
    pub cache_dir: PathBuf,
    pub api_url: String,
    pub request_timeout: Duration,
    pub poll: PollPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            no_color: false,
            quiet: 0,
            use_cache: true,
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            poll: PollPolicy::default(),
        }
    }
}
