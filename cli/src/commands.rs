pub mod analyze;
pub mod endpoint;
pub mod info;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use tlsgrade_common::config::{Config, DEFAULT_API_URL, DEFAULT_CACHE_DIR, MAX_WAIT_TIME, PollPolicy};
use tlsgrade_core::AnalysisError;
use tlsgrade_core::AnalysisService;
use tlsgrade_core::cache::disabled::DisabledStore;
use tlsgrade_core::cache::fs::FsResultStore;
use tlsgrade_core::client::SslLabsClient;
use tlsgrade_core::ports::{ProgressReporter, ResultStore};

#[derive(Parser)]
#[command(name = "tlsgrade")]
#[command(about = "Grades the TLS configuration of a domain using SSL Labs.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Neither read nor write cached results
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Directory holding cached results
    #[arg(long, global = true, value_name = "DIR", default_value = DEFAULT_CACHE_DIR)]
    pub cache_dir: PathBuf,

    /// Base URL of the SSL Labs API
    #[arg(long, global = true, value_name = "URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Give up on an analysis after this many seconds
    #[arg(long, global = true, value_name = "SECS", default_value_t = MAX_WAIT_TIME.as_secs())]
    pub max_wait: u64,

    /// Print less; repeat to print only the grades
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a full assessment of a domain and print the report
    #[command(alias = "a")]
    Analyze { domain: String },
    /// Show the SSL Labs service status
    #[command(alias = "i")]
    Info,
    /// Show the details of one endpoint of a domain's latest assessment
    #[command(alias = "e")]
    Endpoint { domain: String, ip: String },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            no_color: self.no_color,
            quiet: self.quiet,
            use_cache: !self.no_cache,
            cache_dir: self.cache_dir.clone(),
            api_url: self.api_url.clone(),
            poll: PollPolicy {
                max_wait: Duration::from_secs(self.max_wait),
                ..PollPolicy::default()
            },
            ..Config::default()
        }
    }
}

pub fn build_service(
    cfg: &Config,
    reporter: Box<dyn ProgressReporter>,
) -> anyhow::Result<AnalysisService> {
    let client = SslLabsClient::from_config(cfg)?;
    let store: Box<dyn ResultStore> = if cfg.use_cache {
        Box::new(FsResultStore::new(&cfg.cache_dir))
    } else {
        Box::new(DisabledStore)
    };

    Ok(AnalysisService::new(Box::new(client), store, reporter).with_policy(cfg.poll))
}

pub const EXIT_VALIDATION: u8 = 1;
pub const EXIT_FAILURE: u8 = 2;
pub const EXIT_CANCELLED: u8 = 130;

pub fn exit_code(err: &anyhow::Error) -> ExitCode {
    ExitCode::from(exit_status(err))
}

fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<AnalysisError>() {
        Some(AnalysisError::Validation(_)) => EXIT_VALIDATION,
        Some(AnalysisError::Cancelled { .. }) => EXIT_CANCELLED,
        _ => EXIT_FAILURE,
    }
}
