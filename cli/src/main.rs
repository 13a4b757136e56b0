mod commands;
mod shutdown;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, analyze, endpoint, info};
use terminal::{logging, print};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();
    let cfg = commands.config();

    print::initialize(&cfg);
    if let Err(e) = logging::init(cfg.quiet, cfg.no_color) {
        eprintln!("failed to initialize logging: {e}");
    }
    print::banner(cfg.quiet);

    let result = match &commands.command {
        Commands::Analyze { domain } => {
            print::header("starting analysis", cfg.quiet);
            let cancel = shutdown::cancel_on_signal();
            analyze::analyze(domain, &cfg, &cancel).await
        }
        Commands::Info => info::info(&cfg).await,
        Commands::Endpoint { domain, ip } => endpoint::endpoint(domain, ip, &cfg).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            commands::exit_code(&e)
        }
    }
}
