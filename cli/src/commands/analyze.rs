use std::time::Instant;

use tlsgrade_common::config::Config;
use tlsgrade_core::ports::ProgressReporter;
use tlsgrade_core::progress::LogReporter;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, Span, info};

use crate::commands::build_service;
use crate::terminal::spinner::{self, SpinnerReporter};
use crate::terminal::{format, print, report};

pub async fn analyze(domain: &str, cfg: &Config, cancel: &CancellationToken) -> anyhow::Result<()> {
    info!("Starting TLS analysis for {domain}");

    let span = if cfg.quiet == 0 {
        spinner::analysis_span(domain)
    } else {
        Span::none()
    };
    let reporter: Box<dyn ProgressReporter> = if cfg.quiet == 0 {
        Box::new(SpinnerReporter::new(span.clone()))
    } else {
        Box::new(LogReporter)
    };

    let service = build_service(cfg, reporter)?;
    let started = Instant::now();
    let result = service.run(domain, cancel).instrument(span).await;
    // Closes the spinner span before anything else is printed.
    drop(service);

    let host = result?;
    info!("Analysis of {} completed in {}", host.domain, format::duration(started.elapsed()));

    report::render(&host, cfg.quiet);
    if cfg.quiet < 2 {
        print::end_of_program();
    }
    Ok(())
}
