use tlsgrade_common::config::Config;
use tlsgrade_core::progress::LogReporter;

use crate::commands::build_service;
use crate::terminal::{print, report};

pub async fn endpoint(domain: &str, ip: &str, cfg: &Config) -> anyhow::Result<()> {
    let service = build_service(cfg, Box::new(LogReporter))?;
    let endpoint = service.endpoint_details(domain, ip).await?;

    print::header(&format!("endpoint {ip}"), cfg.quiet);
    report::endpoint_block(1, &endpoint);
    Ok(())
}
