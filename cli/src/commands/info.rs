use colored::*;
use tlsgrade_common::config::Config;
use tlsgrade_common::models::info::ServiceInfo;
use tlsgrade_core::progress::LogReporter;

use crate::commands::build_service;
use crate::terminal::{colors, print};

pub async fn info(cfg: &Config) -> anyhow::Result<()> {
    let info = build_service(cfg, Box::new(LogReporter))?.service_info().await?;
    render(&info, cfg.quiet);
    Ok(())
}

fn render(info: &ServiceInfo, q_level: u8) {
    let capacity = info.capacity();
    let assessments = format!("{}/{}", capacity.current_assessments, capacity.max_assessments);
    let assessments = if capacity.is_saturated() {
        assessments.color(colors::BAD)
    } else {
        assessments.color(colors::GOOD)
    };

    print::header("ssl labs service", q_level);
    print::aligned_lines(vec![
        ("Engine version", info.version.as_str().normal()),
        ("Criteria version", info.criteria_version.as_str().normal()),
        ("Assessments", assessments),
        ("Cool-off", format!("{} ms", info.new_assessment_cool_off).normal()),
    ]);

    if !info.messages.is_empty() {
        print::section("Service messages");
        print::as_list(&info.messages);
    }
}
