use colored::*;
use indicatif::ProgressStyle;
use tlsgrade_core::ports::{EndpointProgress, ProgressReporter};
use tracing::{Span, debug, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg} {elapsed:.dim}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ])
}

/// Span that owns the progress spinner of one analysis. The spinner is
/// cleared when the last clone of the span is dropped.
pub fn analysis_span(domain: &str) -> Span {
    let span = info_span!("analysis", indicatif.pb_show = true);
    span.pb_set_style(&spinner_style());
    span.pb_set_message(&format!("Waiting for the assessment of {}...", domain.bold()));
    span
}

/// Shows the latest endpoint progress as the spinner message.
pub struct SpinnerReporter {
    span: Span,
}

impl SpinnerReporter {
    pub fn new(span: Span) -> Self {
        Self { span }
    }
}

pub fn progress_message(progress: &EndpointProgress) -> String {
    format!(
        "[{}] Progress: {}% - {}",
        progress.ip_address.cyan(),
        progress.progress.to_string().green().bold(),
        progress.status_details
    )
}

impl ProgressReporter for SpinnerReporter {
    fn report(&self, progress: &EndpointProgress) {
        debug!(
            ip = %progress.ip_address,
            progress = progress.progress,
            details = %progress.status_details,
            "endpoint progress"
        );
        self.span.pb_set_message(&progress_message(progress));
    }
}
