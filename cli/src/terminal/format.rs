use crate::terminal::colors;
use chrono::{DateTime, Utc};
use colored::*;
use std::time::Duration;
use tlsgrade_common::models::details::{Expiry, ForwardSecrecy, ProtocolRating, Severity};
use tlsgrade_common::models::host::GradeClass;

pub fn grade(grade: &str) -> ColoredString {
    if grade.is_empty() {
        return "N/A".color(colors::SEPARATOR);
    }
    let color = match GradeClass::of(grade) {
        GradeClass::Good => colors::GOOD,
        GradeClass::Fair => colors::FAIR,
        GradeClass::Poor => colors::BAD,
    };
    grade.color(color).bold()
}

pub fn protocol_rating_label(rating: ProtocolRating) -> &'static str {
    match rating {
        ProtocolRating::Insecure => "insecure",
        ProtocolRating::Obsolete => "obsolete",
        ProtocolRating::Deprecated => "deprecated",
        ProtocolRating::Ok => "ok",
    }
}

pub fn protocol_rating(rating: ProtocolRating) -> ColoredString {
    let label = protocol_rating_label(rating);
    match rating {
        ProtocolRating::Insecure | ProtocolRating::Obsolete => label.color(colors::BAD),
        ProtocolRating::Deprecated => label.color(colors::FAIR),
        ProtocolRating::Ok => label.color(colors::GOOD),
    }
}

pub fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Medium => "MEDIUM",
        Severity::High => "HIGH",
        Severity::Critical => "CRITICAL",
    }
}

pub fn severity(severity: Severity) -> ColoredString {
    let label = severity_label(severity);
    match severity {
        Severity::Medium => label.color(colors::FAIR),
        Severity::High => label.color(colors::BAD),
        Severity::Critical => label.color(colors::BAD).bold(),
    }
}

pub fn forward_secrecy_label(level: ForwardSecrecy) -> &'static str {
    match level {
        ForwardSecrecy::Full => "yes (all clients)",
        ForwardSecrecy::Partial => "yes (modern clients)",
        ForwardSecrecy::Limited => "limited",
        ForwardSecrecy::None => "no",
    }
}

pub fn forward_secrecy(level: ForwardSecrecy) -> ColoredString {
    let label = forward_secrecy_label(level);
    match level {
        ForwardSecrecy::Full | ForwardSecrecy::Partial => label.color(colors::GOOD),
        ForwardSecrecy::Limited => label.color(colors::FAIR),
        ForwardSecrecy::None => label.color(colors::BAD),
    }
}

pub fn yes_no(value: bool) -> ColoredString {
    if value {
        "yes".color(colors::GOOD)
    } else {
        "no".color(colors::BAD)
    }
}

pub fn expiry_label(expiry: Expiry) -> String {
    match expiry {
        Expiry::Expired => "EXPIRED".to_string(),
        Expiry::ExpiresSoon { days } => format!("expires in {days} days"),
        Expiry::Valid { days } => format!("{days} days left"),
    }
}

pub fn expiry(expiry: Expiry) -> ColoredString {
    let label = expiry_label(expiry);
    match expiry {
        Expiry::Expired => label.color(colors::BAD).bold(),
        Expiry::ExpiresSoon { .. } => label.color(colors::FAIR),
        Expiry::Valid { .. } => label.color(colors::GOOD),
    }
}

pub fn timestamp(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(at) => at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => "unknown".to_string(),
    }
}

pub fn date(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(at) => at.format("%Y-%m-%d").to_string(),
        None => "unknown".to_string(),
    }
}

/// Renders a duration as `1m 05s`, or `850ms` below a second.
pub fn duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs == 0 {
        return format!("{}ms", d.as_millis());
    }
    let (mins, secs) = (secs / 60, secs % 60);
    if mins == 0 {
        format!("{secs}s")
    } else {
        format!("{mins}m {secs:02}s")
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
