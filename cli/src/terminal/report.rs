//! Terminal rendering of finished assessments.

use chrono::Utc;
use colored::*;
use tlsgrade_common::models::details::{Cert, EndpointDetails, Suites, millis_to_datetime};
use tlsgrade_common::models::host::{Endpoint, Host};

use crate::terminal::{colors, format, print};

const MAX_STRONG_SUITES: usize = 5;
const MAX_ALT_NAMES: usize = 5;

pub fn render(host: &Host, q_level: u8) {
    if q_level >= 2 {
        summary(host);
        return;
    }

    print::header("assessment results", q_level);
    print::aligned_lines(vec![
        ("Domain", host.domain.as_str().color(colors::ACCENT).bold()),
        ("Port", host.port.to_string().normal()),
        ("Protocol", host.protocol.as_str().normal()),
        ("Tested at", format::timestamp(millis_to_datetime(host.test_time)).normal()),
        ("Engine", host.engine_version.as_str().normal()),
        ("Criteria", host.criteria_version.as_str().normal()),
    ]);

    if host.endpoints.is_empty() {
        print::print_status("No endpoints were assessed");
        return;
    }

    for (idx, endpoint) in host.endpoints.iter().enumerate() {
        print::print("");
        endpoint_block(idx + 1, endpoint);
    }
}

/// One line per endpoint: `domain ip grade`.
fn summary(host: &Host) {
    for endpoint in &host.endpoints {
        print::print(&format!(
            "{} {} {}",
            host.domain,
            endpoint.ip_address.color(colors::IP_ADDR),
            format::grade(&endpoint.grade)
        ));
    }
}

pub fn endpoint_block(idx: usize, endpoint: &Endpoint) {
    print::tree_head(idx, &endpoint.ip_address);

    let mut lines: Vec<(String, ColoredString)> = Vec::new();
    if !endpoint.server_name.is_empty() {
        lines.push(("Server".to_string(), endpoint.server_name.as_str().normal()));
    }

    if !endpoint.is_ready() {
        lines.push(("Status".to_string(), endpoint.status_message.as_str().color(colors::FAIR)));
        if !endpoint.status_details_message.is_empty() {
            lines.push(("Details".to_string(), endpoint.status_details_message.as_str().normal()));
        }
        print::as_tree_one_level(lines);
        return;
    }

    lines.push(("Grade".to_string(), format::grade(&endpoint.grade)));
    if let Some(ignored) = endpoint.distinct_trust_ignored_grade() {
        lines.push(("Grade (trust ignored)".to_string(), format::grade(ignored)));
    }
    if endpoint.has_warnings {
        lines.push(("Warnings".to_string(), "server has warnings".color(colors::FAIR)));
    }
    if endpoint.is_exceptional {
        lines.push(("Exceptional".to_string(), "exceptional configuration".color(colors::GOOD)));
    }
    if endpoint.duration > 0 {
        lines.push((
            "Duration".to_string(),
            format::duration(std::time::Duration::from_millis(endpoint.duration as u64)).normal(),
        ));
    }
    print::as_tree_one_level(lines);

    if let Some(details) = &endpoint.details {
        details_block(details);
    }
}

fn details_block(details: &EndpointDetails) {
    if !details.protocols.is_empty() {
        print::section("Protocols");
        print::as_tree_one_level(
            details
                .protocols
                .iter()
                .map(|p| (format!("{} {}", p.name, p.version), format::protocol_rating(p.rating())))
                .collect(),
        );
    }

    if let Some(suites) = &details.suites {
        suites_block(suites);
    }

    print::section("Vulnerabilities");
    let vulns = details.vulnerabilities();
    if vulns.is_empty() {
        print::as_list(["none detected".color(colors::GOOD)]);
    } else {
        print::as_list(
            vulns
                .iter()
                .map(|v| format!("{} [{}]", v.name, format::severity(v.severity))),
        );
    }

    print::section("Security features");
    let hsts = details
        .hsts_policy
        .as_ref()
        .is_some_and(|policy| policy.is_present());
    print::as_tree_one_level(vec![
        (
            "Forward secrecy".to_string(),
            format::forward_secrecy(details.forward_secrecy_level()),
        ),
        ("HSTS".to_string(), format::yes_no(hsts)),
        ("OCSP stapling".to_string(), format::yes_no(details.ocsp_stapling)),
        ("Fallback SCSV".to_string(), format::yes_no(details.fallback_scsv)),
    ]);

    if let Some(cert) = details.cert.as_ref().filter(|cert| cert.has_summary()) {
        cert_block(cert);
    }
}

fn suites_block(suites: &Suites) {
    print::section("Cipher suites");
    let weak: Vec<_> = suites.weak().collect();
    let strong: Vec<_> = suites.strong().collect();

    print::as_tree_one_level(vec![
        ("Total".to_string(), suites.list.len().to_string().normal()),
        ("Server preference".to_string(), format::yes_no(suites.preference)),
        (
            "Weak".to_string(),
            if weak.is_empty() {
                "0".color(colors::GOOD)
            } else {
                weak.len().to_string().color(colors::BAD)
            },
        ),
        ("Strong".to_string(), strong.len().to_string().color(colors::GOOD)),
    ]);

    if !weak.is_empty() {
        print::as_list(weak.iter().map(|s| s.name.color(colors::BAD)));
    }
    print::as_list(
        strong
            .iter()
            .take(MAX_STRONG_SUITES)
            .map(|s| format!("{} ({} bits)", s.name, s.cipher_strength)),
    );
    if strong.len() > MAX_STRONG_SUITES {
        print::as_list([format!("... and {} more", strong.len() - MAX_STRONG_SUITES)
            .color(colors::SEPARATOR)]);
    }
}

fn cert_block(cert: &Cert) {
    print::section("Certificate");

    let mut lines = vec![
        ("Subject".to_string(), cert.subject.as_str().normal()),
        ("Issuer".to_string(), cert.issuer_label.as_str().normal()),
        ("Signature".to_string(), cert.sig_alg.as_str().normal()),
        ("Valid from".to_string(), format::date(cert.valid_from()).normal()),
        ("Valid until".to_string(), format::date(cert.valid_until()).normal()),
    ];
    if let Some(expiry) = cert.expiry(Utc::now()) {
        lines.push(("Expiry".to_string(), format::expiry(expiry)));
    }
    print::as_tree_one_level(lines);

    if !cert.alt_names.is_empty() {
        print::section("Alternative names");
        print::as_list(cert.alt_names.iter().take(MAX_ALT_NAMES));
        if cert.alt_names.len() > MAX_ALT_NAMES {
            print::as_list([format!("... and {} more", cert.alt_names.len() - MAX_ALT_NAMES)
                .color(colors::SEPARATOR)]);
        }
    }

    let issues = cert.issue_descriptions();
    if !issues.is_empty() {
        print::section("Certificate issues");
        print::as_list(issues.into_iter().map(|issue| issue.color(colors::BAD)));
    }
}
