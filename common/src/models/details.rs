//! Deep endpoint data returned with `all=done`, plus the small amount of
//! interpretation the report needs (protocol ratings, vulnerability list,
//! certificate issue flags).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::null_as_default;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EndpointDetails {
    pub host_start_time: i64,
    pub key: Option<Key>,
    pub cert: Option<Cert>,
    pub chain: Option<Chain>,
    #[serde(deserialize_with = "null_as_default")]
    pub protocols: Vec<Protocol>,
    pub suites: Option<Suites>,
    pub server_signature: String,
    pub vuln_beast: bool,
    pub reneg_support: i32,
    pub session_resumption: i32,
    pub compression_methods: i32,
    pub supports_npn: bool,
    pub npn_protocols: String,
    pub session_tickets: i32,
    pub ocsp_stapling: bool,
    pub sni_required: bool,
    pub http_status_code: i32,
    pub http_forwarding: String,
    pub supports_rc4: bool,
    pub rc4_with_modern: bool,
    pub rc4_only: bool,
    pub forward_secrecy: i32,
    pub heartbleed: bool,
    pub heartbeat: bool,
    pub open_ssl_ccs: i32,
    pub poodle: bool,
    pub poodle_tls: i32,
    pub fallback_scsv: bool,
    pub freak: bool,
    pub has_sct: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub dh_primes: Vec<String>,
    pub dh_uses_known_primes: i32,
    pub dh_ys_reuse: bool,
    pub logjam: bool,
    pub cha_cha20_preference: bool,
    pub hsts_policy: Option<HstsPolicy>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Key {
    pub size: i32,
    pub strength: i32,
    pub alg: String,
    pub debian_flaw: bool,
    pub q: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Cert {
    pub subject: String,
    #[serde(deserialize_with = "null_as_default")]
    pub common_names: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub alt_names: Vec<String>,
    /// Milliseconds since the Unix epoch.
    pub not_before: i64,
    /// Milliseconds since the Unix epoch.
    pub not_after: i64,
    pub issuer_subject: String,
    pub sig_alg: String,
    pub issuer_label: String,
    pub revocation_info: i32,
    #[serde(rename = "crlURIs", deserialize_with = "null_as_default")]
    pub crl_uris: Vec<String>,
    #[serde(rename = "ocspURIs", deserialize_with = "null_as_default")]
    pub ocsp_uris: Vec<String>,
    pub revocation_status: i32,
    pub sgc: i32,
    pub validation_type: String,
    pub issues: i32,
    pub sct: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Chain {
    #[serde(deserialize_with = "null_as_default")]
    pub certs: Vec<ChainCert>,
    pub issues: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChainCert {
    pub subject: String,
    pub label: String,
    pub not_before: i64,
    pub not_after: i64,
    pub issuer_subject: String,
    pub issuer_label: String,
    pub sig_alg: String,
    pub issues: i32,
    pub key_alg: String,
    pub key_size: i32,
    pub key_strength: i32,
    pub revocation_status: i32,
    pub crl_revocation_status: i32,
    pub ocsp_revocation_status: i32,
    pub raw: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Protocol {
    pub id: i32,
    pub name: String,
    pub version: String,
    pub v2_suites_disabled: bool,
    pub q: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Suites {
    #[serde(deserialize_with = "null_as_default")]
    pub list: Vec<Suite>,
    pub preference: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Suite {
    pub id: i32,
    pub name: String,
    pub cipher_strength: i32,
    pub dh_strength: i32,
    pub dh_p: i32,
    pub dh_g: i32,
    pub dh_ys: i32,
    pub ecdh_bits: i32,
    pub ecdh_strength: i32,
    pub q: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HstsPolicy {
    pub header: String,
    pub status: String,
    pub error: String,
    pub max_age: i64,
    pub include_sub_domains: bool,
    pub preload: bool,
    pub directives: serde_json::Value,
}

impl HstsPolicy {
    pub fn is_present(&self) -> bool {
        self.status == "present"
    }
}

/// `q == 0` is how the service flags an insecure protocol, suite or key.
fn flagged_insecure(q: Option<i32>) -> bool {
    q == Some(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolRating {
    Insecure,
    Obsolete,
    Deprecated,
    Ok,
}

impl Protocol {
    pub fn rating(&self) -> ProtocolRating {
        if flagged_insecure(self.q) {
            return ProtocolRating::Insecure;
        }
        if self.name == "SSL" {
            return ProtocolRating::Obsolete;
        }
        if self.name == "TLS" && matches!(self.version.as_str(), "1.0" | "1.1") {
            return ProtocolRating::Deprecated;
        }
        ProtocolRating::Ok
    }
}

/// Minimum cipher strength, in bits, for a suite to be listed as strong.
pub const STRONG_CIPHER_BITS: i32 = 128;

impl Suite {
    pub fn is_weak(&self) -> bool {
        flagged_insecure(self.q)
    }

    pub fn is_strong(&self) -> bool {
        !self.is_weak() && self.cipher_strength >= STRONG_CIPHER_BITS
    }
}

impl Suites {
    pub fn weak(&self) -> impl Iterator<Item = &Suite> {
        self.list.iter().filter(|suite| suite.is_weak())
    }

    pub fn strong(&self) -> impl Iterator<Item = &Suite> {
        self.list.iter().filter(|suite| suite.is_strong())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vulnerability {
    pub name: &'static str,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardSecrecy {
    None,
    Limited,
    /// Modern clients negotiate forward secrecy.
    Partial,
    /// Every client negotiates forward secrecy.
    Full,
}

impl EndpointDetails {
    /// Known vulnerabilities the endpoint is affected by, in report order.
    pub fn vulnerabilities(&self) -> Vec<Vulnerability> {
        let checks = [
            ("Heartbleed (CVE-2014-0160)", self.heartbleed, Severity::Critical),
            ("POODLE (SSLv3)", self.poodle, Severity::High),
            ("BEAST", self.vuln_beast, Severity::Medium),
            ("FREAK", self.freak, Severity::High),
            ("Logjam", self.logjam, Severity::High),
            ("RC4 supported", self.supports_rc4, Severity::Medium),
            ("OpenSSL CCS (CVE-2014-0224)", self.open_ssl_ccs >= 2, Severity::Critical),
            ("POODLE TLS", self.poodle_tls == 2, Severity::High),
        ];

        checks
            .into_iter()
            .filter(|(_, affected, _)| *affected)
            .map(|(name, _, severity)| Vulnerability { name, severity })
            .collect()
    }

    pub fn forward_secrecy_level(&self) -> ForwardSecrecy {
        match self.forward_secrecy {
            fs if fs >= 4 => ForwardSecrecy::Full,
            fs if fs >= 2 => ForwardSecrecy::Partial,
            fs if fs >= 1 => ForwardSecrecy::Limited,
            _ => ForwardSecrecy::None,
        }
    }
}

/// Bits of [`Cert::issues`], lowest bit first.
pub const CERT_ISSUES: &[(i32, &str)] = &[
    (1, "No chain of trust"),
    (2, "Certificate not yet valid"),
    (4, "Certificate expired"),
    (8, "Hostname mismatch"),
    (16, "Certificate revoked"),
    (32, "Bad common name"),
    (64, "Self-signed certificate"),
    (128, "Blacklisted certificate"),
    (256, "Insecure signature"),
];

/// Days before expiry under which the report warns about the certificate.
pub const EXPIRY_WARNING_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    Expired,
    ExpiresSoon { days: i64 },
    Valid { days: i64 },
}

impl Cert {
    pub fn has_summary(&self) -> bool {
        !(self.subject.is_empty() && self.issuer_label.is_empty() && self.sig_alg.is_empty())
    }

    pub fn issue_descriptions(&self) -> Vec<&'static str> {
        CERT_ISSUES
            .iter()
            .filter(|(bit, _)| self.issues & bit != 0)
            .map(|(_, desc)| *desc)
            .collect()
    }

    pub fn valid_from(&self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.not_before)
    }

    pub fn valid_until(&self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.not_after)
    }

    pub fn expiry(&self, now: DateTime<Utc>) -> Option<Expiry> {
        let not_after = self.valid_until()?;
        let days = (not_after - now).num_days();

        Some(if not_after < now {
            Expiry::Expired
        } else if days < EXPIRY_WARNING_DAYS {
            Expiry::ExpiresSoon { days }
        } else {
            Expiry::Valid { days }
        })
    }
}

/// Converts an API timestamp, where 0 means "not set".
pub fn millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    if millis <= 0 {
        return None;
    }
    DateTime::from_timestamp_millis(millis)
}
