//! SSL Labs API v2 client.
//!
//! Every call is a single `GET`; retrying is left to the caller. Responses
//! are read fully, checked with [`super::status::check`] and only then
//! decoded, so service errors are never reported as decode failures.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tlsgrade_common::config::Config;
use tlsgrade_common::domain::Domain;
use tlsgrade_common::models::host::{Endpoint, Host};
use tlsgrade_common::models::info::ServiceInfo;
use tracing::debug;

use super::status;
use crate::ports::{AssessmentClient, ClientError};

pub const USER_AGENT: &str = concat!("tlsgrade/", env!("CARGO_PKG_VERSION"));

pub struct SslLabsClient {
    http: reqwest::Client,
    base_url: String,
}

impl SslLabsClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self, ClientError> {
        Self::new(cfg.api_url.as_str(), cfg.request_timeout)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        what: &'static str,
    ) -> Result<T, ClientError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, ?query, "requesting {what}");

        let response = self.http.get(&url).query(query).send().await?;
        let status_code = response.status().as_u16();
        let body = response.bytes().await?;

        status::check(status_code, &body)?;
        serde_json::from_slice(&body).map_err(|source| ClientError::Decode { what, source })
    }
}

#[async_trait]
impl AssessmentClient for SslLabsClient {
    async fn service_info(&self) -> Result<ServiceInfo, ClientError> {
        self.get("info", &[], "service info").await
    }

    async fn start_analysis(&self, domain: &Domain) -> Result<Host, ClientError> {
        let query = [("host", domain.as_str()), ("startNew", "on"), ("all", "done")];
        self.get("analyze", &query, "analysis start").await
    }

    async fn check_status(&self, domain: &Domain) -> Result<Host, ClientError> {
        let query = [("host", domain.as_str()), ("all", "done")];
        self.get("analyze", &query, "analysis status").await
    }

    async fn endpoint_details(
        &self,
        domain: &Domain,
        ip_address: &str,
    ) -> Result<Endpoint, ClientError> {
        let query = [("host", domain.as_str()), ("s", ip_address)];
        self.get("getEndpointData", &query, "endpoint details").await
    }
}
