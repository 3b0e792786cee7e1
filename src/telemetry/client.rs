//! Occupancy API client.
//!
//! Thin HTTP wrapper around the sensors summary endpoint. The token travels as
//! a query parameter, so request errors are stripped of their URL before they
//! reach the logs.

use std::time::Duration;

use super::SurveySource;
use super::types::{BuildingSurvey, STATUS_BODY_LIMIT, SyncError, parse_surveys};
use crate::config::ApiConfig;

// =============================================================================
// CLIENT
// =============================================================================

pub struct TelemetryClient {
    http: reqwest::Client,
    base_url: String,
    survey_filter: String,
    token: String,
}

impl TelemetryClient {
    /// Build a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| SyncError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            survey_filter: config.survey_filter.clone(),
            token: config.token.clone(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET the summary and decode its surveys.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Network`] when the request cannot complete,
    /// [`SyncError::Status`] for non-2xx answers and [`SyncError::Parse`] for
    /// malformed bodies.
    pub async fn fetch(&self) -> Result<Vec<BuildingSurvey>, SyncError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("survey_filter", self.survey_filter.as_str()), ("token", self.token.as_str())])
            .send()
            .await
            .map_err(|e| SyncError::Network(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| SyncError::Network(e.without_url().to_string()))?;

        if !(200..300).contains(&status) {
            let body = text.trim().chars().take(STATUS_BODY_LIMIT).collect();
            return Err(SyncError::Status { status, body });
        }

        parse_surveys(&text)
    }
}

#[async_trait::async_trait]
impl SurveySource for TelemetryClient {
    async fn fetch_surveys(&self) -> Result<Vec<BuildingSurvey>, SyncError> {
        self.fetch().await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
