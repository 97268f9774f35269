//! HTTP client for the diversion server.

use anyhow::{bail, Context, Result};
use divert_core::{AirportCandidate, FlightState, RankingResult};
use reqwest::blocking::Client;
use serde::Serialize;
use std::time::Duration;

/// Body of `POST /v1/diversions/rank`.
#[derive(Debug, Serialize)]
pub struct RankRequest<'a> {
    pub flight_state: &'a FlightState,
    pub failure_kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<&'a [AirportCandidate]>,
}

/// Blocking client for a diversion server.
pub struct DivertClient {
    client: Client,
    base_url: String,
}

impl DivertClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the server (e.g., "http://localhost:3000")
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Ask the server to rank alternates.
    ///
    /// When `candidates` is `None` the server ranks its own airport database.
    pub fn rank(
        &self,
        flight_state: &FlightState,
        failure_kind: &str,
        candidates: Option<&[AirportCandidate]>,
    ) -> Result<RankingResult> {
        let url = format!("{}/v1/diversions/rank", self.base_url);
        let request = RankRequest {
            flight_state,
            failure_kind,
            candidates,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .with_context(|| format!("Failed to reach {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            bail!("Server returned {}: {}", status, body);
        }

        response
            .json::<RankingResult>()
            .context("Failed to decode ranking result")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn request_omits_candidates_when_absent() {
        let flight = fixtures::demo_flight();
        let body = serde_json::to_value(RankRequest {
            flight_state: &flight,
            failure_kind: "engine_failure",
            candidates: None,
        })
        .unwrap();
        assert!(body.get("candidates").is_none());
        assert_eq!(body["failure_kind"], "engine_failure");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = DivertClient::new("http://localhost:3000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
