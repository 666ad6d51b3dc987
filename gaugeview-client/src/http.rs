//! HTTP metric client.
//!
//! Wraps a [`reqwest::Client`] around the two endpoints every node
//! exposes per metric scope: `/{scope}/list` and `/{scope}/get`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use gaugeview_types::{DurationSpec, MetricDescriptor, RawMetricPayload};

use crate::ClientError;

/// URL of a node's metric listing endpoint.
pub fn list_url(address: &str, scope: &str) -> String {
    format!("{}/{}/list", address, scope)
}

/// URL of a node's payload endpoint for one metric and duration.
///
/// A metric with no sampling windows is requested with the zero/zero
/// sentinel duration.
pub fn payload_url(address: &str, scope: &str, name: &str, duration: DurationSpec) -> String {
    format!(
        "{}/{}/get?name={}&duration.unit={}&duration.count={}",
        address,
        scope,
        urlencoded(name),
        duration.unit,
        duration.count
    )
}

/// Percent-encode a query value.
fn urlencoded(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Fetch abstraction over a node's metric endpoints.
///
/// The selection pipeline talks to this trait rather than to
/// [`MetricClient`] directly so tests can substitute a canned fetcher.
#[async_trait]
pub trait MetricFetch: Send + Sync {
    /// List the metrics a node exposes under a scope.
    async fn list_metrics(
        &self,
        address: &str,
        scope: &str,
    ) -> Result<Vec<MetricDescriptor>, ClientError>;

    /// Fetch one raw metric payload.
    async fn fetch_payload(
        &self,
        address: &str,
        scope: &str,
        name: &str,
        duration: DurationSpec,
    ) -> Result<RawMetricPayload, ClientError>;
}

/// HTTP client for node metric endpoints.
#[derive(Debug, Clone, Default)]
pub struct MetricClient {
    client: Client,
}

impl MetricClient {
    /// Create a client with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a client around a preconfigured [`reqwest::Client`]
    /// (timeouts, proxies, etc.).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn get_json<T>(&self, url: &str) -> Result<T, ClientError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::Transport(format!(
                "API returned status {}",
                response.status()
            )));
        }

        let reply: ApiReply<T> = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;

        match reply {
            ApiReply::Err(body) => Err(ClientError::Api {
                url: url.to_string(),
                message: body.error,
            }),
            ApiReply::Ok(value) => Ok(value),
        }
    }
}

#[async_trait]
impl MetricFetch for MetricClient {
    async fn list_metrics(
        &self,
        address: &str,
        scope: &str,
    ) -> Result<Vec<MetricDescriptor>, ClientError> {
        let url = list_url(address, scope);
        let body: ListBody = self.get_json(&url).await?;
        Ok(body.metrics)
    }

    async fn fetch_payload(
        &self,
        address: &str,
        scope: &str,
        name: &str,
        duration: DurationSpec,
    ) -> Result<RawMetricPayload, ClientError> {
        let url = payload_url(address, scope, name, duration);
        self.get_json(&url).await
    }
}

/// Either the expected body or a node-side `{"error": ...}` refusal.
///
/// `Err` is tried first: a body carrying an `error` field is a refusal
/// even if the rest of the payload fields would parse.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiReply<T> {
    Err(ErrorBody),
    Ok(T),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct ListBody {
    metrics: Vec<MetricDescriptor>,
}
