//! HTTP client implementation for the Garmin Connect API.
//!
//! This module provides a reqwest-based implementation of the [`ConnectClient`](crate::ConnectClient) trait.

use crate::config::Config;
use crate::{
    Activity, ActivityId, ActivityWeather, ConnectClient, ConnectError, ExportFormat, ExportSink,
};
use async_trait::async_trait;
use futures_util::StreamExt;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// Client for the Garmin Connect API using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestConnectClient {
    base_url: String,
    session: SecretString,
    client: reqwest::Client,
}

impl ReqwestConnectClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - The API proxy root (e.g., "https://connect.garmin.com/modern/proxy")
    /// * `session` - The `SESSIONID` cookie of an authenticated session
    pub fn new(base_url: &str, session: SecretString) -> Result<Self, ConnectError> {
        Self::with_timeout(base_url, session, Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        base_url: &str,
        session: SecretString,
        timeout: Duration,
    ) -> Result<Self, ConnectError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("garmin-connect-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            client,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self, ConnectError> {
        Self::with_timeout(&cfg.base_url, cfg.session.clone(), cfg.timeout)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL of `path` followed by `segment` as one percent-encoded path segment.
    fn url_with_segment(&self, path: &str, segment: &str) -> Result<reqwest::Url, ConnectError> {
        let mut url = reqwest::Url::parse(&self.url(path))
            .map_err(|e| ConnectError::Config(format!("invalid base url {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ConnectError::Config(format!("base url cannot have a path: {}", self.base_url)))?
            .push(segment);
        Ok(url)
    }

    /// Attach session cookie and the `NK` header the proxy insists on.
    fn authed(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        tracing::debug!(%method, url, "garmin connect request");
        self.client
            .request(method, url)
            .header(
                reqwest::header::COOKIE,
                format!("SESSIONID={}", self.session.expose_secret()),
            )
            .header("NK", "NT")
    }

    fn get_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.authed(reqwest::Method::GET, url)
    }

    fn put_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.authed(reqwest::Method::PUT, url)
    }

    fn delete_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.authed(reqwest::Method::DELETE, url)
    }

    /// Execute a request and expect a JSON response.
    async fn execute_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ConnectError> {
        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(self.error_from_response(resp).await);
        }
        // Read body as text first so a shape mismatch can report what was returned.
        let text = resp.text().await?;
        serde_json::from_str::<T>(&text).map_err(|e| {
            let body_snippet: String = text.chars().take(512).collect();
            ConnectError::Decode(format!("{} - body: {}", e, body_snippet))
        })
    }

    /// Execute a request with no expected response body.
    async fn execute_empty(&self, request: reqwest::RequestBuilder) -> Result<(), ConnectError> {
        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(self.error_from_response(resp).await);
        }
        Ok(())
    }

    /// Extract error information from a failed response.
    async fn error_from_response(&self, resp: reqwest::Response) -> ConnectError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        tracing::debug!(status, "garmin connect request failed");
        ConnectError::from_status(status, body)
    }

    /// Path of the download endpoint for an export format.
    pub fn export_path(id: ActivityId, format: ExportFormat) -> String {
        match format {
            ExportFormat::Fit => format!("/download-service/files/activity/{}", id),
            other => format!(
                "/download-service/export/{}/activity/{}",
                other.extension(),
                id
            ),
        }
    }
}

#[async_trait]
impl ConnectClient for ReqwestConnectClient {
    async fn activities(
        &self,
        display_name: Option<&str>,
        start: u32,
        limit: u32,
    ) -> Result<Vec<Activity>, ConnectError> {
        let url = match display_name {
            Some(name) => self
                .url_with_segment("/activitylist-service/activities", name)?
                .to_string(),
            None => self.url("/activitylist-service/activities/search/activities"),
        };
        let qp = [("start", start.to_string()), ("limit", limit.to_string())];
        self.execute_json(self.get_request(&url).query(&qp)).await
    }

    async fn activity(&self, id: ActivityId) -> Result<Activity, ConnectError> {
        let url = self.url(&format!("/activity-service/activity/{}", id));
        self.execute_json(self.get_request(&url)).await
    }

    async fn activity_weather(&self, id: ActivityId) -> Result<ActivityWeather, ConnectError> {
        let url = self.url(&format!("/weather-service/weather/{}", id));
        self.execute_json(self.get_request(&url)).await
    }

    async fn export_activity(
        &self,
        id: ActivityId,
        format: ExportFormat,
        sink: &mut ExportSink<'_>,
    ) -> Result<u64, ConnectError> {
        let url = self.url(&Self::export_path(id, format));
        let resp = self.get_request(&url).send().await?;
        if !resp.status().is_success() {
            return Err(self.error_from_response(resp).await);
        }

        let mut stream = resp.bytes_stream();
        let mut written: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let bytes = chunk?;
            sink.write_all(&bytes).await?;
            written = written.saturating_add(bytes.len() as u64);
        }
        sink.flush().await?;
        tracing::debug!(%id, %format, written, "export streamed");
        Ok(written)
    }

    async fn delete_activity(&self, id: ActivityId) -> Result<(), ConnectError> {
        let url = self.url(&format!("/activity-service/activity/{}", id));
        self.execute_empty(self.delete_request(&url)).await
    }

    async fn rename_activity(&self, id: ActivityId, new_name: &str) -> Result<(), ConnectError> {
        let url = self.url(&format!("/activity-service/activity/{}", id));
        let body = serde_json::json!({
            "activityId": id,
            "activityName": new_name,
        });
        self.execute_empty(self.put_request(&url).json(&body)).await
    }
}
