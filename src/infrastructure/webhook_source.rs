// Webhook telemetry source - plain GET against an n8n webhook
use crate::application::telemetry_source::TelemetrySource;
use crate::domain::poll_error::PollError;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct WebhookSource {
    url: String,
    client: reqwest::Client,
}

impl WebhookSource {
    pub fn new(url: String, client: reqwest::Client) -> Self {
        Self { url, client }
    }

    /// Shared client for all webhook sources; `timeout` bounds each request
    pub fn client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build webhook HTTP client")
    }
}

#[async_trait]
impl TelemetrySource for WebhookSource {
    async fn fetch(&self) -> Result<Value, PollError> {
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| PollError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PollError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PollError::Network(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| PollError::Parse(e.to_string()))
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::{routing::get, Router};
    use serde_json::json;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn source(base: &str, path: &str) -> WebhookSource {
        let client = WebhookSource::client(Duration::from_secs(2)).unwrap();
        WebhookSource::new(format!("{}{}", base, path), client)
    }

    async fn upstream() -> String {
        let router = Router::new()
            .route(
                "/webhook/gps",
                get(|| async { axum::Json(json!({ "latitude": -8.178842, "longitude": 113.72617 })) }),
            )
            .route("/webhook/broken", get(|| async { "<html>maintenance</html>" }))
            .route(
                "/webhook/down",
                get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "busy") }),
            );
        serve(router).await
    }

    #[tokio::test]
    async fn test_fetch_parses_json_body() {
        let base = upstream().await;
        let payload = source(&base, "/webhook/gps").fetch().await.unwrap();
        assert_eq!(payload["latitude"], json!(-8.178842));
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_json_body() {
        let base = upstream().await;
        let err = source(&base, "/webhook/broken").fetch().await.unwrap_err();
        assert!(matches!(err, PollError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_reports_http_status() {
        let base = upstream().await;
        let err = source(&base, "/webhook/down").fetch().await.unwrap_err();
        assert_eq!(err, PollError::Status(503));

        let err = source(&base, "/webhook/missing").fetch().await.unwrap_err();
        assert_eq!(err, PollError::Status(404));
    }

    #[tokio::test]
    async fn test_fetch_reports_unreachable_endpoint() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = source(&format!("http://{}", addr), "/webhook/gateway")
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, PollError::Network(_)));
    }
}
