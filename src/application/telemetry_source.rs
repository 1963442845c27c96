// Source trait for raw telemetry payloads
use crate::domain::poll_error::PollError;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Fetch one payload from the upstream endpoint
    async fn fetch(&self) -> Result<Value, PollError>;

    /// Endpoint description used in log lines
    fn endpoint(&self) -> &str;
}
