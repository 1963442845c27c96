// Poll failure kinds, caught at the poller boundary
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PollError {
    /// Endpoint unreachable or the request timed out
    #[error("request failed: {0}")]
    Network(String),

    #[error("upstream responded with status {0}")]
    Status(u16),

    #[error("response body is not valid JSON: {0}")]
    Parse(String),

    #[error("payload is missing required field `{0}`")]
    MissingField(String),

    #[error("field `{field}` has an invalid value: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("payload contains no readings")]
    EmptyPayload,
}

impl PollError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
