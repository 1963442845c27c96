// Per-domain poll bookkeeping used by the overview and the GPS fix status
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PollStats {
    pub samples_received: u64,
    pub failures: u64,
    pub last_success_at: Option<DateTime<Utc>>,
    pub last_failure_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    /// Outcome of the most recent completed poll
    pub last_poll_ok: Option<bool>,
}

impl PollStats {
    pub fn record_success(&mut self, at: DateTime<Utc>) {
        self.samples_received += 1;
        self.last_success_at = Some(at);
        self.last_poll_ok = Some(true);
    }

    pub fn record_failure(&mut self, at: DateTime<Utc>, error: String) {
        self.failures += 1;
        self.last_failure_at = Some(at);
        self.last_error = Some(error);
        self.last_poll_ok = Some(false);
    }

    pub fn is_connected(&self) -> bool {
        self.last_poll_ok == Some(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_follows_last_outcome() {
        let mut stats = PollStats::default();
        assert!(!stats.is_connected());

        stats.record_success(Utc::now());
        assert!(stats.is_connected());

        stats.record_failure(Utc::now(), "timeout".to_string());
        assert!(!stats.is_connected());
        assert_eq!(stats.samples_received, 1);
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.last_error.as_deref(), Some("timeout"));
    }
}
