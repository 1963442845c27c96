// View store - the renderer behind the HTTP dashboards
use crate::application::clock::Clock;
use crate::application::renderer::{Renderer, Severity};
use crate::domain::snapshot::TelemetrySnapshot;
use crate::domain::telemetry_domain::TelemetryDomain;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const MAX_NOTICES: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
    pub raised_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Default)]
struct ViewState {
    history: Vec<TelemetrySnapshot>,
    notices: VecDeque<Notice>,
}

/// Holds what was last rendered for one domain plus its transient notices
pub struct ViewStore {
    domain: TelemetryDomain,
    clock: Arc<dyn Clock>,
    state: Mutex<ViewState>,
}

impl ViewStore {
    pub fn new(domain: TelemetryDomain, clock: Arc<dyn Clock>) -> Self {
        Self {
            domain,
            clock,
            state: Mutex::new(ViewState::default()),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn rendered_history(&self) -> Vec<TelemetrySnapshot> {
        self.lock_state().history.clone()
    }

    /// Notices that have not yet expired; expired ones are dropped
    pub fn active_notices(&self) -> Vec<Notice> {
        let now = self.clock.now();
        let mut state = self.lock_state();
        state.notices.retain(|n| n.expires_at > now);
        state.notices.iter().cloned().collect()
    }
}

impl Renderer for ViewStore {
    fn render(&self, domain: TelemetryDomain, history: &[TelemetrySnapshot]) {
        if domain != self.domain {
            tracing::warn!(expected = %self.domain, got = %domain, "Ignoring render for foreign domain");
            return;
        }
        let mut state = self.lock_state();
        state.history = history.to_vec();
    }

    fn notify(&self, message: &str, severity: Severity) {
        let raised_at = self.clock.now();
        let ttl = ChronoDuration::from_std(severity.display_duration())
            .unwrap_or_else(|_| ChronoDuration::seconds(5));

        let mut state = self.lock_state();
        state.notices.push_back(Notice {
            message: message.to_string(),
            severity,
            raised_at,
            expires_at: raised_at + ttl,
        });
        while state.notices.len() > MAX_NOTICES {
            state.notices.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::FixedClock;
    use std::collections::BTreeMap;

    fn store(clock: Arc<FixedClock>) -> ViewStore {
        ViewStore::new(TelemetryDomain::Gateway, clock)
    }

    #[test]
    fn test_render_replaces_history() {
        let clock = Arc::new(FixedClock::default());
        let store = store(clock.clone());
        let sample = TelemetrySnapshot::new(TelemetryDomain::Gateway, clock.now(), BTreeMap::new());

        store.render(TelemetryDomain::Gateway, &[sample.clone(), sample.clone()]);
        store.render(TelemetryDomain::Gateway, &[sample.clone()]);
        assert_eq!(store.rendered_history(), vec![sample.clone()]);

        store.render(TelemetryDomain::Sensors, &[]);
        assert_eq!(store.rendered_history(), vec![sample]);

        store.render(TelemetryDomain::Gateway, &[]);
        assert!(store.rendered_history().is_empty());
    }

    #[test]
    fn test_notices_auto_dismiss() {
        let clock = Arc::new(FixedClock::default());
        let store = store(clock.clone());

        store.notify("Failed to load gateway data", Severity::Error);
        store.notify("Refreshing", Severity::Info);
        assert_eq!(store.active_notices().len(), 2);

        clock.advance(4);
        let active = store.active_notices();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].severity, Severity::Error);

        clock.advance(1);
        assert!(store.active_notices().is_empty());
    }

    #[test]
    fn test_notice_backlog_is_bounded() {
        let store = store(Arc::new(FixedClock::default()));
        for i in 0..30 {
            store.notify(&format!("notice {}", i), Severity::Warning);
        }
        let active = store.active_notices();
        assert_eq!(active.len(), MAX_NOTICES);
        assert_eq!(active[0].message, "notice 10");
    }
}
