// Telemetry poller - periodic fetch/parse cycle for one domain
use crate::application::clock::Clock;
use crate::application::telemetry_source::TelemetrySource;
use crate::domain::poll_error::PollError;
use crate::domain::snapshot::TelemetrySnapshot;
use crate::domain::telemetry_domain::TelemetryDomain;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Receives the outcome of every poll cycle
pub trait SampleSink: Send + Sync {
    fn on_sample(&self, snapshot: TelemetrySnapshot);

    fn on_error(&self, error: &PollError);
}

#[derive(Clone)]
struct PollCycle {
    domain: TelemetryDomain,
    source: Arc<dyn TelemetrySource>,
    sink: Arc<dyn SampleSink>,
    clock: Arc<dyn Clock>,
}

impl PollCycle {
    async fn run(&self) -> Result<TelemetrySnapshot, PollError> {
        let outcome = match self.source.fetch().await {
            Ok(payload) => TelemetrySnapshot::from_payload(self.domain, &payload, self.clock.now()),
            Err(e) => Err(e),
        };

        match &outcome {
            Ok(snapshot) => {
                tracing::debug!(
                    domain = %self.domain,
                    fields = snapshot.fields().len(),
                    "Received telemetry sample"
                );
                self.sink.on_sample(snapshot.clone());
            }
            Err(error) => {
                tracing::warn!(
                    domain = %self.domain,
                    endpoint = self.source.endpoint(),
                    "Telemetry poll failed: {}",
                    error
                );
                self.sink.on_error(error);
            }
        }

        outcome
    }
}

pub struct Poller {
    cycle: PollCycle,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl Poller {
    pub fn new(
        domain: TelemetryDomain,
        source: Arc<dyn TelemetrySource>,
        sink: Arc<dyn SampleSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cycle: PollCycle {
                domain,
                source,
                sink,
                clock,
            },
            ticker: Mutex::new(None),
        }
    }

    /// Poll now and then every `interval` until stopped. Restarts if already running.
    ///
    /// Each tick spawns its own poll, so a slow upstream never delays the next tick and
    /// several requests may be in flight at once.
    pub fn start(&self, interval: Duration) {
        let interval = interval.max(MIN_INTERVAL);
        let cycle = self.cycle.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let cycle = cycle.clone();
                tokio::spawn(async move {
                    let _ = cycle.run().await;
                });
            }
        });

        if let Some(previous) = self.lock_ticker().replace(handle) {
            previous.abort();
        }
        tracing::info!(
            domain = %self.cycle.domain,
            interval_ms = interval.as_millis() as u64,
            "Started telemetry poller"
        );
    }

    /// Cancel the timer. Requests already in flight still complete.
    pub fn stop(&self) {
        if let Some(handle) = self.lock_ticker().take() {
            handle.abort();
            tracing::info!(domain = %self.cycle.domain, "Stopped telemetry poller");
        }
    }

    pub fn is_running(&self) -> bool {
        self.lock_ticker()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub async fn poll_once(&self) -> Result<TelemetrySnapshot, PollError> {
        self.cycle.run().await
    }

    fn lock_ticker(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.ticker.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}
