// Dashboard controller - owns one domain's poller, sample buffer and renderer
use crate::application::clock::Clock;
use crate::application::poller::{Poller, SampleSink};
use crate::application::renderer::{Renderer, Severity};
use crate::application::telemetry_source::TelemetrySource;
use crate::domain::format::Locale;
use crate::domain::poll_error::PollError;
use crate::domain::poll_stats::PollStats;
use crate::domain::sample_buffer::SampleBuffer;
use crate::domain::snapshot::TelemetrySnapshot;
use crate::domain::telemetry_domain::TelemetryDomain;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct ControllerSettings {
    pub domain: TelemetryDomain,
    pub interval: Duration,
    pub capacity: usize,
    pub locale: Locale,
}

impl ControllerSettings {
    pub fn defaults_for(domain: TelemetryDomain, locale: Locale) -> Self {
        Self {
            domain,
            interval: domain.default_interval(),
            capacity: domain.default_capacity(),
            locale,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct ControllerSink {
    domain: TelemetryDomain,
    locale: Locale,
    buffer: Arc<Mutex<SampleBuffer>>,
    stats: Arc<Mutex<PollStats>>,
    renderer: Arc<dyn Renderer>,
    clock: Arc<dyn Clock>,
}

impl SampleSink for ControllerSink {
    fn on_sample(&self, snapshot: TelemetrySnapshot) {
        lock(&self.stats).record_success(snapshot.captured_at);

        // Render under the buffer guard so overlapping polls render in push order.
        let mut buffer = lock(&self.buffer);
        buffer.push(snapshot);
        self.renderer.render(self.domain, &buffer.snapshot());
    }

    fn on_error(&self, error: &PollError) {
        lock(&self.stats).record_failure(self.clock.now(), error.to_string());
        let message = format!("{}: {}", self.domain.load_error_message(self.locale), error);
        self.renderer.notify(&message, Severity::Error);
    }
}

pub struct DashboardController {
    settings: ControllerSettings,
    buffer: Arc<Mutex<SampleBuffer>>,
    stats: Arc<Mutex<PollStats>>,
    renderer: Arc<dyn Renderer>,
    poller: Poller,
}

impl DashboardController {
    pub fn new(
        settings: ControllerSettings,
        source: Arc<dyn TelemetrySource>,
        renderer: Arc<dyn Renderer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let buffer = Arc::new(Mutex::new(SampleBuffer::new(settings.capacity)));
        let stats = Arc::new(Mutex::new(PollStats::default()));

        let sink = Arc::new(ControllerSink {
            domain: settings.domain,
            locale: settings.locale,
            buffer: buffer.clone(),
            stats: stats.clone(),
            renderer: renderer.clone(),
            clock: clock.clone(),
        });
        let poller = Poller::new(settings.domain, source, sink, clock);

        Self {
            settings,
            buffer,
            stats,
            renderer,
            poller,
        }
    }

    pub fn domain(&self) -> TelemetryDomain {
        self.settings.domain
    }

    pub fn interval(&self) -> Duration {
        self.settings.interval
    }

    pub fn capacity(&self) -> usize {
        lock(&self.buffer).capacity()
    }

    pub fn start(&self) {
        self.poller.start(self.settings.interval);
    }

    pub fn stop(&self) {
        self.poller.stop();
    }

    pub fn is_running(&self) -> bool {
        self.poller.is_running()
    }

    /// Manual refresh; goes through the same sink as scheduled polls.
    pub async fn poll_once(&self) -> Result<TelemetrySnapshot, PollError> {
        self.poller.poll_once().await
    }

    #[cfg(test)]
    pub fn history(&self) -> Vec<TelemetrySnapshot> {
        lock(&self.buffer).snapshot()
    }

    pub fn sample_count(&self) -> usize {
        lock(&self.buffer).len()
    }

    pub fn stats(&self) -> PollStats {
        lock(&self.stats).clone()
    }

    /// Drop the buffered history and re-render the empty window. Returns the number of
    /// samples dropped.
    pub fn clear(&self) -> usize {
        let mut buffer = lock(&self.buffer);
        let dropped = buffer.len();
        buffer.clear();
        self.renderer.render(self.settings.domain, &[]);
        tracing::info!(domain = %self.settings.domain, dropped, "Cleared sample history");
        dropped
    }
}
