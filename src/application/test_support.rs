// Fakes shared by the application-layer tests
use crate::application::clock::Clock;
use crate::application::poller::SampleSink;
use crate::application::renderer::{Renderer, Severity};
use crate::application::telemetry_source::TelemetrySource;
use crate::domain::poll_error::PollError;
use crate::domain::snapshot::TelemetrySnapshot;
use crate::domain::telemetry_domain::TelemetryDomain;
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub fn gateway_payload(cpu_freq: f64) -> Value {
    json!({
        "gateway": {
            "g_uptime_sec": 3661,
            "g_cpu_freq": cpu_freq,
            "g_ram_used": 150000
        }
    })
}

pub fn sensor_payload(temp: f64) -> Value {
    json!({ "temp": temp, "hum": 60.0, "lux": 650.0 })
}

/// Replays scripted responses; the last one repeats once the script runs out.
pub struct ScriptedSource {
    script: Mutex<VecDeque<Result<Value, PollError>>>,
    last: Mutex<Option<Result<Value, PollError>>>,
    latency: Duration,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn sequence(responses: Vec<Result<Value, PollError>>) -> Self {
        Self {
            script: Mutex::new(responses.into()),
            last: Mutex::new(None),
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn always(response: Result<Value, PollError>) -> Self {
        Self::sequence(vec![response])
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_response(&self) -> Result<Value, PollError> {
        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.script.lock().unwrap().pop_front() {
            *last = Some(next);
        }
        last.clone()
            .unwrap_or_else(|| Err(PollError::Network("no scripted response".to_string())))
    }
}

#[async_trait]
impl TelemetrySource for ScriptedSource {
    async fn fetch(&self) -> Result<Value, PollError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let response = self.next_response();
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        response
    }

    fn endpoint(&self) -> &str {
        "scripted"
    }
}

#[derive(Default)]
pub struct RecordingSink {
    samples: Mutex<Vec<TelemetrySnapshot>>,
    errors: Mutex<Vec<PollError>>,
}

impl RecordingSink {
    pub fn samples(&self) -> Vec<TelemetrySnapshot> {
        self.samples.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<PollError> {
        self.errors.lock().unwrap().clone()
    }
}

impl SampleSink for RecordingSink {
    fn on_sample(&self, snapshot: TelemetrySnapshot) {
        self.samples.lock().unwrap().push(snapshot);
    }

    fn on_error(&self, error: &PollError) {
        self.errors.lock().unwrap().push(error.clone());
    }
}

#[derive(Default)]
pub struct RecordingRenderer {
    renders: Mutex<Vec<(TelemetryDomain, Vec<TelemetrySnapshot>)>>,
    notices: Mutex<Vec<(String, Severity)>>,
}

impl RecordingRenderer {
    pub fn renders(&self) -> Vec<(TelemetryDomain, Vec<TelemetrySnapshot>)> {
        self.renders.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<(String, Severity)> {
        self.notices.lock().unwrap().clone()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, domain: TelemetryDomain, history: &[TelemetrySnapshot]) {
        self.renders.lock().unwrap().push((domain, history.to_vec()));
    }

    fn notify(&self, message: &str, severity: Severity) {
        self.notices.lock().unwrap().push((message.to_string(), severity));
    }
}

/// Clock that stays put unless advanced explicitly
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl Default for FixedClock {
    fn default() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap()),
        }
    }
}

impl FixedClock {
    pub fn advance(&self, seconds: i64) {
        let mut now = self.now.lock().unwrap();
        *now += ChronoDuration::seconds(seconds);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
