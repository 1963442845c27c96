// Overview service - Use case for summarising every domain controller
use crate::application::controller::DashboardController;
use crate::domain::format::{format_time_label, Locale};
use crate::domain::poll_stats::PollStats;
use crate::domain::telemetry_domain::TelemetryDomain;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Refresh cadence advertised to overview clients
pub const OVERVIEW_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Serialize)]
pub struct DomainStatus {
    pub domain: TelemetryDomain,
    pub title: String,
    pub running: bool,
    pub interval_ms: u64,
    pub capacity: usize,
    pub samples_buffered: usize,
    pub stats: PollStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub last_data_at: Option<DateTime<Utc>>,
    pub last_data_time: Option<String>,
    pub active_connections: String,
    pub connected: usize,
    pub total: usize,
    pub samples_processed: u64,
    pub refresh_interval_ms: u64,
    pub domains: Vec<DomainStatus>,
}

#[derive(Clone)]
pub struct OverviewService {
    controllers: Vec<Arc<DashboardController>>,
    locale: Locale,
}

impl OverviewService {
    pub fn new(controllers: Vec<Arc<DashboardController>>, locale: Locale) -> Self {
        Self {
            controllers,
            locale,
        }
    }

    pub fn domain_statuses(&self) -> Vec<DomainStatus> {
        self.controllers
            .iter()
            .map(|c| DomainStatus {
                domain: c.domain(),
                title: c.domain().title().to_string(),
                running: c.is_running(),
                interval_ms: c.interval().as_millis() as u64,
                capacity: c.capacity(),
                samples_buffered: c.sample_count(),
                stats: c.stats(),
            })
            .collect()
    }

    pub fn overview(&self) -> Overview {
        let domains = self.domain_statuses();
        let connected = domains.iter().filter(|d| d.stats.is_connected()).count();
        let total = domains.len();
        let last_data_at = domains.iter().filter_map(|d| d.stats.last_success_at).max();

        Overview {
            last_data_at,
            last_data_time: last_data_at.map(|t| format_time_label(t, self.locale)),
            active_connections: format!("{}/{}", connected, total),
            connected,
            total,
            samples_processed: domains.iter().map(|d| d.stats.samples_received).sum(),
            refresh_interval_ms: OVERVIEW_REFRESH_INTERVAL.as_millis() as u64,
            domains,
        }
    }
}
