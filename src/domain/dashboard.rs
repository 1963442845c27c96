// Dashboard view model - what one domain page shows
use super::telemetry::{ChartData, TileData};
use super::telemetry_domain::TelemetryDomain;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub domain: TelemetryDomain,
    pub title: String,
    pub last_update: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    pub tiles: Vec<TileData>,
    pub charts: Vec<ChartData>,
}

#[cfg(test)]
impl DashboardView {
    pub fn tile(&self, id: &str) -> Option<&TileData> {
        self.tiles.iter().find(|t| t.id == id)
    }

    pub fn chart(&self, id: &str) -> Option<&ChartData> {
        self.charts.iter().find(|c| c.id == id)
    }
}
