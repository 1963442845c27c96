// Chart data domain models

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub time_ms: i64,
    pub label: String,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(time_ms: i64, label: String, value: f64) -> Self {
        Self {
            time_ms,
            label,
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileData {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub value: Option<f64>,
    pub display: String,
}

impl TileData {
    pub fn new(id: &str, title: &str, unit: &str, value: Option<f64>, display: String) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            unit: unit.to_string(),
            value,
            display,
        }
    }

    /// Textual tile without a numeric value
    pub fn text(id: &str, title: &str, display: impl Into<String>) -> Self {
        Self::new(id, title, "", None, display.into())
    }
}

/// Which y axis a series is plotted against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesData {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub axis: Axis,
    pub points: Vec<TimeSeriesPoint>,
}

impl SeriesData {
    pub fn new(id: &str, name: &str, color: Option<&str>, points: Vec<TimeSeriesPoint>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.map(str::to_string),
            axis: Axis::Primary,
            points,
        }
    }

    pub fn on_secondary_axis(mut self) -> Self {
        self.axis = Axis::Secondary;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub kind: ChartKind,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    /// Bounds of the secondary axis, present when a series is plotted against it
    pub secondary_axis: Option<AxisBounds>,
    pub series: Vec<SeriesData>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Line,
    MultiLine,
}

impl ChartData {
    pub fn new(
        id: &str,
        title: &str,
        unit: Option<&str>,
        y_min: Option<f64>,
        y_max: Option<f64>,
        series: Vec<SeriesData>,
    ) -> Self {
        let kind = if series.len() > 1 {
            ChartKind::MultiLine
        } else {
            ChartKind::Line
        };

        Self {
            id: id.to_string(),
            title: title.to_string(),
            unit: unit.map(str::to_string),
            kind,
            y_min,
            y_max,
            secondary_axis: None,
            series,
        }
    }

    pub fn with_secondary_axis(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.secondary_axis = Some(AxisBounds { min, max });
        self
    }
}
