// Dashboard service - Use case for building per-domain dashboard views
use crate::domain::dashboard::DashboardView;
use crate::domain::format::{format_time_label, with_unit, Locale};
use crate::domain::poll_stats::PollStats;
use crate::domain::readings::{
    DomainReadings, GatewayReadings, GpsReadings, SensorReadings, TransceiverReadings,
    GATEWAY_RAM_TOTAL_KB, TRANSCEIVER_RAM_TOTAL_KB,
};
use crate::domain::snapshot::TelemetrySnapshot;
use crate::domain::telemetry::{ChartData, SeriesData, TileData, TimeSeriesPoint};
use crate::domain::telemetry_domain::TelemetryDomain;

const LUX_WINDOW: usize = 10;
const SENSOR_TREND_WINDOW: usize = 15;
const PLACEHOLDER: &str = "--";

fn number_tile(id: &str, title: &str, unit: &str, value: Option<f64>, precision: usize) -> TileData {
    let text = value
        .map(|v| format!("{:.*}", precision, v))
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    let display = if value.is_some() {
        with_unit(&text, unit)
    } else {
        text
    };
    TileData::new(id, title, unit, value, display)
}

#[derive(Debug, Clone)]
pub struct DashboardService {
    locale: Locale,
}

impl DashboardService {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn readings(&self, domain: TelemetryDomain, history: &[TelemetrySnapshot]) -> Option<DomainReadings> {
        DomainReadings::derive(domain, history, self.locale)
    }

    /// Build the view for `history` (oldest first). An empty history yields a view without tiles.
    pub fn build_view(
        &self,
        domain: TelemetryDomain,
        history: &[TelemetrySnapshot],
        stats: &PollStats,
    ) -> DashboardView {
        let latest = history.last();
        let (tiles, charts) = match self.readings(domain, history) {
            Some(DomainReadings::Gateway(r)) => (self.gateway_tiles(&r), vec![self.gateway_chart(history)]),
            Some(DomainReadings::Transceiver(r)) => {
                (self.transceiver_tiles(&r), self.transceiver_charts(history))
            }
            Some(DomainReadings::Sensors(r)) => (self.sensor_tiles(&r), self.sensor_charts(history)),
            Some(DomainReadings::Gps(r)) => (self.gps_tiles(&r, stats), Vec::new()),
            None => (Vec::new(), Vec::new()),
        };

        let title = format!("{} Telemetry", domain.title());
        DashboardView {
            domain,
            title,
            last_update: latest.map(|s| self.last_update_label(s)),
            updated_at: latest.map(|s| s.captured_at),
            tiles,
            charts,
        }
    }

    fn last_update_label(&self, snapshot: &TelemetrySnapshot) -> String {
        let time = format_time_label(snapshot.captured_at, self.locale);
        match self.locale {
            Locale::En => format!("Last update: {}", time),
            Locale::Id => format!("Terakhir update: {}", time),
        }
    }

    fn series_points(
        &self,
        history: &[TelemetrySnapshot],
        value: impl Fn(&TelemetrySnapshot) -> Option<f64>,
    ) -> Vec<TimeSeriesPoint> {
        history
            .iter()
            .filter_map(|s| {
                Some(TimeSeriesPoint::new(
                    s.time_ms(),
                    format_time_label(s.captured_at, self.locale),
                    value(s)?,
                ))
            })
            .collect()
    }

    fn gateway_tiles(&self, r: &GatewayReadings) -> Vec<TileData> {
        let mut tiles = vec![
            TileData::text("gateway-uptime", "Uptime", r.uptime.clone()),
            number_tile("gateway-cpu", "CPU usage", "%", Some(r.cpu_usage_percent), 0),
            number_tile("gateway-memory", "Memory", "KB", Some(r.ram_used_kb), 0),
            number_tile("gw-cpu-freq", "CPU frequency", "MHz", Some(r.cpu_freq_mhz), 0),
            number_tile("gw-ram-total", "RAM total", "KB", Some(r.ram_total_kb), 0),
            number_tile("gw-ram-used", "RAM used", "KB", Some(r.ram_used_kb), 0),
            number_tile("gw-ram-free", "RAM free", "KB", Some(r.ram_free_kb), 0),
            TileData::new(
                "wifi-signal",
                "Wi-Fi signal",
                "bars",
                Some(r.wifi_signal_bars as f64),
                format!("{}/4", r.wifi_signal_bars),
            ),
            TileData::text("lora-quality", "LoRa quality", r.lora_quality.label()),
        ];
        if let Some(packets) = r.packet_count {
            tiles.push(number_tile("lora-packets", "LoRa packets", "", Some(packets), 0));
        }
        tiles
    }

    fn gateway_chart(&self, history: &[TelemetrySnapshot]) -> ChartData {
        let cpu = self.series_points(history, |s| {
            GatewayReadings::from_snapshot(s, self.locale).map(|r| r.cpu_usage_percent)
        });
        let ram = self.series_points(history, |s| {
            GatewayReadings::from_snapshot(s, self.locale).map(|r| r.ram_used_kb)
        });

        ChartData::new(
            "gateway-performance",
            "Gateway performance",
            None,
            Some(0.0),
            Some(100.0),
            vec![
                SeriesData::new("cpu", "CPU Usage (%)", Some("#ff6384"), cpu),
                SeriesData::new("ram", "RAM Usage (KB)", Some("#36a2eb"), ram).on_secondary_axis(),
            ],
        )
        .with_secondary_axis(Some(0.0), Some(GATEWAY_RAM_TOTAL_KB))
    }

    fn transceiver_tiles(&self, r: &TransceiverReadings) -> Vec<TileData> {
        let mut tiles = vec![
            number_tile("cpu-value", "CPU", "MHz", Some(r.cpu_freq_mhz), 0),
            number_tile("ram-value", "RAM", "KB", Some(r.ram_used_kb), 0),
            TileData::text("uptime-value", "Uptime", r.uptime.clone()),
            number_tile("cpu-usage", "CPU usage", "%", Some(r.cpu_usage_percent), 0),
            number_tile("ram-usage", "RAM usage", "%", Some(r.ram_usage_percent), 0),
            number_tile("ram-total", "RAM total", "KB", Some(r.ram_total_kb), 0),
            number_tile("ram-used", "RAM used", "KB", Some(r.ram_used_kb), 0),
            number_tile("ram-free", "RAM free", "KB", Some(r.ram_free_kb), 0),
            TileData::text("transceiver-alert", "Status", r.alert.clone()),
        ];
        if let Some(sent) = r.packets_sent {
            tiles.push(number_tile("packets-sent", "Packets sent", "", Some(sent), 0));
        }
        tiles
    }

    fn transceiver_charts(&self, history: &[TelemetrySnapshot]) -> Vec<ChartData> {
        let cpu = self.series_points(history, |s| s.number("cpu_freq"));
        let ram = self.series_points(history, |s| {
            TransceiverReadings::from_snapshot(s, self.locale).map(|r| r.ram_used_kb)
        });

        vec![
            ChartData::new(
                "cpu",
                "CPU Frequency (MHz)",
                Some("MHz"),
                Some(0.0),
                Some(240.0),
                vec![SeriesData::new("cpu", "CPU Frequency", Some("#ff6384"), cpu.clone())],
            ),
            ChartData::new(
                "ram",
                "RAM Usage (KB)",
                Some("KB"),
                Some(0.0),
                Some(TRANSCEIVER_RAM_TOTAL_KB),
                vec![SeriesData::new("ram", "RAM Used", Some("#36a2eb"), ram.clone())],
            ),
            ChartData::new(
                "performance-history",
                "Performance history",
                None,
                None,
                None,
                vec![
                    SeriesData::new("cpu", "CPU (MHz)", Some("#ff6384"), cpu),
                    SeriesData::new("ram", "RAM (KB)", Some("#36a2eb"), ram).on_secondary_axis(),
                ],
            )
            .with_secondary_axis(None, None),
        ]
    }

    fn sensor_tiles(&self, r: &SensorReadings) -> Vec<TileData> {
        let mut tiles = vec![
            number_tile("lux-value", "Light", "lux", r.lux, 1),
            number_tile("temp-value", "Temperature", "°C", r.temperature_c, 1),
            number_tile("hum-value", "Humidity", "%", r.humidity_percent, 1),
            number_tile("pres-value", "Pressure", "hPa", r.pressure_hpa, 1),
            number_tile("air-value", "Air quality", "%", r.air_clean_percent, 0),
            TileData::text(
                "rtc-time",
                "RTC time",
                r.rtc_time.clone().unwrap_or_else(|| PLACEHOLDER.to_string()),
            ),
            number_tile("eeprom-count", "EEPROM records", "", r.eeprom_count, 0),
            number_tile("temp-gauge", "Temperature gauge", "%", r.temperature_gauge_percent, 0),
            number_tile("hum-gauge", "Humidity gauge", "%", r.humidity_gauge_percent, 0),
        ];

        if let Some(level) = r.light_level {
            tiles.push(TileData::text("lux-status", "Light status", level.label(self.locale)));
        }
        if let Some(quality) = r.air_quality {
            tiles.push(TileData::text("air-status", "Air status", quality.label(self.locale)));
        }
        if let Some(range) = r.temperature_range {
            tiles.push(number_tile("temp-min", "Temperature min", "°C", Some(range.min), 1));
            tiles.push(number_tile("temp-max", "Temperature max", "°C", Some(range.max), 1));
        }
        if let Some(range) = r.humidity_range {
            tiles.push(number_tile("hum-min", "Humidity min", "%", Some(range.min), 1));
            tiles.push(number_tile("hum-max", "Humidity max", "%", Some(range.max), 1));
        }
        tiles
    }

    fn sensor_charts(&self, history: &[TelemetrySnapshot]) -> Vec<ChartData> {
        let lux_window = &history[history.len().saturating_sub(LUX_WINDOW)..];
        let trend_window = &history[history.len().saturating_sub(SENSOR_TREND_WINDOW)..];

        vec![
            ChartData::new(
                "lux",
                "Light (lux)",
                Some("lux"),
                Some(0.0),
                None,
                vec![SeriesData::new(
                    "lux",
                    "Light (lux)",
                    Some("#ffeb3b"),
                    self.series_points(lux_window, |s| s.number("lux")),
                )],
            ),
            ChartData::new(
                "sensor-trend",
                "Temperature and humidity",
                None,
                None,
                None,
                vec![
                    SeriesData::new(
                        "temp",
                        "Temperature (°C)",
                        Some("#ff6384"),
                        self.series_points(trend_window, |s| s.number("temp")),
                    ),
                    SeriesData::new(
                        "hum",
                        "Humidity (%)",
                        Some("#36a2eb"),
                        self.series_points(trend_window, |s| s.number("hum")),
                    ),
                ],
            ),
        ]
    }

    fn gps_tiles(&self, r: &GpsReadings, stats: &PollStats) -> Vec<TileData> {
        let (status, accuracy) = match (stats.is_connected(), self.locale) {
            (true, Locale::En) => ("Valid", "High"),
            (true, Locale::Id) => ("Valid", "Tinggi"),
            (false, Locale::En) => ("Invalid", "Low"),
            (false, Locale::Id) => ("Invalid", "Rendah"),
        };

        vec![
            TileData::new("current-latitude", "Latitude", "°", Some(r.latitude), r.latitude_text.clone()),
            TileData::new("current-longitude", "Longitude", "°", Some(r.longitude), r.longitude_text.clone()),
            TileData::text("lat-dms", "Latitude (DMS)", r.latitude_dms.clone()),
            TileData::text("lng-dms", "Longitude (DMS)", r.longitude_dms.clone()),
            TileData::text("google-maps-link", "Map", r.maps_url.clone()),
            TileData::text("gps-status", "Fix status", status),
            TileData::text("gps-accuracy", "Accuracy", accuracy),
        ]
    }
}
