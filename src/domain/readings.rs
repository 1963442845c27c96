// Derived readings - per-domain values computed from the buffered snapshots
use crate::domain::format::{format_time_label, format_uptime, format_uptime_full, to_dms, Locale};
use crate::domain::severity::Severity;
use crate::domain::snapshot::TelemetrySnapshot;
use crate::domain::telemetry_domain::TelemetryDomain;
use serde::Serialize;

/// Nominal ESP32 clock; frequency is reported against it as a usage percentage
pub const NOMINAL_CPU_MHZ: f64 = 240.0;
pub const GATEWAY_RAM_TOTAL_KB: f64 = 320.0;
pub const TRANSCEIVER_RAM_TOTAL_KB: f64 = 240.0;
/// RAM usage (bytes) above which a link or system is considered degraded
pub const RAM_PRESSURE_BYTES: f64 = 200_000.0;
pub const LOW_CPU_MHZ: f64 = 200.0;

fn bytes_to_kb(bytes: f64) -> f64 {
    (bytes / 1000.0).round()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkQuality {
    Good,
    Fair,
}

impl LinkQuality {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatewayReadings {
    pub uptime: String,
    pub cpu_freq_mhz: f64,
    pub cpu_usage_percent: f64,
    pub ram_used_kb: f64,
    pub ram_total_kb: f64,
    pub ram_free_kb: f64,
    pub wifi_signal_bars: u8,
    pub lora_quality: LinkQuality,
    pub packet_count: Option<f64>,
}

impl GatewayReadings {
    pub fn from_snapshot(snapshot: &TelemetrySnapshot, locale: Locale) -> Option<Self> {
        let uptime = snapshot.number("g_uptime_sec")?;
        let cpu_freq = snapshot.number("g_cpu_freq")?;
        let ram_used = snapshot.number("g_ram_used")?;
        let ram_used_kb = bytes_to_kb(ram_used);

        Some(Self {
            uptime: format_uptime(uptime.max(0.0) as u64, locale),
            cpu_freq_mhz: cpu_freq,
            cpu_usage_percent: (cpu_freq / NOMINAL_CPU_MHZ * 100.0).round(),
            ram_used_kb,
            ram_total_kb: GATEWAY_RAM_TOTAL_KB,
            ram_free_kb: GATEWAY_RAM_TOTAL_KB - ram_used_kb,
            wifi_signal_bars: (ram_used / 320_000.0 * 4.0).round().clamp(0.0, 4.0) as u8,
            lora_quality: if ram_used < RAM_PRESSURE_BYTES {
                LinkQuality::Good
            } else {
                LinkQuality::Fair
            },
            packet_count: snapshot.number("packet_count"),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemHealth {
    Healthy,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransceiverReadings {
    pub uptime: String,
    pub cpu_freq_mhz: f64,
    pub cpu_usage_percent: f64,
    pub ram_used_kb: f64,
    pub ram_total_kb: f64,
    pub ram_free_kb: f64,
    pub ram_usage_percent: f64,
    pub packets_sent: Option<f64>,
    pub health: SystemHealth,
    pub alert: String,
    pub alert_level: Severity,
}

impl TransceiverReadings {
    pub fn from_snapshot(snapshot: &TelemetrySnapshot, locale: Locale) -> Option<Self> {
        let uptime = snapshot.number("uptime_sec")?;
        let cpu_freq = snapshot.number("cpu_freq")?;
        let ram_used = snapshot.number("ram_used")?;
        let ram_used_kb = bytes_to_kb(ram_used);

        let cpu_low = cpu_freq <= LOW_CPU_MHZ;
        let ram_high = ram_used >= RAM_PRESSURE_BYTES;
        let health = if cpu_low || ram_high {
            SystemHealth::Warning
        } else {
            SystemHealth::Healthy
        };

        // A RAM warning takes precedence over a CPU warning.
        let alert = match (locale, ram_high, cpu_low) {
            (Locale::En, true, _) => "RAM usage high - monitor memory leaks",
            (Locale::Id, true, _) => "RAM usage tinggi - Monitor memory leaks",
            (Locale::En, false, true) => "CPU frequency low - check power supply",
            (Locale::Id, false, true) => "CPU frequency rendah - Periksa power supply",
            (Locale::En, false, false) => "System running normally",
            (Locale::Id, false, false) => "System berjalan normal",
        };

        Some(Self {
            uptime: format_uptime_full(uptime.max(0.0) as u64, locale),
            cpu_freq_mhz: cpu_freq,
            cpu_usage_percent: (cpu_freq / NOMINAL_CPU_MHZ * 100.0).min(100.0),
            ram_used_kb,
            ram_total_kb: TRANSCEIVER_RAM_TOTAL_KB,
            ram_free_kb: TRANSCEIVER_RAM_TOTAL_KB - ram_used_kb,
            ram_usage_percent: (ram_used / 240_000.0 * 100.0).min(100.0),
            packets_sent: snapshot.number("eeprom_count"),
            health,
            alert: alert.to_string(),
            alert_level: match health {
                SystemHealth::Healthy => Severity::Info,
                SystemHealth::Warning => Severity::Warning,
            },
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LightLevel {
    Bright,
    Normal,
    Dim,
    Dark,
}

impl LightLevel {
    pub fn classify(lux: f64) -> Self {
        if lux > 1000.0 {
            Self::Bright
        } else if lux > 500.0 {
            Self::Normal
        } else if lux > 100.0 {
            Self::Dim
        } else {
            Self::Dark
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Bright, Locale::En) => "Bright",
            (Self::Bright, Locale::Id) => "Terang",
            (Self::Normal, _) => "Normal",
            (Self::Dim, Locale::En) => "Dim",
            (Self::Dim, Locale::Id) => "Redup",
            (Self::Dark, Locale::En) => "Dark",
            (Self::Dark, Locale::Id) => "Gelap",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AirQuality {
    Clean,
    Moderate,
    Dirty,
}

impl AirQuality {
    pub fn classify(clean_percent: f64) -> Self {
        if clean_percent > 80.0 {
            Self::Clean
        } else if clean_percent > 60.0 {
            Self::Moderate
        } else {
            Self::Dirty
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Clean, Locale::En) => "Clean",
            (Self::Clean, Locale::Id) => "Bersih",
            (Self::Moderate, Locale::En) => "Moderate",
            (Self::Moderate, Locale::Id) => "Sedang",
            (Self::Dirty, Locale::En) => "Dirty",
            (Self::Dirty, Locale::Id) => "Kotor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    fn over(values: impl Iterator<Item = f64>) -> Option<Self> {
        values.fold(None, |range, v| match range {
            None => Some(Self { min: v, max: v }),
            Some(r) => Some(Self {
                min: r.min.min(v),
                max: r.max.max(v),
            }),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorReadings {
    pub lux: Option<f64>,
    pub temperature_c: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub pressure_hpa: Option<f64>,
    pub air_clean_percent: Option<f64>,
    pub rtc_time: Option<String>,
    pub eeprom_count: Option<f64>,
    pub light_level: Option<LightLevel>,
    pub air_quality: Option<AirQuality>,
    /// Temperature gauge fill against a 0-50 °C scale
    pub temperature_gauge_percent: Option<f64>,
    pub humidity_gauge_percent: Option<f64>,
    pub temperature_range: Option<ValueRange>,
    pub humidity_range: Option<ValueRange>,
}

impl SensorReadings {
    /// `history` is oldest first; the last entry is the current reading.
    pub fn from_history(history: &[TelemetrySnapshot]) -> Option<Self> {
        let latest = history.last()?;
        let lux = latest.number("lux");
        let temperature = latest.number("temp");
        let humidity = latest.number("hum");
        let air = latest.number("air_clean_perc");

        Some(Self {
            lux,
            temperature_c: temperature,
            humidity_percent: humidity,
            pressure_hpa: latest.number("pres"),
            air_clean_percent: air,
            rtc_time: latest
                .text("rtc_time")
                .map(str::to_string)
                .or_else(|| latest.number("rtc_time").map(|n| n.to_string())),
            eeprom_count: latest.number("eeprom_count"),
            light_level: lux.map(LightLevel::classify),
            air_quality: air.map(AirQuality::classify),
            temperature_gauge_percent: temperature.map(|t| t / 50.0 * 100.0),
            humidity_gauge_percent: humidity,
            temperature_range: ValueRange::over(history.iter().filter_map(|s| s.number("temp"))),
            humidity_range: ValueRange::over(history.iter().filter_map(|s| s.number("hum"))),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionEntry {
    pub time: String,
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpsReadings {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_text: String,
    pub longitude_text: String,
    pub latitude_dms: String,
    pub longitude_dms: String,
    pub maps_url: String,
    /// Newest first
    pub history: Vec<PositionEntry>,
}

fn position_text(latitude: f64, longitude: f64) -> String {
    format!("{:.6}, {:.6}", latitude, longitude)
}

impl GpsReadings {
    pub fn from_history(history: &[TelemetrySnapshot], locale: Locale) -> Option<Self> {
        let latest = history.last()?;
        let latitude = latest.number("latitude")?;
        let longitude = latest.number("longitude")?;

        let positions = history
            .iter()
            .rev()
            .filter_map(|s| {
                Some(PositionEntry {
                    time: format_time_label(s.captured_at, locale),
                    position: position_text(s.number("latitude")?, s.number("longitude")?),
                })
            })
            .collect();

        Some(Self {
            latitude,
            longitude,
            latitude_text: format!("{:.6}", latitude),
            longitude_text: format!("{:.6}", longitude),
            latitude_dms: to_dms(latitude, true).to_string(),
            longitude_dms: to_dms(longitude, false).to_string(),
            maps_url: format!("https://maps.google.com/?q={},{}", latitude, longitude),
            history: positions,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DomainReadings {
    Gateway(GatewayReadings),
    Gps(GpsReadings),
    Sensors(SensorReadings),
    Transceiver(TransceiverReadings),
}

impl DomainReadings {
    /// Readings for the newest sample in `history`, or `None` before the first sample.
    pub fn derive(
        domain: TelemetryDomain,
        history: &[TelemetrySnapshot],
        locale: Locale,
    ) -> Option<Self> {
        match domain {
            TelemetryDomain::Gateway => {
                GatewayReadings::from_snapshot(history.last()?, locale).map(Self::Gateway)
            }
            TelemetryDomain::Transceiver => {
                TransceiverReadings::from_snapshot(history.last()?, locale).map(Self::Transceiver)
            }
            TelemetryDomain::Sensors => SensorReadings::from_history(history).map(Self::Sensors),
            TelemetryDomain::Gps => GpsReadings::from_history(history, locale).map(Self::Gps),
        }
    }
}
