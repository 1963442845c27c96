// Telemetry domain model - the four station subsystems polled by the dashboard
use crate::domain::format::Locale;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TelemetryDomain {
    Gateway,
    Gps,
    Sensors,
    Transceiver,
}

impl TelemetryDomain {
    pub const ALL: [TelemetryDomain; 4] = [
        TelemetryDomain::Gateway,
        TelemetryDomain::Gps,
        TelemetryDomain::Sensors,
        TelemetryDomain::Transceiver,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gateway => "gateway",
            Self::Gps => "gps",
            Self::Sensors => "sensors",
            Self::Transceiver => "transceiver",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Gateway => "Gateway",
            Self::Gps => "GPS",
            Self::Sensors => "Sensors",
            Self::Transceiver => "Transceiver",
        }
    }

    /// Path of the upstream webhook, relative to the configured base URL
    pub fn webhook_path(&self) -> &'static str {
        match self {
            Self::Gateway => "/webhook/gateway",
            Self::Gps => "/webhook/gps",
            Self::Sensors => "/webhook/sensors",
            Self::Transceiver => "/webhook/transceiver",
        }
    }

    pub fn default_interval(&self) -> Duration {
        match self {
            Self::Gateway | Self::Gps => Duration::from_secs(5),
            Self::Sensors => Duration::from_secs(3),
            Self::Transceiver => Duration::from_secs(4),
        }
    }

    /// Number of samples kept for the rolling chart window
    pub fn default_capacity(&self) -> usize {
        match self {
            Self::Gateway | Self::Sensors => 15,
            Self::Gps => 10,
            Self::Transceiver => 20,
        }
    }

    pub fn load_error_message(&self, locale: Locale) -> String {
        let subject = match self {
            Self::Gps => "GPS",
            other => other.as_str(),
        };
        match locale {
            Locale::En => format!("Failed to load {} data", subject),
            Locale::Id => format!("Gagal memuat data {}", subject),
        }
    }
}

impl fmt::Display for TelemetryDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown telemetry domain `{0}`")]
pub struct UnknownDomain(pub String);

impl FromStr for TelemetryDomain {
    type Err = UnknownDomain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == name)
            .ok_or(UnknownDomain(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_domain() {
        assert_eq!("gateway".parse::<TelemetryDomain>(), Ok(TelemetryDomain::Gateway));
        assert_eq!(" GPS ".parse::<TelemetryDomain>(), Ok(TelemetryDomain::Gps));
        assert!("overview".parse::<TelemetryDomain>().is_err());
    }

    #[test]
    fn test_defaults_per_domain() {
        assert_eq!(TelemetryDomain::Sensors.default_interval(), Duration::from_secs(3));
        assert_eq!(TelemetryDomain::Transceiver.default_interval(), Duration::from_secs(4));
        assert_eq!(TelemetryDomain::Gps.default_capacity(), 10);
        assert_eq!(TelemetryDomain::Transceiver.default_capacity(), 20);
        assert_eq!(TelemetryDomain::Gateway.default_capacity(), 15);
    }

    #[test]
    fn test_load_error_message() {
        assert_eq!(
            TelemetryDomain::Gateway.load_error_message(Locale::Id),
            "Gagal memuat data gateway"
        );
        assert_eq!(
            TelemetryDomain::Gps.load_error_message(Locale::En),
            "Failed to load GPS data"
        );
    }
}
