use crate::domain::format::Locale;
use crate::domain::telemetry_domain::TelemetryDomain;
use serde::Deserialize;
use std::time::Duration;

const MIN_INTERVAL_MS: u64 = 100;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default = "default_webhook_base_url")]
    pub webhook_base_url: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default)]
    pub domains: DomainsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DomainsConfig {
    #[serde(default)]
    pub gateway: DomainSettings,
    #[serde(default)]
    pub gps: DomainSettings,
    #[serde(default)]
    pub sensors: DomainSettings,
    #[serde(default)]
    pub transceiver: DomainSettings,
}

/// Per-domain overrides; anything left out falls back to the domain default
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DomainSettings {
    pub enabled: Option<bool>,
    pub webhook_url: Option<String>,
    pub interval_ms: Option<u64>,
    pub capacity: Option<usize>,
}

/// Fully resolved polling plan for one domain
#[derive(Debug, Clone, PartialEq)]
pub struct DomainPlan {
    pub domain: TelemetryDomain,
    pub enabled: bool,
    pub webhook_url: String,
    pub interval: Duration,
    pub capacity: usize,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_webhook_base_url() -> String {
    "https://your-n8n-domain.com".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

impl DomainsConfig {
    pub fn settings(&self, domain: TelemetryDomain) -> &DomainSettings {
        match domain {
            TelemetryDomain::Gateway => &self.gateway,
            TelemetryDomain::Gps => &self.gps,
            TelemetryDomain::Sensors => &self.sensors,
            TelemetryDomain::Transceiver => &self.transceiver,
        }
    }
}

impl DashboardConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn domain_plan(&self, domain: TelemetryDomain) -> DomainPlan {
        let settings = self.domains.settings(domain);

        let webhook_url = settings.webhook_url.clone().unwrap_or_else(|| {
            format!(
                "{}{}",
                self.webhook_base_url.trim_end_matches('/'),
                domain.webhook_path()
            )
        });
        let interval = settings
            .interval_ms
            .map(|ms| Duration::from_millis(ms.max(MIN_INTERVAL_MS)))
            .unwrap_or_else(|| domain.default_interval());

        DomainPlan {
            domain,
            enabled: settings.enabled.unwrap_or(true),
            webhook_url,
            interval,
            capacity: settings.capacity.unwrap_or_else(|| domain.default_capacity()).max(1),
        }
    }

    pub fn domain_plans(&self) -> Vec<DomainPlan> {
        TelemetryDomain::ALL
            .into_iter()
            .map(|d| self.domain_plan(d))
            .collect()
    }
}

/// Load `config/dashboard.*` (optional) overlaid with `DASHBOARD__*` environment variables
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    fn parse(toml: &str) -> DashboardConfig {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse("");
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));

        let plan = config.domain_plan(TelemetryDomain::Sensors);
        assert!(plan.enabled);
        assert_eq!(plan.webhook_url, "https://your-n8n-domain.com/webhook/sensors");
        assert_eq!(plan.interval, Duration::from_secs(3));
        assert_eq!(plan.capacity, 15);
    }

    #[test]
    fn test_domain_overrides() {
        let config = parse(
            r#"
            locale = "id"
            webhook_base_url = "http://n8n.local:5678/"

            [domains.gateway]
            interval_ms = 2500
            capacity = 0

            [domains.gps]
            enabled = false
            webhook_url = "http://tracker.local/fix"

            [domains.transceiver]
            interval_ms = 5
            "#,
        );

        assert_eq!(config.locale, Locale::Id);

        let gateway = config.domain_plan(TelemetryDomain::Gateway);
        assert_eq!(gateway.webhook_url, "http://n8n.local:5678/webhook/gateway");
        assert_eq!(gateway.interval, Duration::from_millis(2500));
        assert_eq!(gateway.capacity, 1);

        let gps = config.domain_plan(TelemetryDomain::Gps);
        assert!(!gps.enabled);
        assert_eq!(gps.webhook_url, "http://tracker.local/fix");

        let transceiver = config.domain_plan(TelemetryDomain::Transceiver);
        assert_eq!(transceiver.interval, Duration::from_millis(MIN_INTERVAL_MS));
        assert_eq!(config.domain_plans().len(), 4);
    }
}
