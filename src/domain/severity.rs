// Notice and alert severity levels
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// How long a notice stays visible before it is dismissed
    pub fn display_duration(&self) -> Duration {
        match self {
            Self::Warning | Self::Error => Duration::from_secs(5),
            Self::Info => Duration::from_secs(3),
        }
    }
}
