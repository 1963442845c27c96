// Render collaborator consumed by the dashboard controllers
use crate::domain::snapshot::TelemetrySnapshot;
use crate::domain::telemetry_domain::TelemetryDomain;

pub use crate::domain::severity::Severity;

/// Implementations must not block and must not fail.
pub trait Renderer: Send + Sync {
    fn render(&self, domain: TelemetryDomain, history: &[TelemetrySnapshot]);

    fn notify(&self, message: &str, severity: Severity);
}
