// Application state for HTTP handlers
use crate::application::controller::DashboardController;
use crate::application::dashboard_service::DashboardService;
use crate::application::overview_service::OverviewService;
use crate::domain::format::Locale;
use crate::domain::telemetry_domain::TelemetryDomain;
use crate::presentation::view_store::ViewStore;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct DomainHandle {
    pub controller: Arc<DashboardController>,
    pub view: Arc<ViewStore>,
}

#[derive(Clone)]
pub struct AppState {
    pub domains: BTreeMap<TelemetryDomain, DomainHandle>,
    pub dashboard_service: DashboardService,
    pub overview_service: OverviewService,
}

impl AppState {
    pub fn new(domains: BTreeMap<TelemetryDomain, DomainHandle>, locale: Locale) -> Self {
        let controllers = domains.values().map(|h| h.controller.clone()).collect();
        Self {
            domains,
            dashboard_service: DashboardService::new(locale),
            overview_service: OverviewService::new(controllers, locale),
        }
    }

    pub fn start_all(&self) {
        for handle in self.domains.values() {
            handle.controller.start();
        }
    }

    pub fn stop_all(&self) {
        for handle in self.domains.values() {
            handle.controller.stop();
        }
    }
}
