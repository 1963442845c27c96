// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{collections::BTreeMap, net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::clock::{Clock, SystemClock};
use crate::application::controller::{ControllerSettings, DashboardController};
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::webhook_source::WebhookSource;
use crate::presentation::app_state::{AppState, DomainHandle};
use crate::presentation::view_store::ViewStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config().context("failed to load dashboard configuration")?;

    // One HTTP client shared by every webhook source (infrastructure layer)
    let client = WebhookSource::client(config.request_timeout())?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // Wire one controller per enabled domain (application layer)
    let mut domains = BTreeMap::new();
    for plan in config.domain_plans() {
        if !plan.enabled {
            tracing::info!(domain = %plan.domain, "Domain disabled, skipping");
            continue;
        }

        let source = Arc::new(WebhookSource::new(plan.webhook_url.clone(), client.clone()));
        let view = Arc::new(ViewStore::new(plan.domain, clock.clone()));
        let settings = ControllerSettings {
            interval: plan.interval,
            capacity: plan.capacity,
            ..ControllerSettings::defaults_for(plan.domain, config.locale)
        };
        let controller = Arc::new(DashboardController::new(
            settings,
            source,
            view.clone(),
            clock.clone(),
        ));

        tracing::info!(
            domain = %plan.domain,
            url = %plan.webhook_url,
            interval_ms = plan.interval.as_millis() as u64,
            capacity = plan.capacity,
            "Domain configured"
        );
        domains.insert(plan.domain, DomainHandle { controller, view });
    }

    // Create application state and start polling
    let state = Arc::new(AppState::new(domains, config.locale));
    state.start_all();

    // Build router (presentation layer)
    let router = presentation::router(state.clone());

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address `{}`", config.server.bind))?;
    tracing::info!(%addr, "Starting weathertech-telemetry service");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await?;

    state.stop_all();
    tracing::info!("Pollers stopped, shutting down");

    Ok(())
}
