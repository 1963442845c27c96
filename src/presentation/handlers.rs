// HTTP request handlers
use crate::application::renderer::{Renderer, Severity};
use crate::domain::dashboard::DashboardView;
use crate::domain::poll_stats::PollStats;
use crate::domain::readings::DomainReadings;
use crate::domain::snapshot::TelemetrySnapshot;
use crate::domain::telemetry_domain::TelemetryDomain;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::{AppState, DomainHandle};
use crate::presentation::view_store::Notice;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Serialize)]
pub struct DomainSummary {
    pub domain: TelemetryDomain,
    pub title: &'static str,
    pub interval_ms: u64,
    pub capacity: usize,
    pub running: bool,
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub view: DashboardView,
    pub readings: Option<DomainReadings>,
    pub history: Vec<TelemetrySnapshot>,
    pub stats: PollStats,
    pub running: bool,
    pub notices: Vec<Notice>,
}

async fn respond<T: Serialize>(status: StatusCode, data: &T, compress: bool) -> Response {
    match json_response(status, data, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

fn not_found(name: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        axum::Json(json!({ "error": format!("unknown or disabled domain `{}`", name) })),
    )
        .into_response()
}

fn find_domain<'a>(state: &'a AppState, name: &str) -> Option<&'a DomainHandle> {
    let domain = name.parse::<TelemetryDomain>().ok()?;
    state.domains.get(&domain)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List the configured telemetry domains
pub async fn list_domains(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let domains: Vec<DomainSummary> = state
        .domains
        .iter()
        .map(|(domain, handle)| DomainSummary {
            domain: *domain,
            title: domain.title(),
            interval_ms: handle.controller.interval().as_millis() as u64,
            capacity: handle.controller.capacity(),
            running: handle.controller.is_running(),
        })
        .collect();

    respond(StatusCode::OK, &domains, accepts_brotli(&headers)).await
}

/// Summary across every domain
pub async fn overview(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let overview = state.overview_service.overview();
    respond(StatusCode::OK, &overview, accepts_brotli(&headers)).await
}

/// Rendered dashboard for one domain
pub async fn dashboard(
    Path(name): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let Some(handle) = find_domain(&state, &name) else {
        return not_found(&name);
    };

    let domain = handle.controller.domain();
    let history = handle.view.rendered_history();
    let stats = handle.controller.stats();
    let service = &state.dashboard_service;

    let body = DashboardResponse {
        view: service.build_view(domain, &history, &stats),
        readings: service.readings(domain, &history),
        history,
        stats,
        running: handle.controller.is_running(),
        notices: handle.view.active_notices(),
    };

    respond(StatusCode::OK, &body, accepts_brotli(&headers)).await
}

/// Manual refresh: poll the upstream right away
pub async fn refresh_dashboard(
    Path(name): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let Some(handle) = find_domain(&state, &name) else {
        return not_found(&name);
    };

    let domain = handle.controller.domain();
    tracing::info!(%domain, "Manual refresh requested");
    handle
        .view
        .notify(&format!("Refreshing {} data", domain.title()), Severity::Info);

    let compress = accepts_brotli(&headers);
    match handle.controller.poll_once().await {
        Ok(snapshot) => respond(StatusCode::OK, &snapshot, compress).await,
        Err(e) => {
            respond(
                StatusCode::BAD_GATEWAY,
                &json!({ "error": e.to_string() }),
                compress,
            )
            .await
        }
    }
}

/// Reset a dashboard: drop the buffered history and re-render the empty window
pub async fn clear_dashboard(
    Path(name): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let Some(handle) = find_domain(&state, &name) else {
        return not_found(&name);
    };

    let domain = handle.controller.domain();
    let dropped = handle.controller.clear();
    let body = json!({ "domain": domain, "dropped": dropped });
    respond(StatusCode::OK, &body, accepts_brotli(&headers)).await
}
