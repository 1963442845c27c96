// Presentation layer - HTTP surface over the dashboard controllers
pub mod app_state;
pub mod handlers;
pub mod view_store;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    clear_dashboard, dashboard, health_check, list_domains, overview, refresh_dashboard,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/domains", get(list_domains))
        .route("/overview", get(overview))
        .route("/dashboards/:domain", get(dashboard))
        .route("/dashboards/:domain/refresh", post(refresh_dashboard))
        .route("/dashboards/:domain/clear", post(clear_dashboard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
