//! theralink-server
//!
//! HTTP surface: the patient check-in page, the clinic dashboard, and the
//! JSON API behind them.

pub mod config;
pub mod error;
pub mod intake;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

/// Build the router with all routes and layers.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/questionnaire", get(routes::questionnaire::get_questionnaire))
        // Pages
        .route("/", get(routes::pages::home))
        .route("/patient", get(routes::pages::check_in_form))
        .route("/patient/check-in", post(routes::pages::submit_check_in_form))
        .route("/doctor", get(routes::pages::doctor_dashboard))
        .route("/doctor/patients/{id}", get(routes::pages::doctor_patient))
        .route(
            "/doctor/patients/{id}/verified",
            post(routes::pages::update_verified),
        )
        .route(
            "/doctor/patients/{id}/notes",
            post(routes::pages::update_notes),
        )
        // JSON API
        .route("/api/check-ins", post(routes::check_ins::create_check_in))
        .route("/api/patients", get(routes::patients::list_patients))
        .route("/api/patients/{id}", get(routes::patients::get_patient))
        .route(
            "/api/patients/{id}/dashboard",
            get(routes::patients::get_dashboard),
        )
        .route(
            "/api/patients/{id}/verified",
            put(routes::patients::set_verified),
        )
        .route("/api/patients/{id}/notes", put(routes::patients::set_notes))
        .route(
            "/api/patients/{id}/summary",
            post(routes::summaries::get_summary),
        )
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
