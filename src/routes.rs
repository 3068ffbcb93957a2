// src/routes.rs

use axum::{
    Router,
    http::Method,
    middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, health, profile, quiz, session},
    state::AppState,
    utils::admin_session::admin_guard,
};

/// Assembles the main application router.
///
/// * Candidate routes are addressed purely by session token.
/// * Admin routes sit behind the cookie guard, except login/logout.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_credentials(true);

    let quiz_routes = Router::new()
        .route("/start", post(session::start))
        // Legacy entry point kept for old links.
        .route("/init", get(session::start))
        .route("/t/{token}", get(quiz::take).post(quiz::submit))
        .route("/t/{token}/profil", get(profile::show).post(profile::save));

    let admin_routes = Router::new()
        .route("/", get(admin::dashboard))
        .route("/export.csv", get(admin::export_csv))
        // Cookie gate applies only to the routes above.
        .layer(middleware::from_fn_with_state(state.clone(), admin_guard))
        .route("/login", post(admin::login))
        .route("/logout", get(admin::logout));

    Router::new()
        .route("/", get(health::landing))
        .merge(quiz_routes)
        .nest("/admin", admin_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
