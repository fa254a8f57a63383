//! # reaktor-api: Classroom Issue Service
//!
//! Professors file issues about classrooms (a broken projector, a missing
//! chair) and staff move them through `To do`, `In process`, `Finished`
//! and `Canceled`. Issues are kept in PostgreSQL when `DATABASE_URL` is
//! set and in memory otherwise.
//!
//! ## API Surface
//!
//! | Route                              | Method | Operation            |
//! |------------------------------------|--------|----------------------|
//! | `/incidencias`, `/incidencias/crear` | POST | File an issue        |
//! | `/incidencias`                     | GET    | Fetch by identity    |
//! | `/incidencias`, `/incidencias/borrar` | DELETE | Delete by identity |
//! | `/incidencias/filtrar`             | GET    | Filter               |
//! | `/incidencias/actualizar`          | POST   | Replace              |
//! | `/incidencias/cambiar-estado`      | POST   | Change status        |
//! | `/incidencias/cancelar`            | POST   | Move to `Canceled`   |
//! | `/incidencias/en-progreso`         | POST   | Move to `In process` |
//! | `/incidencias/finalizada`          | POST   | Move to `Finished`   |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! CorsLayer → TraceLayer → AuthMiddleware → Handler
//! ```

pub mod auth;
pub mod db;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::AuthConfig;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) are mounted outside the auth middleware
/// so they remain accessible without credentials.
pub fn app(state: AppState) -> Router {
    let auth_config = AuthConfig {
        token: state.config.auth_token.clone(),
    };

    // Authenticated API routes.
    let api = Router::new()
        .merge(routes::issues::router())
        .merge(openapi::router())
        .layer(from_fn(auth::auth_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(axum::Extension(auth_config))
        .with_state(state.clone());

    // Unauthenticated health probes.
    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .with_state(state);

    Router::new()
        .merge(health)
        .merge(api)
        .layer(CorsLayer::permissive())
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: 503 when the configured database does not answer.
async fn readiness(State(state): State<AppState>) -> Response {
    if let Some(pool) = &state.db_pool {
        if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
            tracing::error!(error = %e, "readiness check failed: database unreachable");
            return (StatusCode::SERVICE_UNAVAILABLE, "database unavailable").into_response();
        }
    }
    "ready".into_response()
}
