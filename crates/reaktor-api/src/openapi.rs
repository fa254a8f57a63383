//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reaktor Issues API",
        version = "0.1.0",
        description = "Filing and tracking of classroom issues reported by professors.",
        license(name = "MIT")
    ),
    paths(
        crate::routes::issues::create_issue,
        crate::routes::issues::get_issue,
        crate::routes::issues::delete_issue,
        crate::routes::issues::filter_issues,
        crate::routes::issues::update_issue,
        crate::routes::issues::change_status,
        crate::routes::issues::cancel_issue,
        crate::routes::issues::start_issue,
        crate::routes::issues::finish_issue,
    ),
    components(schemas(
        reaktor_core::Issue,
        reaktor_core::IssueId,
        reaktor_core::IssueFilter,
        reaktor_core::IssueStatus,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::issues::CreateIssueRequest,
        crate::routes::issues::StatusChangeRequest,
        crate::routes::issues::Confirmation,
    )),
    tags(
        (name = "issues", description = "Classroom issue tracking"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
