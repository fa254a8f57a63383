//! # Issue API
//!
//! Handles issue creation, lookup, filtering, replacement, deletion and
//! status transitions under `/incidencias`. Identities travel in the JSON
//! body (also on `GET` and `DELETE`), as `{classNumber, professorMail, date}`.

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use reaktor_core::{Issue, IssueFilter, IssueId, IssueStatus, NewIssue};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::auth::Submitter;
use crate::error::AppError;
use crate::extractors::{extract_json, extract_optional_json};
use crate::state::AppState;

/// Request to file a new issue. Status and date are assigned by the server.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueRequest {
    /// Absent or `null` counts as blank and fails validation.
    #[serde(default, deserialize_with = "null_as_blank")]
    pub class_number: String,
    #[serde(default, deserialize_with = "null_as_blank")]
    pub description: String,
    /// Ignored: the `professorMail` header decides the submitter.
    #[serde(default)]
    pub professor_mail: Option<String>,
}

fn null_as_blank<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Request to move an issue to another status.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeRequest {
    pub class_number: String,
    pub professor_mail: String,
    pub date: DateTime<Utc>,
    /// Target status label: "To do", "In process", "Finished" or "Canceled".
    pub status: String,
}

impl StatusChangeRequest {
    fn id(&self) -> IssueId {
        IssueId {
            class_number: self.class_number.clone(),
            professor_mail: self.professor_mail.clone(),
            date: self.date,
        }
    }
}

/// Confirmation returned by every write.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Confirmation {
    pub message: String,
    /// The issue as stored after the write. Absent after a delete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<Issue>,
}

impl Confirmation {
    fn created(message: &str, issue: Option<Issue>) -> (StatusCode, Json<Self>) {
        (
            StatusCode::CREATED,
            Json(Self {
                message: message.to_string(),
                issue,
            }),
        )
    }
}

/// Build the issues router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/incidencias",
            post(create_issue).get(get_issue).delete(delete_issue),
        )
        .route("/incidencias/crear", post(create_issue))
        .route("/incidencias/borrar", delete(delete_issue))
        .route("/incidencias/filtrar", get(filter_issues))
        .route("/incidencias/actualizar", post(update_issue))
        .route("/incidencias/cambiar-estado", post(change_status))
        .route("/incidencias/cancelar", post(cancel_issue))
        .route("/incidencias/en-progreso", post(start_issue))
        .route("/incidencias/finalizada", post(finish_issue))
}

/// POST /incidencias: File a new issue.
#[utoipa::path(
    post,
    path = "/incidencias",
    request_body = CreateIssueRequest,
    params(("professorMail" = String, Header, description = "Mail of the submitting professor")),
    responses(
        (status = 201, description = "Issue created", body = Confirmation),
        (status = 401, description = "Issue already exists", body = crate::error::ErrorBody),
        (status = 422, description = "Invalid issue values", body = crate::error::ErrorBody),
    ),
    tag = "issues"
)]
pub(crate) async fn create_issue(
    State(state): State<AppState>,
    Submitter(professor_mail): Submitter,
    body: Result<Json<CreateIssueRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Confirmation>), AppError> {
    let req = extract_json(body)?;

    if let Some(body_mail) = req.professor_mail.as_deref() {
        if body_mail != professor_mail {
            tracing::debug!(
                header = %professor_mail,
                body = %body_mail,
                "body professorMail ignored in favour of header"
            );
        }
    }

    let issue = state
        .issues
        .create(NewIssue {
            class_number: req.class_number,
            professor_mail,
            description: req.description,
        })
        .await?;

    Ok(Confirmation::created("issue created", Some(issue)))
}

/// GET /incidencias: Fetch one issue by identity.
#[utoipa::path(
    get,
    path = "/incidencias",
    request_body = IssueId,
    responses(
        (status = 200, description = "Issue found", body = Issue),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "issues"
)]
pub(crate) async fn get_issue(
    State(state): State<AppState>,
    body: Result<Json<IssueId>, JsonRejection>,
) -> Result<Json<Issue>, AppError> {
    let id = extract_json(body)?;
    Ok(Json(state.issues.get(&id).await?))
}

/// DELETE /incidencias: Delete one issue by identity.
#[utoipa::path(
    delete,
    path = "/incidencias",
    request_body = IssueId,
    responses(
        (status = 201, description = "Issue deleted", body = Confirmation),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "issues"
)]
pub(crate) async fn delete_issue(
    State(state): State<AppState>,
    body: Result<Json<IssueId>, JsonRejection>,
) -> Result<(StatusCode, Json<Confirmation>), AppError> {
    let id = extract_json(body)?;
    state.issues.delete(&id).await?;
    Ok(Confirmation::created("issue deleted", None))
}

/// GET /incidencias/filtrar: List issues matching every given field.
///
/// An empty body means no predicates.
#[utoipa::path(
    get,
    path = "/incidencias/filtrar",
    request_body = IssueFilter,
    responses(
        (status = 200, description = "Matching issues", body = Vec<Issue>),
        (status = 404, description = "No issue matched", body = crate::error::ErrorBody),
    ),
    tag = "issues"
)]
pub(crate) async fn filter_issues(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<Issue>>, AppError> {
    let filter: IssueFilter = extract_optional_json(&body)?;
    Ok(Json(state.issues.filter(&filter).await?))
}

/// POST /incidencias/actualizar: Replace an issue.
#[utoipa::path(
    post,
    path = "/incidencias/actualizar",
    request_body = Issue,
    responses(
        (status = 201, description = "Issue updated", body = Confirmation),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
        (status = 422, description = "Invalid issue values", body = crate::error::ErrorBody),
    ),
    tag = "issues"
)]
pub(crate) async fn update_issue(
    State(state): State<AppState>,
    body: Result<Json<Issue>, JsonRejection>,
) -> Result<(StatusCode, Json<Confirmation>), AppError> {
    let issue = extract_json(body)?;
    let stored = state.issues.update(issue).await?;
    Ok(Confirmation::created("issue updated", Some(stored)))
}

/// POST /incidencias/cambiar-estado: Move an issue to the given status.
#[utoipa::path(
    post,
    path = "/incidencias/cambiar-estado",
    request_body = StatusChangeRequest,
    responses(
        (status = 201, description = "Status changed", body = Confirmation),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
        (status = 422, description = "Unknown status label", body = crate::error::ErrorBody),
    ),
    tag = "issues"
)]
pub(crate) async fn change_status(
    State(state): State<AppState>,
    body: Result<Json<StatusChangeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Confirmation>), AppError> {
    let req = extract_json(body)?;
    let issue = state.issues.transition(&req.id(), &req.status).await?;
    Ok(Confirmation::created("issue status changed", Some(issue)))
}

async fn move_to(
    state: &AppState,
    body: Result<Json<IssueId>, JsonRejection>,
    status: IssueStatus,
) -> Result<(StatusCode, Json<Confirmation>), AppError> {
    let id = extract_json(body)?;
    let issue = state.issues.transition(&id, status.as_str()).await?;
    Ok(Confirmation::created("issue status changed", Some(issue)))
}

/// POST /incidencias/cancelar: Move an issue to `Canceled`.
#[utoipa::path(
    post,
    path = "/incidencias/cancelar",
    request_body = IssueId,
    responses(
        (status = 201, description = "Issue canceled", body = Confirmation),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "issues"
)]
pub(crate) async fn cancel_issue(
    State(state): State<AppState>,
    body: Result<Json<IssueId>, JsonRejection>,
) -> Result<(StatusCode, Json<Confirmation>), AppError> {
    move_to(&state, body, IssueStatus::Canceled).await
}

/// POST /incidencias/en-progreso: Move an issue to `In process`.
#[utoipa::path(
    post,
    path = "/incidencias/en-progreso",
    request_body = IssueId,
    responses(
        (status = 201, description = "Issue in process", body = Confirmation),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "issues"
)]
pub(crate) async fn start_issue(
    State(state): State<AppState>,
    body: Result<Json<IssueId>, JsonRejection>,
) -> Result<(StatusCode, Json<Confirmation>), AppError> {
    move_to(&state, body, IssueStatus::InProcess).await
}

/// POST /incidencias/finalizada: Move an issue to `Finished`.
#[utoipa::path(
    post,
    path = "/incidencias/finalizada",
    request_body = IssueId,
    responses(
        (status = 201, description = "Issue finished", body = Confirmation),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "issues"
)]
pub(crate) async fn finish_issue(
    State(state): State<AppState>,
    body: Result<Json<IssueId>, JsonRejection>,
) -> Result<(StatusCode, Json<Confirmation>), AppError> {
    move_to(&state, body, IssueStatus::Finished).await
}
