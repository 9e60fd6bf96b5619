//! Handlers for registration, suspension and common-student queries.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use classroom_core::roster::{RegisterStudentsRequest, RosterService, SuspendStudentRequest};

use crate::error::{AppError, AppResult};
use crate::handlers::json_body;
use crate::state::AppState;

/// Query key carrying a teacher id; may repeat.
const TEACHER_PARAM: &str = "teacher";

/// POST /api/register
pub async fn register_students(
    State(state): State<AppState>,
    payload: Result<Json<RegisterStudentsRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let request = json_body(payload)?;

    RosterService::new(state.store.as_ref())
        .register_students(&request)
        .await?;

    tracing::info!(
        teacher = %request.teacher,
        count = request.students.len(),
        "Students registered"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/suspend
pub async fn suspend_student(
    State(state): State<AppState>,
    payload: Result<Json<SuspendStudentRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let request = json_body(payload)?;

    RosterService::new(state.store.as_ref())
        .suspend_student(&request)
        .await?;

    tracing::info!(student = %request.student, "Student suspended");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/commonstudents?teacher=a&teacher=b
///
/// Returns students registered under every listed teacher.
pub async fn common_students(
    State(state): State<AppState>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(params) = params.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected query string");
        AppError::BadRequest("Invalid query string.".into())
    })?;

    let teachers: Vec<String> = params
        .into_iter()
        .filter(|(key, _)| key == TEACHER_PARAM)
        .map(|(_, value)| value)
        .collect();

    let response = RosterService::new(state.store.as_ref())
        .common_students(&teachers)
        .await?;

    Ok(Json(response))
}
