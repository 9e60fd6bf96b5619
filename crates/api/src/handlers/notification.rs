//! Handler for notification recipient resolution.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use classroom_core::notification::{NotificationRequest, NotificationResolver};

use crate::error::AppResult;
use crate::handlers::json_body;
use crate::state::AppState;

/// POST /api/retrievefornotifications
///
/// Opts in every @-mentioned student, then returns the cleaned notification
/// and all non-suspended opted-in students of the teacher.
pub async fn retrieve_for_notifications(
    State(state): State<AppState>,
    payload: Result<Json<NotificationRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let request = json_body(payload)?;

    let result = NotificationResolver::new(state.store.as_ref())
        .retrieve_for_notification(&request)
        .await?;

    tracing::info!(
        teacher = %result.teacher,
        recipients = result.students.len(),
        "Notification recipients resolved"
    );

    Ok(Json(result))
}
