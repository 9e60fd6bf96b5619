pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{notification, roster};
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// POST /register                    register students under a teacher
/// GET  /commonstudents              students common to all given teachers
/// POST /suspend                     suspend a student
/// POST /retrievefornotifications    resolve notification recipients
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(roster::register_students))
        .route("/commonstudents", get(roster::common_students))
        .route("/suspend", post(roster::suspend_student))
        .route(
            "/retrievefornotifications",
            post(notification::retrieve_for_notifications),
        )
}
