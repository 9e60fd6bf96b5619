use std::sync::Arc;

use classroom_core::store::RosterStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Storage collaborator (Postgres in production, in-memory in tests).
    pub store: Arc<dyn RosterStore>,
}
