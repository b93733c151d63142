use axum::{
    routing::{delete, get, post},
    Router,
};

pub mod entries;
pub mod factors;
pub mod summary;
pub mod system;

/// Router for all session-scoped endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/entries", post(entries::add_entry).get(entries::list_entries))
        .route("/entries/:index", delete(entries::delete_entry))
        .route("/summary", get(summary::summary))
}
