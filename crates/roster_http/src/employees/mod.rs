//! Employee API module.

mod handler;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Employee routes: collection at `/employees`, items at `/employees/{id}`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/employees", get(handler::list).post(handler::create))
        .route(
            "/employees/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
