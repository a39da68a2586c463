//! HTTP surface for the Roster employee directory.
//!
//! # Responsibility
//! - Map `/employees` routes onto `EmployeeService` calls.
//! - Translate service outcomes into HTTP status codes.
//!
//! # Invariants
//! - Handlers never touch SQL; they only call the service layer.
//! - Every request passes through the request logging middleware.

pub mod employees;
pub mod error;
pub mod health;
pub mod middleware;
pub mod state;

use axum::Router;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Builds the full application router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(employees::router())
        .layer(axum::middleware::from_fn(middleware::request_logging))
        .with_state(state)
}
