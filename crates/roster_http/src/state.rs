//! Shared application state.
//!
//! # Invariants
//! - Exactly one SQLite connection backs the process; access is serialized
//!   through a mutex and runs on the blocking thread pool.
//! - Repository and service are built per call and never outlive the lock.
//! - A call that panicked while holding the lock does not block later calls.

use crate::error::{ApiError, ApiResult};
use log::warn;
use roster_core::{EmployeeService, ServiceResult, SqliteEmployeeRepository};
use rusqlite::Connection;
use std::sync::{Arc, Mutex, PoisonError};

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps a connection returned by `roster_core::db::open_db*`.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs `op` against a freshly built service on the blocking pool.
    pub async fn with_service<T, F>(&self, op: F) -> ApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&EmployeeService<SqliteEmployeeRepository<'_>>) -> ServiceResult<T>
            + Send
            + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().unwrap_or_else(|poisoned| {
                warn!("event=db_lock module=http status=recovered reason=poisoned");
                PoisonError::into_inner(poisoned)
            });
            let service = EmployeeService::new(SqliteEmployeeRepository::new(&guard));
            op(&service).map_err(ApiError::from)
        })
        .await
        .map_err(|err| ApiError::Internal(format!("blocking task failed: {err}")))?
    }
}
