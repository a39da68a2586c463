//! Employee API handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roster_core::{Employee, EmployeeId};

use crate::error::ApiResult;
use crate::state::AppState;

/// Create an employee. Any `id` in the body is ignored.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<Employee>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    let employee = state
        .with_service(move |service| service.save_employee(&payload))
        .await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// List all employees.
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Employee>>> {
    let employees = state
        .with_service(|service| service.get_all_employees())
        .await?;
    Ok(Json(employees))
}

/// Get one employee; 404 with an empty body when absent.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
) -> ApiResult<Response> {
    let employee = state
        .with_service(move |service| service.get_employee(id))
        .await?;
    Ok(match employee {
        Some(employee) => Json(employee).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}

/// Overwrite first name, last name and email of an employee.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
    Json(payload): Json<Employee>,
) -> ApiResult<Json<Employee>> {
    let employee = state
        .with_service(move |service| service.update_employee(id, &payload))
        .await?;
    Ok(Json(employee))
}

/// Delete an employee. Absent ids still answer 200.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
) -> ApiResult<String> {
    state
        .with_service(move |service| service.delete_employee(id))
        .await?;
    Ok(format!("Employee with id {id} deleted successfully"))
}
