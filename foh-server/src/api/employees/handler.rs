//! Staff Roster API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::employee;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};

/// GET /api/employees
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Employee>>> {
    let employees = employee::find_all(state.db.read()).await?;
    Ok(Json(employees))
}

/// GET /api/employees/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Employee>> {
    let employee = employee::find_by_id(state.db.read(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {id} not found")))?;
    Ok(Json(employee))
}

/// GET /api/employees/email/{email}
pub async fn get_by_email(
    State(state): State<ServerState>,
    Path(email): Path<String>,
) -> AppResult<Json<Employee>> {
    let employee = employee::find_by_email(state.db.read(), &email)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee with email {email} not found")))?;
    Ok(Json(employee))
}

/// GET /api/employees/department/{department}
pub async fn list_by_department(
    State(state): State<ServerState>,
    Path(department): Path<String>,
) -> AppResult<Json<Vec<Employee>>> {
    let employees = employee::find_by_department(state.db.read(), &department).await?;
    Ok(Json(employees))
}

/// POST /api/employees
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<Json<Employee>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&payload.department, "department", MAX_SHORT_TEXT_LEN)?;
    let employee = employee::create(state.db.write(), payload).await?;
    Ok(Json(employee))
}

/// PUT /api/employees/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<Employee>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(email) = &payload.email {
        validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    }
    let employee = employee::update(state.db.write(), id, payload).await?;
    Ok(Json(employee))
}

/// DELETE /api/employees/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = employee::delete(state.db.write(), id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Employee {id} not found")));
    }
    Ok(Json(true))
}
