//! Employee Model (staff roster)

use serde::{Deserialize, Serialize};

/// Employee entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub name: String,
    /// Unique among employees
    pub email: String,
    pub department: String,
    pub position: Option<String>,
    pub salary: Option<f64>,
    /// `YYYY-MM-DD`
    pub hire_date: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub name: String,
    pub email: String,
    pub department: String,
    pub position: Option<String>,
    pub salary: Option<f64>,
    pub hire_date: Option<String>,
}

/// Update employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub salary: Option<f64>,
    pub hire_date: Option<String>,
    pub is_active: Option<bool>,
}
