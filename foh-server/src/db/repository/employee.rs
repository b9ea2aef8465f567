//! Employee Repository

use super::{RepoError, RepoResult};
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};
use sqlx::SqlitePool;

const EMPLOYEE_SELECT: &str = "SELECT id, name, email, department, position, salary, hire_date, is_active, created_at, updated_at FROM employee";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Employee>> {
    let sql = format!("{EMPLOYEE_SELECT} WHERE is_active = 1 ORDER BY name");
    let employees = sqlx::query_as::<_, Employee>(&sql).fetch_all(pool).await?;
    Ok(employees)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Employee>> {
    let sql = format!("{EMPLOYEE_SELECT} WHERE id = ?");
    let employee = sqlx::query_as::<_, Employee>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(employee)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<Employee>> {
    let sql = format!("{EMPLOYEE_SELECT} WHERE email = ? LIMIT 1");
    let employee = sqlx::query_as::<_, Employee>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(employee)
}

pub async fn find_by_department(pool: &SqlitePool, department: &str) -> RepoResult<Vec<Employee>> {
    let sql = format!(
        "{EMPLOYEE_SELECT} WHERE department = ? COLLATE NOCASE AND is_active = 1 ORDER BY name"
    );
    let employees = sqlx::query_as::<_, Employee>(&sql)
        .bind(department)
        .fetch_all(pool)
        .await?;
    Ok(employees)
}

pub async fn create(pool: &SqlitePool, data: EmployeeCreate) -> RepoResult<Employee> {
    if find_by_email(pool, &data.email).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Employee with email {} already exists",
            data.email
        )));
    }

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO employee (id, name, email, department, position, salary, hire_date, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1, ?8, ?8)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.department)
    .bind(&data.position)
    .bind(data.salary)
    .bind(&data.hire_date)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create employee".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: EmployeeUpdate) -> RepoResult<Employee> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")))?;

    if let Some(email) = &data.email {
        if email != &existing.email && find_by_email(pool, email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Employee with email {email} already exists"
            )));
        }
    }

    let now = shared::util::now_millis();
    sqlx::query(
        "UPDATE employee SET name = COALESCE(?1, name), email = COALESCE(?2, email), department = COALESCE(?3, department), position = COALESCE(?4, position), salary = COALESCE(?5, salary), hire_date = COALESCE(?6, hire_date), is_active = COALESCE(?7, is_active), updated_at = ?8 WHERE id = ?9",
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.department)
    .bind(&data.position)
    .bind(data.salary)
    .bind(&data.hire_date)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM employee WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
