//! Guest Model (registry entry)

use serde::{Deserialize, Serialize};

/// Guest entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Guest {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Unique when present
    pub phone: Option<String>,
    /// National id / passport number, unique when present
    pub nic: Option<String>,
    pub email: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create guest payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestCreate {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub nic: Option<String>,
    pub email: Option<String>,
}

/// Update guest payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub nic: Option<String>,
    pub email: Option<String>,
}
