//! Statistics API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::repository::statistics;
use crate::utils::AppResult;
use shared::models::FohStatistics;

/// GET /api/statistics
pub async fn overview(State(state): State<ServerState>) -> AppResult<Json<FohStatistics>> {
    let stats = statistics::overview(state.db.read()).await?;
    Ok(Json(stats))
}
