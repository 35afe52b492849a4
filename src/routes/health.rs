use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthData {
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "OK", body = ApiResponse<HealthData>),
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<ApiResponse<HealthData>> {
    let data = HealthData {
        status: "ok".to_string(),
    };

    Json(ApiResponse::success(
        "Health check",
        data,
        Some(Meta::empty()),
    ))
}

#[utoipa::path(
    get,
    path = "/health/db",
    responses(
        (status = 200, description = "Database reachable", body = ApiResponse<HealthData>),
        (status = 500, description = "Database unreachable"),
    ),
    tag = "Health"
)]
pub async fn database_check(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<HealthData>>> {
    sqlx::query("SELECT 1").execute(&state.pool).await?;

    let data = HealthData {
        status: "ok".to_string(),
    };
    Ok(Json(ApiResponse::success(
        "Database check",
        data,
        Some(Meta::empty()),
    )))
}
