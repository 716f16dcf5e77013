use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use utoipa_axum::router::OpenApiRouter;

use crate::{app_error::AppError, app_state::AppState, models::LocalFarmEntity, routes::parse_id};

pub fn routes_with_openapi() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(utoipa_axum::routes!(get_local_farms))
}

/// Fetch the farms located in a consumer's city and state.
#[utoipa::path(
    get,
    path = "/farms/{city_id}/{state_id}",
    tags = ["Farms"],
    params(
        ("city_id" = i32, Path, description = "City ID"),
        ("state_id" = i32, Path, description = "State ID")
    ),
    responses(
        (status = 200, description = "Farms in that city and state", body = Vec<LocalFarmEntity>),
        (status = 500, description = "Store failure")
    )
)]
async fn get_local_farms(
    Path((city_id, state_id)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    const FAILED: &str = "We couldn't get the farms at this time.";

    let city_id = parse_id(&city_id).map_err(AppError::lookup(FAILED))?;
    let state_id = parse_id(&state_id).map_err(AppError::lookup(FAILED))?;

    let farms = state
        .consumers
        .find_local_farms(city_id, state_id)
        .await
        .map_err(AppError::lookup(FAILED))?;

    Ok(Json(farms))
}
