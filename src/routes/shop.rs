use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use utoipa_axum::router::OpenApiRouter;

use crate::{
    app_error::{AppError, StoreError},
    app_state::AppState,
    models::CategoryEntity,
    routes::parse_id,
};

// Both routes answer 200 on failure, with the store error as the body.

pub fn routes_with_openapi() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(utoipa_axum::routes!(get_category))
        .routes(utoipa_axum::routes!(get_categories))
}

#[utoipa::path(
    get,
    path = "/shop/category/{id}",
    tags = ["Shop"],
    params(
        ("id" = i32, Path, description = "Category ID to fetch")
    ),
    responses(
        (status = 200, description = "The category, null, or the store error", body = Option<CategoryEntity>)
    )
)]
async fn get_category(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id).map_err(AppError::Legacy)?;
    let category = state
        .categories
        .find_by_id(id)
        .await
        .map_err(AppError::Legacy)?;

    Ok(Json(category))
}

#[utoipa::path(
    get,
    path = "/shop/categories",
    tags = ["Shop"],
    responses(
        (status = 200, description = "All categories, or the store error", body = Vec<CategoryEntity>),
        (status = "default", description = "Store error, still sent with status 200", body = StoreError)
    )
)]
async fn get_categories(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let categories = state.categories.find().await.map_err(AppError::Legacy)?;

    Ok(Json(categories))
}
