use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use utoipa_axum::router::OpenApiRouter;

use crate::{
    app_error::AppError,
    app_state::AppState,
    models::{ConsumerEntity, CreateConsumerEntity},
    routes::parse_id,
};

pub fn routes_with_openapi() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(utoipa_axum::routes!(get_consumer))
        .routes(utoipa_axum::routes!(get_consumer_by_username))
        .routes(utoipa_axum::routes!(register_consumer))
}

/// Fetch a consumer by id. Answers `null` when no consumer has that id.
#[utoipa::path(
    get,
    path = "/{id}",
    tags = ["Consumers"],
    params(
        ("id" = i32, Path, description = "Consumer ID to fetch")
    ),
    responses(
        (status = 200, description = "The consumer, or null", body = Option<ConsumerEntity>),
        (status = 500, description = "Store failure")
    )
)]
async fn get_consumer(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    const FAILED: &str = "We couldn't get the users at this time.";

    let id = parse_id(&id).map_err(AppError::lookup(FAILED))?;
    let consumer = state
        .consumers
        .find_by_id(id)
        .await
        .map_err(AppError::lookup(FAILED))?;

    Ok(Json(consumer))
}

#[utoipa::path(
    get,
    path = "/username/{username}",
    tags = ["Consumers"],
    params(
        ("username" = String, Path, description = "Exact username to look up")
    ),
    responses(
        (status = 200, description = "The consumer, or null", body = Option<ConsumerEntity>),
        (status = 500, description = "Store failure")
    )
)]
async fn get_consumer_by_username(
    Path(username): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let consumer = state
        .consumers
        .find_by_username(username)
        .await
        .map_err(AppError::lookup("We couldn't get the users at this time."))?;

    Ok(Json(consumer))
}

/// Register a new consumer. The username must be unused.
#[utoipa::path(
    post,
    path = "/register",
    tags = ["Consumers"],
    request_body = CreateConsumerEntity,
    responses(
        (status = 201, description = "Registered consumer", body = ConsumerEntity),
        (status = 500, description = "Username taken or store failure")
    )
)]
async fn register_consumer(
    State(state): State<AppState>,
    Json(body): Json<CreateConsumerEntity>,
) -> Result<impl IntoResponse, AppError> {
    let consumer = state
        .consumers
        .add_user(body)
        .await
        .map_err(AppError::lookup("We couldn't register the user at this time."))?;

    Ok((StatusCode::CREATED, Json(consumer)))
}
