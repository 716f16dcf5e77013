//! Consumer-facing API of the farm marketplace: consumer lookup, local farm
//! discovery, order placement and history, and category browsing.

pub mod app_error;
pub mod app_state;
pub mod bootstrap;
pub mod config;
pub mod db;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod schema;
pub mod swagger;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Builds the complete HTTP application, documentation included.
pub fn build_app(state: AppState) -> Router {
    let (router, mut openapi) = routes::routes_with_openapi().split_for_parts();
    openapi.info = utoipa::openapi::InfoBuilder::new()
        .title("Farmstand ConsumerService API")
        .version("1.0.0")
        .build();

    router
        .merge(swagger::create_swagger_ui(openapi))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
