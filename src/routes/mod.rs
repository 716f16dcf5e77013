pub mod consumers;
pub mod farms;
pub mod orders;
pub mod shop;

use utoipa_axum::router::OpenApiRouter;

use crate::{app_error::StoreError, app_state::AppState};

/// Every consumer-facing route, nested under `/api/consumers`.
pub fn routes_with_openapi() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().nest(
        "/api/consumers",
        consumers::routes_with_openapi()
            .merge(orders::routes_with_openapi())
            .merge(farms::routes_with_openapi())
            .merge(shop::routes_with_openapi()),
    )
}

/// Parses a numeric path segment.
///
/// Ids are not validated up front. A segment that is not an integer fails the
/// same way the store would fail on it.
pub(crate) fn parse_id(raw: &str) -> Result<i32, StoreError> {
    raw.parse().map_err(|_| StoreError::QueryFailure {
        message: format!("invalid input syntax for type integer: \"{raw}\""),
    })
}
