use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

use crate::{
    app_error::AppError,
    app_state::AppState,
    models::{
        CreateOrderEntity, CreateOrderItemEntity, OrderEntity, OrderItemEntity,
        OrderSummaryEntity, generate_order_id,
    },
    routes::parse_id,
};

pub fn routes_with_openapi() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(utoipa_axum::routes!(get_orders))
        .routes(utoipa_axum::routes!(get_order_history))
        .routes(utoipa_axum::routes!(create_order))
}

/// The store keeps `delivered` nullable. Only an explicit `true` counts.
fn is_delivered(delivered: Option<bool>) -> bool {
    matches!(delivered, Some(true))
}

#[derive(Serialize, Debug, PartialEq, ToSchema)]
pub struct OrderRes {
    pub id: Uuid,
    pub shipping_address: String,
    pub purchase_date: NaiveDate,
    pub delivered: bool,
    pub consumer_id: i32,
}

impl From<OrderEntity> for OrderRes {
    fn from(order: OrderEntity) -> Self {
        Self {
            id: order.id,
            shipping_address: order.shipping_address,
            purchase_date: order.purchase_date,
            delivered: is_delivered(order.delivered),
            consumer_id: order.consumer_id,
        }
    }
}

#[derive(Serialize, Debug, PartialEq, ToSchema)]
pub struct OrderSummaryRes {
    pub shipping_address: String,
    pub purchase_date: NaiveDate,
    pub delivered: bool,
    pub item_purchased: String,
    pub quantity: i32,
    pub seller: String,
}

impl From<OrderSummaryEntity> for OrderSummaryRes {
    fn from(summary: OrderSummaryEntity) -> Self {
        Self {
            shipping_address: summary.shipping_address,
            purchase_date: summary.purchase_date,
            delivered: is_delivered(summary.delivered),
            item_purchased: summary.item_purchased,
            quantity: summary.quantity,
            seller: summary.seller,
        }
    }
}

/// Fetch every order placed by a consumer.
#[utoipa::path(
    get,
    path = "/{id}/orders",
    tags = ["Orders"],
    params(
        ("id" = i32, Path, description = "Consumer ID whose orders to fetch")
    ),
    responses(
        (status = 200, description = "Orders, most recent purchase first", body = Vec<OrderRes>),
        (status = 500, description = "Store failure")
    )
)]
async fn get_orders(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    const FAILED: &str = "We couldn't get your orders at this time.";

    let id = parse_id(&id).map_err(AppError::lookup(FAILED))?;
    let orders: Vec<OrderRes> = state
        .orders
        .find_by_customer_id(id)
        .await
        .map_err(AppError::lookup(FAILED))?
        .into_iter()
        .map(OrderRes::from)
        .collect();

    Ok(Json(orders))
}

/// Fetch a consumer's purchase history, one row per purchased item.
#[utoipa::path(
    get,
    path = "/{id}/order-history",
    tags = ["Orders"],
    params(
        ("id" = i32, Path, description = "Consumer ID whose history to fetch")
    ),
    responses(
        (status = 200, description = "Purchased items, most recent first", body = Vec<OrderSummaryRes>),
        (status = 500, description = "Store failure")
    )
)]
async fn get_order_history(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    const FAILED: &str = "We couldn't get your orders at this time.";

    let id = parse_id(&id).map_err(AppError::lookup(FAILED))?;
    let history: Vec<OrderSummaryRes> = state
        .consumers
        .orders_by_customer_id(id)
        .await
        .map_err(AppError::lookup(FAILED))?
        .into_iter()
        .map(OrderSummaryRes::from)
        .collect();

    Ok(Json(history))
}

#[derive(Deserialize, ToSchema)]
struct CreateOrderReq {
    shipping_address: String,
    purchase_date: NaiveDate,
    #[serde(default)]
    delivered: Option<bool>,
    #[serde(default)]
    order_items: Vec<CreateOrderReqItem>,
}

#[derive(Deserialize, ToSchema)]
struct CreateOrderReqItem {
    farm_id: i32,
    produce_item_id: i32,
    quantity: i32,
}

#[derive(Serialize, ToSchema)]
struct PlacedOrderRes {
    #[serde(flatten)]
    order: OrderRes,
    order_items: Vec<OrderItemEntity>,
}

#[derive(Serialize, ToSchema)]
struct CreateOrderRes {
    order: PlacedOrderRes,
}

/// Place an order for a consumer.
///
/// The order id is generated here, and every item is stamped with it and with
/// the consumer id from the path.
#[utoipa::path(
    post,
    path = "/order/{id}",
    tags = ["Orders"],
    params(
        ("id" = i32, Path, description = "Consumer ID placing the order")
    ),
    request_body = CreateOrderReq,
    responses(
        (status = 201, description = "Order placed", body = CreateOrderRes),
        (status = 500, description = "Order rejected by the store")
    )
)]
async fn create_order(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<CreateOrderReq>,
) -> Result<impl IntoResponse, AppError> {
    let consumer_id = parse_id(&id).map_err(AppError::OrderRejected)?;
    let order_id = generate_order_id();

    let order_items = body
        .order_items
        .into_iter()
        .map(|item| CreateOrderItemEntity {
            order_id,
            consumer_id,
            farm_id: item.farm_id,
            produce_item_id: item.produce_item_id,
            quantity: item.quantity,
        })
        .collect();

    let order_details = CreateOrderEntity {
        id: order_id,
        shipping_address: body.shipping_address,
        purchase_date: body.purchase_date,
        delivered: body.delivered,
        consumer_id,
    };

    let placed = state
        .orders
        .add(order_details, order_items)
        .await
        .map_err(AppError::OrderRejected)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderRes {
            order: PlacedOrderRes {
                order: placed.order.into(),
                order_items: placed.items,
            },
        }),
    ))
}
