use chrono::NaiveDate;
use diesel::{
    Selectable,
    prelude::{Identifiable, Insertable, Queryable},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// Consumers

#[derive(Queryable, Selectable, Identifiable, Serialize, Debug, Clone, PartialEq, ToSchema)]
#[diesel(table_name = crate::schema::consumer_user)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ConsumerEntity {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password: String,
    pub city_id: i32,
    pub state_id: i32,
}

#[derive(Insertable, Deserialize, Debug, Clone, ToSchema)]
#[diesel(table_name = crate::schema::consumer_user)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CreateConsumerEntity {
    pub username: String,
    pub email: String,
    pub password: String,
    pub city_id: i32,
    pub state_id: i32,
}

// Farms

/// Public projection of a farm row, without its location ids.
#[derive(Queryable, Selectable, Serialize, Debug, Clone, PartialEq, ToSchema)]
#[diesel(table_name = crate::schema::farm)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LocalFarmEntity {
    pub name: String,
    pub address: String,
    pub year_founded: Option<i32>,
    pub bio: Option<String>,
    pub id: i32,
}

// Orders

#[derive(Queryable, Selectable, Identifiable, Serialize, Debug, Clone, PartialEq, ToSchema)]
#[diesel(table_name = crate::schema::order)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderEntity {
    pub id: Uuid,
    pub shipping_address: String,
    pub purchase_date: NaiveDate,
    pub delivered: Option<bool>,
    pub consumer_id: i32,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::order)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CreateOrderEntity {
    pub id: Uuid,
    pub shipping_address: String,
    pub purchase_date: NaiveDate,
    pub delivered: Option<bool>,
    pub consumer_id: i32,
}

#[derive(Queryable, Selectable, Serialize, Debug, Clone, PartialEq, ToSchema)]
#[diesel(table_name = crate::schema::order_item)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemEntity {
    pub id: i32,
    pub order_id: Uuid,
    pub consumer_id: i32,
    pub farm_id: i32,
    pub produce_item_id: i32,
    pub quantity: i32,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::order_item)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CreateOrderItemEntity {
    pub order_id: Uuid,
    pub consumer_id: i32,
    pub farm_id: i32,
    pub produce_item_id: i32,
    pub quantity: i32,
}

/// An order together with the line items written in the same transaction.
#[derive(Debug, Clone)]
pub struct OrderWithItems {
    pub order: OrderEntity,
    pub items: Vec<OrderItemEntity>,
}

/// One purchased line of a consumer's order history.
#[derive(Queryable, Debug, Clone, PartialEq)]
pub struct OrderSummaryEntity {
    pub shipping_address: String,
    pub purchase_date: NaiveDate,
    pub delivered: Option<bool>,
    pub item_purchased: String,
    pub quantity: i32,
    pub seller: String,
}

/// Generates the id of a new order before anything is written.
///
/// Order items reference the order id inside the same transaction as the
/// order row, so the id cannot come from the store. UUID v7 ids embed a
/// millisecond timestamp and sort by creation time.
pub fn generate_order_id() -> Uuid {
    Uuid::now_v7()
}

// Categories

#[derive(Queryable, Selectable, Identifiable, Serialize, Debug, Clone, PartialEq, ToSchema)]
#[diesel(table_name = crate::schema::category)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoryEntity {
    pub id: i32,
    pub name: String,
}
