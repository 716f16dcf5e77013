use diesel::{ExpressionMethods, QueryDsl, SelectableHelper};
use diesel_async::{AsyncConnection, RunQueryDsl};
use futures::future::BoxFuture;
use tracing::info;

use crate::{
    app_error::StoreError,
    db::DbPool,
    models::{
        CreateOrderEntity, CreateOrderItemEntity, OrderEntity, OrderItemEntity, OrderWithItems,
    },
    schema::{order, order_item},
};

// Shared by the repository and the SQL tests below.

macro_rules! insert_order_query {
    ($details:expr) => {
        diesel::insert_into(order::table)
            .values($details)
            .returning(OrderEntity::as_returning())
    };
}

macro_rules! insert_order_items_query {
    ($items:expr) => {
        diesel::insert_into(order_item::table)
            .values($items)
            .returning(OrderItemEntity::as_returning())
    };
}

macro_rules! orders_by_consumer_query {
    ($consumer_id:expr) => {
        order::table
            .filter(order::consumer_id.eq($consumer_id))
            .order_by(order::purchase_date.desc())
            .select(OrderEntity::as_select())
    };
}

pub trait OrderRepository: Send + Sync {
    /// Writes the order and its items as one unit. Either every row is stored
    /// or none is.
    fn add(
        &self,
        order_details: CreateOrderEntity,
        order_items: Vec<CreateOrderItemEntity>,
    ) -> BoxFuture<'_, Result<OrderWithItems, StoreError>>;

    /// Orders placed by a consumer, most recent purchase first.
    fn find_by_customer_id(
        &self,
        consumer_id: i32,
    ) -> BoxFuture<'_, Result<Vec<OrderEntity>, StoreError>>;
}

#[derive(Clone)]
pub struct PgOrderRepository {
    pool: DbPool,
}

impl PgOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for PgOrderRepository {
    fn add(
        &self,
        order_details: CreateOrderEntity,
        order_items: Vec<CreateOrderItemEntity>,
    ) -> BoxFuture<'_, Result<OrderWithItems, StoreError>> {
        Box::pin(async move {
            let conn = &mut self.pool.get().await?;

            let placed = conn
                .transaction(move |tx| {
                    Box::pin(async move {
                        let order: OrderEntity = insert_order_query!(&order_details)
                            .get_result(tx)
                            .await?;

                        let items: Vec<OrderItemEntity> = if order_items.is_empty() {
                            Vec::new()
                        } else {
                            insert_order_items_query!(&order_items)
                                .get_results(tx)
                                .await?
                        };

                        Ok::<OrderWithItems, StoreError>(OrderWithItems { order, items })
                    })
                })
                .await?;

            info!(
                "Order {} placed by consumer #{} with {} item(s)",
                placed.order.id,
                placed.order.consumer_id,
                placed.items.len()
            );

            Ok(placed)
        })
    }

    fn find_by_customer_id(
        &self,
        consumer_id: i32,
    ) -> BoxFuture<'_, Result<Vec<OrderEntity>, StoreError>> {
        Box::pin(async move {
            let conn = &mut self.pool.get().await?;

            let orders = orders_by_consumer_query!(consumer_id)
                .load(conn)
                .await?;

            Ok(orders)
        })
    }
}
