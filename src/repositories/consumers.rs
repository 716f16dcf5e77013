use diesel::{ExpressionMethods, JoinOnDsl, OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;
use futures::future::BoxFuture;
use tracing::info;

use crate::{
    app_error::StoreError,
    db::DbPool,
    models::{ConsumerEntity, CreateConsumerEntity, LocalFarmEntity, OrderSummaryEntity},
    schema::{consumer_user, farm, order, order_item, produce_item},
};

// Shared by the repository and the SQL tests below.

/// Purchased lines of one consumer's orders, most recent purchase first.
macro_rules! order_history_query {
    ($consumer_id:expr) => {
        order::table
            .inner_join(order_item::table.on(order_item::order_id.eq(order::id)))
            .inner_join(farm::table.on(farm::id.eq(order_item::farm_id)))
            .inner_join(produce_item::table.on(produce_item::id.eq(order_item::produce_item_id)))
            .filter(order::consumer_id.eq($consumer_id))
            .select((
                order::shipping_address,
                order::purchase_date,
                order::delivered,
                produce_item::name,
                order_item::quantity,
                farm::name,
            ))
            .order_by(order::purchase_date.desc())
    };
}

macro_rules! local_farms_query {
    ($city_id:expr, $state_id:expr) => {
        farm::table
            .filter(farm::city_id.eq($city_id))
            .filter(farm::state_id.eq($state_id))
            .select(LocalFarmEntity::as_select())
    };
}

pub trait ConsumerRepository: Send + Sync {
    fn find_by_id(&self, id: i32) -> BoxFuture<'_, Result<Option<ConsumerEntity>, StoreError>>;

    fn find_by_username(
        &self,
        username: String,
    ) -> BoxFuture<'_, Result<Option<ConsumerEntity>, StoreError>>;

    /// Every purchased line of a consumer's orders, most recent purchase first.
    fn orders_by_customer_id(
        &self,
        id: i32,
    ) -> BoxFuture<'_, Result<Vec<OrderSummaryEntity>, StoreError>>;

    /// Farms registered in exactly this city and state.
    fn find_local_farms(
        &self,
        city_id: i32,
        state_id: i32,
    ) -> BoxFuture<'_, Result<Vec<LocalFarmEntity>, StoreError>>;

    fn add_user(
        &self,
        data: CreateConsumerEntity,
    ) -> BoxFuture<'_, Result<ConsumerEntity, StoreError>>;
}

#[derive(Clone)]
pub struct PgConsumerRepository {
    pool: DbPool,
}

impl PgConsumerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ConsumerRepository for PgConsumerRepository {
    fn find_by_id(&self, id: i32) -> BoxFuture<'_, Result<Option<ConsumerEntity>, StoreError>> {
        Box::pin(async move {
            let conn = &mut self.pool.get().await?;

            let consumer = consumer_user::table
                .find(id)
                .select(ConsumerEntity::as_select())
                .first(conn)
                .await
                .optional()?;

            Ok(consumer)
        })
    }

    fn find_by_username(
        &self,
        username: String,
    ) -> BoxFuture<'_, Result<Option<ConsumerEntity>, StoreError>> {
        Box::pin(async move {
            let conn = &mut self.pool.get().await?;

            let consumer = consumer_user::table
                .filter(consumer_user::username.eq(username))
                .select(ConsumerEntity::as_select())
                .first(conn)
                .await
                .optional()?;

            Ok(consumer)
        })
    }

    fn orders_by_customer_id(
        &self,
        id: i32,
    ) -> BoxFuture<'_, Result<Vec<OrderSummaryEntity>, StoreError>> {
        Box::pin(async move {
            let conn = &mut self.pool.get().await?;

            let summaries = order_history_query!(id)
                .load::<OrderSummaryEntity>(conn)
                .await?;

            Ok(summaries)
        })
    }

    fn find_local_farms(
        &self,
        city_id: i32,
        state_id: i32,
    ) -> BoxFuture<'_, Result<Vec<LocalFarmEntity>, StoreError>> {
        Box::pin(async move {
            let conn = &mut self.pool.get().await?;

            let farms = local_farms_query!(city_id, state_id)
                .load(conn)
                .await?;

            Ok(farms)
        })
    }

    fn add_user(
        &self,
        data: CreateConsumerEntity,
    ) -> BoxFuture<'_, Result<ConsumerEntity, StoreError>> {
        Box::pin(async move {
            let conn = &mut self.pool.get().await?;

            let consumer = diesel::insert_into(consumer_user::table)
                .values(&data)
                .returning(ConsumerEntity::as_returning())
                .get_result(conn)
                .await?;

            info!("Consumer #{} registered as {}", consumer.id, consumer.username);

            Ok(consumer)
        })
    }
}
