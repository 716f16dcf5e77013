use std::sync::Arc;

use crate::{
    db::DbPool,
    repositories::{
        CategoryRepository, ConsumerRepository, OrderRepository, PgCategoryRepository,
        PgConsumerRepository, PgOrderRepository,
    },
};

/// Repositories shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub consumers: Arc<dyn ConsumerRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub categories: Arc<dyn CategoryRepository>,
}

impl AppState {
    /// Wires the PostgreSQL repositories onto one connection pool.
    pub fn from_pool(pool: DbPool) -> Self {
        Self {
            consumers: Arc::new(PgConsumerRepository::new(pool.clone())),
            orders: Arc::new(PgOrderRepository::new(pool.clone())),
            categories: Arc::new(PgCategoryRepository::new(pool)),
        }
    }
}
