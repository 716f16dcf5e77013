use diesel::{OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;
use futures::future::BoxFuture;

use crate::{app_error::StoreError, db::DbPool, models::CategoryEntity, schema::category};

pub trait CategoryRepository: Send + Sync {
    /// All categories. No ordering is promised.
    fn find(&self) -> BoxFuture<'_, Result<Vec<CategoryEntity>, StoreError>>;

    fn find_by_id(&self, id: i32) -> BoxFuture<'_, Result<Option<CategoryEntity>, StoreError>>;
}

#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: DbPool,
}

impl PgCategoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CategoryRepository for PgCategoryRepository {
    fn find(&self) -> BoxFuture<'_, Result<Vec<CategoryEntity>, StoreError>> {
        Box::pin(async move {
            let conn = &mut self.pool.get().await?;

            let categories = category::table
                .select(CategoryEntity::as_select())
                .load(conn)
                .await?;

            Ok(categories)
        })
    }

    fn find_by_id(&self, id: i32) -> BoxFuture<'_, Result<Option<CategoryEntity>, StoreError>> {
        Box::pin(async move {
            let conn = &mut self.pool.get().await?;

            let found = category::table
                .find(id)
                .select(CategoryEntity::as_select())
                .first(conn)
                .await
                .optional()?;

            Ok(found)
        })
    }
}
