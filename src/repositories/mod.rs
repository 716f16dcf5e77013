//! Data access for the marketplace tables.
//!
//! Each repository is a trait so handlers can be driven without a database.
//! The `Pg*` implementations share one connection pool and check a connection
//! out per call.

pub mod categories;
pub mod consumers;
pub mod orders;

pub use categories::{CategoryRepository, PgCategoryRepository};
pub use consumers::{ConsumerRepository, PgConsumerRepository};
pub use orders::{OrderRepository, PgOrderRepository};
