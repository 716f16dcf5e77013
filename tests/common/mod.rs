#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use chrono::NaiveDate;
use farmstand_consumerservice::{
    app_error::StoreError,
    app_state::AppState,
    build_app,
    models::{
        CategoryEntity, ConsumerEntity, CreateConsumerEntity, CreateOrderEntity,
        CreateOrderItemEntity, LocalFarmEntity, OrderEntity, OrderItemEntity, OrderSummaryEntity,
        OrderWithItems,
    },
    repositories::{CategoryRepository, ConsumerRepository, OrderRepository},
};
use futures::future::BoxFuture;
use serde_json::Value;
use tower::ServiceExt;

pub struct Farm {
    pub id: i32,
    pub name: String,
    pub city_id: i32,
    pub state_id: i32,
}

pub struct Produce {
    pub id: i32,
    pub name: String,
}

#[derive(Default)]
struct Tables {
    consumers: Vec<ConsumerEntity>,
    farms: Vec<Farm>,
    produce: Vec<Produce>,
    orders: Vec<OrderEntity>,
    order_items: Vec<OrderItemEntity>,
    categories: Vec<CategoryEntity>,
}

/// In-memory stand-in for the PostgreSQL repositories.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    unreachable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn state(self: &Arc<Self>) -> AppState {
        AppState {
            consumers: self.clone(),
            orders: self.clone(),
            categories: self.clone(),
        }
    }

    pub fn app(self: &Arc<Self>) -> Router {
        build_app(self.state())
    }

    /// Every later call fails as if the database were down.
    pub fn go_offline(&self) {
        self.unreachable.store(true, Ordering::SeqCst);
    }

    pub fn add_consumer(&self, username: &str, city_id: i32, state_id: i32) -> ConsumerEntity {
        let mut tables = self.tables.lock().unwrap();
        let consumer = ConsumerEntity {
            id: tables.consumers.len() as i32 + 1,
            username: username.into(),
            email: format!("{username}@example.com"),
            password: "password".into(),
            city_id,
            state_id,
        };
        tables.consumers.push(consumer.clone());
        consumer
    }

    pub fn add_farm(&self, id: i32, name: &str, city_id: i32, state_id: i32) {
        self.tables.lock().unwrap().farms.push(Farm {
            id,
            name: name.into(),
            city_id,
            state_id,
        });
    }

    pub fn add_produce(&self, id: i32, name: &str) {
        self.tables.lock().unwrap().produce.push(Produce {
            id,
            name: name.into(),
        });
    }

    pub fn add_category(&self, id: i32, name: &str) {
        self.tables.lock().unwrap().categories.push(CategoryEntity {
            id,
            name: name.into(),
        });
    }

    pub fn orders(&self) -> Vec<OrderEntity> {
        self.tables.lock().unwrap().orders.clone()
    }

    pub fn order_items(&self) -> Vec<OrderItemEntity> {
        self.tables.lock().unwrap().order_items.clone()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                message: "connection refused".into(),
            });
        }
        Ok(())
    }
}

impl ConsumerRepository for MemoryStore {
    fn find_by_id(&self, id: i32) -> BoxFuture<'_, Result<Option<ConsumerEntity>, StoreError>> {
        Box::pin(async move {
            self.check()?;
            let tables = self.tables.lock().unwrap();
            Ok(tables.consumers.iter().find(|c| c.id == id).cloned())
        })
    }

    fn find_by_username(
        &self,
        username: String,
    ) -> BoxFuture<'_, Result<Option<ConsumerEntity>, StoreError>> {
        Box::pin(async move {
            self.check()?;
            let tables = self.tables.lock().unwrap();
            Ok(tables
                .consumers
                .iter()
                .find(|c| c.username == username)
                .cloned())
        })
    }

    fn orders_by_customer_id(
        &self,
        id: i32,
    ) -> BoxFuture<'_, Result<Vec<OrderSummaryEntity>, StoreError>> {
        Box::pin(async move {
            self.check()?;
            let guard = self.tables.lock().unwrap();
            let tables: &Tables = &guard;
            let mut rows: Vec<OrderSummaryEntity> = tables
                .orders
                .iter()
                .filter(|o| o.consumer_id == id)
                .flat_map(|o| {
                    tables
                        .order_items
                        .iter()
                        .filter(move |i| i.order_id == o.id)
                        .filter_map(move |i| {
                            let farm = tables.farms.iter().find(|f| f.id == i.farm_id)?;
                            let produce =
                                tables.produce.iter().find(|p| p.id == i.produce_item_id)?;
                            Some(OrderSummaryEntity {
                                shipping_address: o.shipping_address.clone(),
                                purchase_date: o.purchase_date,
                                delivered: o.delivered,
                                item_purchased: produce.name.clone(),
                                quantity: i.quantity,
                                seller: farm.name.clone(),
                            })
                        })
                })
                .collect();
            rows.sort_by(|a, b| b.purchase_date.cmp(&a.purchase_date));
            Ok(rows)
        })
    }

    fn find_local_farms(
        &self,
        city_id: i32,
        state_id: i32,
    ) -> BoxFuture<'_, Result<Vec<LocalFarmEntity>, StoreError>> {
        Box::pin(async move {
            self.check()?;
            let tables = self.tables.lock().unwrap();
            Ok(tables
                .farms
                .iter()
                .filter(|f| f.city_id == city_id && f.state_id == state_id)
                .map(|f| LocalFarmEntity {
                    name: f.name.clone(),
                    address: format!("{} Farm Rd.", f.id),
                    year_founded: Some(1900 + f.id),
                    bio: None,
                    id: f.id,
                })
                .collect())
        })
    }

    fn add_user(
        &self,
        data: CreateConsumerEntity,
    ) -> BoxFuture<'_, Result<ConsumerEntity, StoreError>> {
        Box::pin(async move {
            self.check()?;
            let mut tables = self.tables.lock().unwrap();
            if tables.consumers.iter().any(|c| c.username == data.username) {
                return Err(StoreError::ConstraintViolation {
                    message: "duplicate key value violates unique constraint".into(),
                    constraint: Some("consumer_user_username_key".into()),
                });
            }
            let consumer = ConsumerEntity {
                id: tables.consumers.len() as i32 + 1,
                username: data.username,
                email: data.email,
                password: data.password,
                city_id: data.city_id,
                state_id: data.state_id,
            };
            tables.consumers.push(consumer.clone());
            Ok(consumer)
        })
    }
}

impl OrderRepository for MemoryStore {
    fn add(
        &self,
        order_details: CreateOrderEntity,
        order_items: Vec<CreateOrderItemEntity>,
    ) -> BoxFuture<'_, Result<OrderWithItems, StoreError>> {
        Box::pin(async move {
            self.check()?;
            let mut tables = self.tables.lock().unwrap();
            if tables.orders.iter().any(|o| o.id == order_details.id) {
                return Err(StoreError::ConstraintViolation {
                    message: "duplicate key value violates unique constraint".into(),
                    constraint: Some("order_pkey".into()),
                });
            }

            let order = OrderEntity {
                id: order_details.id,
                shipping_address: order_details.shipping_address,
                purchase_date: order_details.purchase_date,
                delivered: order_details.delivered,
                consumer_id: order_details.consumer_id,
            };
            let first_id = tables.order_items.len() as i32 + 1;
            let items: Vec<OrderItemEntity> = order_items
                .into_iter()
                .enumerate()
                .map(|(n, item)| OrderItemEntity {
                    id: first_id + n as i32,
                    order_id: item.order_id,
                    consumer_id: item.consumer_id,
                    farm_id: item.farm_id,
                    produce_item_id: item.produce_item_id,
                    quantity: item.quantity,
                })
                .collect();

            tables.orders.push(order.clone());
            tables.order_items.extend(items.iter().cloned());
            Ok(OrderWithItems { order, items })
        })
    }

    fn find_by_customer_id(
        &self,
        consumer_id: i32,
    ) -> BoxFuture<'_, Result<Vec<OrderEntity>, StoreError>> {
        Box::pin(async move {
            self.check()?;
            let tables = self.tables.lock().unwrap();
            let mut orders: Vec<OrderEntity> = tables
                .orders
                .iter()
                .filter(|o| o.consumer_id == consumer_id)
                .cloned()
                .collect();
            orders.sort_by(|a, b| b.purchase_date.cmp(&a.purchase_date));
            Ok(orders)
        })
    }
}

impl CategoryRepository for MemoryStore {
    fn find(&self) -> BoxFuture<'_, Result<Vec<CategoryEntity>, StoreError>> {
        Box::pin(async move {
            self.check()?;
            Ok(self.tables.lock().unwrap().categories.clone())
        })
    }

    fn find_by_id(&self, id: i32) -> BoxFuture<'_, Result<Option<CategoryEntity>, StoreError>> {
        Box::pin(async move {
            self.check()?;
            let tables = self.tables.lock().unwrap();
            Ok(tables.categories.iter().find(|c| c.id == id).cloned())
        })
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, req).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}
