//! In-memory collaborators for driving the HTTP surface without Postgres,
//! the language model or any third-party API.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, DecodingKey, EncodingKey, Header};
use serde_json::{json, Value};
use uuid::Uuid;

use coinshop_service::application::cart_service::CartService;
use coinshop_service::application::order_service::OrderService;
use coinshop_service::application::user_service::UserService;
use coinshop_service::auth::AdminAuth;
use coinshop_service::config::AdminConfig;
use coinshop_service::domain::cart::{CartItemView, CategoryPrediction, EnrichedCartItem};
use coinshop_service::domain::catalog::{
    Availability, ExchangeRate, Product, ProductDetail, ProductPrice,
};
use coinshop_service::domain::errors::DomainError;
use coinshop_service::domain::order::{NewOrder, OrderItemView, OrderStatus, OrderView};
use coinshop_service::domain::ports::{
    CartRepository, CategoryClassifier, ExchangeRateSource, OrderNotifier, OrderRepository,
    ProductCatalog, UserRepository, WeightExtractor,
};
use coinshop_service::domain::shipping::ShippingRateTable;
use coinshop_service::domain::user::{NewUser, User};
use coinshop_service::domain::weight::WeightSpec;
use coinshop_service::state::AppState;

pub const ADMIN_PRIVY_ID: &str = "did:privy:admin";
const JWT_SECRET: &[u8] = b"integration-secret";

// ── Persistence ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryCarts {
    rows: Mutex<Vec<(String, CartItemView)>>,
}

impl InMemoryCarts {
    fn clear(&self, user_id: &str) {
        self.rows.lock().unwrap().retain(|(owner, _)| owner != user_id);
    }
}

impl CartRepository for InMemoryCarts {
    fn upsert_item(&self, user_id: &str, enriched: &EnrichedCartItem) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let item = &enriched.item;
        if let Some((_, row)) = rows
            .iter_mut()
            .find(|(owner, row)| owner == user_id && row.asin == item.asin)
        {
            row.quantity += item.quantity;
            return Ok(());
        }
        rows.push((
            user_id.to_string(),
            CartItemView {
                asin: item.asin.clone(),
                quantity: item.quantity,
                title: item.title.clone(),
                price: item.price.clone(),
                image_url: item.image_url.clone(),
                product_link: item.product_link.clone(),
                variant_asin: item.variant_asin.clone(),
                variant_dimensions: item.variant_dimensions.clone(),
                normalized_category: enriched.normalized_category.to_string(),
                weight_lb: enriched.weight_lb,
                shipping_fee: enriched.shipping_fee,
            },
        ));
        Ok(())
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<CartItemView>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| owner == user_id)
            .map(|(_, row)| row.clone())
            .collect())
    }

    fn set_quantity(&self, user_id: &str, asin: &str, quantity: i32) -> Result<(), DomainError> {
        for (owner, row) in self.rows.lock().unwrap().iter_mut() {
            if owner == user_id && row.asin == asin {
                row.quantity = quantity;
            }
        }
        Ok(())
    }

    fn remove_item(&self, user_id: &str, asin: &str) -> Result<(), DomainError> {
        self.rows
            .lock()
            .unwrap()
            .retain(|(owner, row)| !(owner == user_id && row.asin == asin));
        Ok(())
    }
}

/// Orders kept in memory; creating one empties the owner's cart like the
/// database transaction does.
pub struct InMemoryOrders {
    carts: Arc<InMemoryCarts>,
    orders: Mutex<Vec<OrderView>>,
}

impl OrderRepository for InMemoryOrders {
    fn create(&self, order: NewOrder) -> Result<Uuid, DomainError> {
        let id = Uuid::new_v4();
        self.carts.clear(&order.user_id);
        self.orders.lock().unwrap().push(OrderView {
            id,
            user_id: order.user_id,
            total_amount: order.total_amount,
            total_amount_usd: order.total_amount_usd,
            status: OrderStatus::Received,
            created_at: Utc::now(),
            items: order
                .items
                .into_iter()
                .map(|i| OrderItemView {
                    id: Uuid::new_v4(),
                    asin: i.asin,
                    quantity: i.quantity,
                    price: i.price,
                    title: i.title,
                    image_url: i.image_url,
                    product_link: i.product_link,
                    variant_asin: i.variant_asin,
                    variant_dimensions: i.variant_dimensions,
                })
                .collect(),
            full_name: order.full_name,
            street: order.street,
            postal_code: order.postal_code,
            phone: order.phone,
            delivery_instructions: order.delivery_instructions,
            shipping_guide: None,
            blockchain_order_id: order.blockchain_order_id,
        });
        Ok(id)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        Ok(self.orders.lock().unwrap().iter().find(|o| o.id == id).cloned())
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<OrderView>, DomainError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    fn list_all(&self) -> Result<Vec<OrderView>, DomainError> {
        Ok(self.orders.lock().unwrap().clone())
    }

    fn mark_shipped(&self, id: Uuid, shipping_guide: &str) -> Result<bool, DomainError> {
        let mut orders = self.orders.lock().unwrap();
        let Some(order) = orders.iter_mut().find(|o| o.id == id) else {
            return Ok(false);
        };
        order.status = OrderStatus::Shipped;
        order.shipping_guide = Some(shipping_guide.to_string());
        Ok(true)
    }

    fn total_amount(&self) -> Result<BigDecimal, DomainError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .map(|o| o.total_amount.clone())
            .sum())
    }
}

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
}

impl UserRepository for InMemoryUsers {
    fn find_by_privy_id(&self, privy_id: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.privy_id == privy_id)
            .cloned())
    }

    fn create(&self, user: NewUser) -> Result<Option<User>, DomainError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.privy_id == user.privy_id) {
            return Ok(None);
        }
        let created = User {
            id: Uuid::new_v4(),
            privy_id: user.privy_id,
            wallet_address: user.wallet_address,
            email: None,
            created_at: Utc::now(),
        };
        users.push(created.clone());
        Ok(Some(created))
    }

    fn update_email(&self, privy_id: &str, email: &str) -> Result<bool, DomainError> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.iter_mut().find(|u| u.privy_id == privy_id) else {
            return Ok(false);
        };
        user.email = Some(email.to_string());
        Ok(true)
    }

    fn count(&self) -> Result<i64, DomainError> {
        Ok(self.users.lock().unwrap().len() as i64)
    }
}

// ── External collaborators ───────────────────────────────────────────────────

/// Classifies by looking the category text up in a fixed table; unknown
/// text yields the empty prediction.
pub struct TableClassifier {
    pub table: Vec<(&'static str, &'static str)>,
}

#[async_trait]
impl CategoryClassifier for TableClassifier {
    async fn classify(&self, text: &str) -> CategoryPrediction {
        self.table
            .iter()
            .find(|(input, _)| *input == text)
            .map(|(_, label)| CategoryPrediction::new(*label))
            .unwrap_or_default()
    }
}

/// Reads `{"weight_value": .., "weight_unit": ..}` straight from the specs.
pub struct PassthroughExtractor;

#[async_trait]
impl WeightExtractor for PassthroughExtractor {
    async fn extract(&self, specifications: &Value) -> WeightSpec {
        serde_json::from_value(specifications.clone()).unwrap_or_else(|_| WeightSpec::missing())
    }
}

pub struct StubCatalog;

#[async_trait]
impl ProductCatalog for StubCatalog {
    async fn search(&self, query: &str) -> Result<Vec<Product>, DomainError> {
        Ok(vec![Product {
            asin: "B0SEARCH".to_string(),
            title: format!("Resultado para {query}"),
            price: ProductPrice {
                value: 199.0,
                currency: "MXN".to_string(),
                raw: "$199.00".to_string(),
            },
            image: String::new(),
            rating: Some(4.2),
            ratings_total: Some(10),
            link: "https://www.amazon.com.mx/dp/B0SEARCH".to_string(),
            brand: None,
            position: Some(1),
            is_sponsored: Some(false),
            is_prime: Some(true),
            fulfillment: None,
        }])
    }

    async fn details(&self, asin: &str) -> Result<ProductDetail, DomainError> {
        if asin == "B0DOWN" {
            return Err(DomainError::Upstream("search api returned 500".to_string()));
        }
        Ok(ProductDetail {
            asin: asin.to_string(),
            title: "Licuadora".to_string(),
            description: None,
            feature_bullets: vec![],
            variants: vec![],
            attributes: Default::default(),
            images: vec![],
            price: None,
            rating: None,
            ratings_total: None,
            link: String::new(),
            brand: None,
            availability: Availability {
                status: "Disponible".to_string(),
            },
        })
    }
}

pub struct StubExchangeRates(pub Option<ExchangeRate>);

#[async_trait]
impl ExchangeRateSource for StubExchangeRates {
    async fn latest(&self) -> Result<ExchangeRate, DomainError> {
        self.0
            .clone()
            .ok_or(DomainError::NotFound("Exchange rate data"))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<String>>,
}

#[async_trait]
impl OrderNotifier for RecordingNotifier {
    async fn notify(&self, message: &str) -> Result<(), DomainError> {
        self.messages.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

// ── Wiring ───────────────────────────────────────────────────────────────────

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub admin_auth: web::Data<AdminAuth>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn context(exchange_rate: Option<ExchangeRate>) -> TestContext {
    let carts = Arc::new(InMemoryCarts::default());
    let users = Arc::new(InMemoryUsers::default());
    let notifier = Arc::new(RecordingNotifier::default());

    let classifier = Arc::new(TableClassifier {
        table: vec![
            ("Electrónicos > Audio", "Electronics"),
            ("Libros", "Books"),
            ("Hecho a mano", "Independent Design items"),
        ],
    });

    let state = web::Data::new(AppState {
        carts: CartService::new(
            carts.clone(),
            classifier,
            Arc::new(PassthroughExtractor),
            ShippingRateTable::standard(),
        ),
        orders: OrderService::new(
            Arc::new(InMemoryOrders {
                carts,
                orders: Mutex::new(Vec::new()),
            }),
            users.clone(),
            Some(notifier.clone() as Arc<dyn OrderNotifier>),
            None,
        ),
        users: UserService::new(users),
        catalog: Arc::new(StubCatalog),
        exchange_rates: Arc::new(StubExchangeRates(exchange_rate)),
    });

    let admin_auth = web::Data::new(AdminAuth::new(
        Some(DecodingKey::from_secret(JWT_SECRET)),
        Algorithm::HS256,
        &AdminConfig {
            privy_id: Some(ADMIN_PRIVY_ID.to_string()),
            ..Default::default()
        },
    ));

    TestContext {
        state,
        admin_auth,
        notifier,
    }
}

pub fn bearer_for(sub: &str) -> String {
    let claims = json!({ "sub": sub, "exp": Utc::now().timestamp() + 3600 });
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(JWT_SECRET))
        .expect("token encodes");
    format!("Bearer {token}")
}
