use async_trait::async_trait;
use bigdecimal::BigDecimal;
use serde_json::Value;
use uuid::Uuid;

use super::cart::{CartItemView, CategoryPrediction, EnrichedCartItem};
use super::catalog::{ExchangeRate, Product, ProductDetail};
use super::errors::DomainError;
use super::order::{NewOrder, OrderView};
use super::user::{NewUser, User};
use super::weight::WeightSpec;

// ── Persistence (blocking) ───────────────────────────────────────────────────

pub trait CartRepository: Send + Sync + 'static {
    /// Insert the line item, or add its quantity to the existing row for the
    /// same (user, asin). Must be a single atomic operation.
    fn upsert_item(&self, user_id: &str, item: &EnrichedCartItem) -> Result<(), DomainError>;
    fn list_for_user(&self, user_id: &str) -> Result<Vec<CartItemView>, DomainError>;
    fn set_quantity(&self, user_id: &str, asin: &str, quantity: i32) -> Result<(), DomainError>;
    fn remove_item(&self, user_id: &str, asin: &str) -> Result<(), DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Store the order and its items and empty the user's cart, atomically.
    fn create(&self, order: NewOrder) -> Result<Uuid, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError>;
    fn list_for_user(&self, user_id: &str) -> Result<Vec<OrderView>, DomainError>;
    fn list_all(&self) -> Result<Vec<OrderView>, DomainError>;
    /// Returns `false` when no order has the given id.
    fn mark_shipped(&self, id: Uuid, shipping_guide: &str) -> Result<bool, DomainError>;
    fn total_amount(&self) -> Result<BigDecimal, DomainError>;
}

pub trait UserRepository: Send + Sync + 'static {
    fn find_by_privy_id(&self, privy_id: &str) -> Result<Option<User>, DomainError>;
    /// Returns `None` when a user with the same privy id already exists.
    fn create(&self, user: NewUser) -> Result<Option<User>, DomainError>;
    /// Returns `false` when no user has the given privy id.
    fn update_email(&self, privy_id: &str, email: &str) -> Result<bool, DomainError>;
    fn count(&self) -> Result<i64, DomainError>;
}

// ── Language-model collaborators ─────────────────────────────────────────────

/// Maps free text in any language onto one of the shipping categories.
/// Implementations never fail: any error yields an empty prediction.
#[async_trait]
pub trait CategoryClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> CategoryPrediction;
}

/// Pulls a weight out of unstructured product specifications.
/// Implementations never fail: any error yields [`WeightSpec::missing`].
#[async_trait]
pub trait WeightExtractor: Send + Sync {
    async fn extract(&self, specifications: &Value) -> WeightSpec;
}

// ── Other external services ──────────────────────────────────────────────────

#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Product>, DomainError>;
    async fn details(&self, asin: &str) -> Result<ProductDetail, DomainError>;
}

/// Operator-facing chat notifications.
#[async_trait]
pub trait OrderNotifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<(), DomainError>;
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), DomainError>;
}

#[async_trait]
pub trait ExchangeRateSource: Send + Sync {
    async fn latest(&self) -> Result<ExchangeRate, DomainError>;
}
