use std::fmt;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use super::errors::DomainError;

/// Shown instead of a shipping guide until the order has been shipped.
pub const PENDING_SHIPPING_GUIDE: &str = "Generando orden de envío";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Received,
    Shipped,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Received => "order received",
            OrderStatus::Shipped => "shipped",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        match raw {
            "order received" => Ok(OrderStatus::Received),
            "shipped" => Ok(OrderStatus::Shipped),
            other => Err(DomainError::Internal(format!(
                "unexpected order status '{other}'"
            ))),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct OrderItemInput {
    pub asin: String,
    pub quantity: i32,
    pub price: BigDecimal,
    pub title: String,
    pub image_url: Option<String>,
    pub product_link: Option<String>,
    pub variant_asin: Option<String>,
    pub variant_dimensions: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: String,
    pub items: Vec<OrderItemInput>,
    pub total_amount: BigDecimal,
    pub total_amount_usd: Option<BigDecimal>,
    pub full_name: String,
    pub street: String,
    pub postal_code: String,
    pub phone: String,
    pub delivery_instructions: String,
    pub blockchain_order_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OrderItemView {
    pub id: Uuid,
    pub asin: String,
    pub quantity: i32,
    pub price: BigDecimal,
    pub title: String,
    pub image_url: Option<String>,
    pub product_link: Option<String>,
    pub variant_asin: Option<String>,
    pub variant_dimensions: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: Uuid,
    pub user_id: String,
    pub total_amount: BigDecimal,
    pub total_amount_usd: Option<BigDecimal>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemView>,
    pub full_name: String,
    pub street: String,
    pub postal_code: String,
    pub phone: String,
    pub delivery_instructions: String,
    pub shipping_guide: Option<String>,
    pub blockchain_order_id: Option<String>,
}

impl OrderView {
    pub fn shipping_guide_or_pending(&self) -> &str {
        self.shipping_guide
            .as_deref()
            .unwrap_or(PENDING_SHIPPING_GUIDE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_storage_text() {
        for status in [OrderStatus::Received, OrderStatus::Shipped] {
            assert_eq!(OrderStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(OrderStatus::parse("lost").is_err());
    }
}
