use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::schema::{cart_items, order_items, orders, users};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub privy_id: String,
    pub wallet_address: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub id: Uuid,
    pub privy_id: &'a str,
    pub wallet_address: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = cart_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartItemRow {
    pub id: Uuid,
    pub user_id: String,
    pub asin: String,
    pub quantity: i32,
    pub title: String,
    pub price: BigDecimal,
    pub image_url: Option<String>,
    pub product_link: Option<String>,
    pub variant_asin: Option<String>,
    pub variant_dimensions: Option<Value>,
    pub category: String,
    pub specifications: Value,
    pub normalized_category: String,
    pub weight_lb: f64,
    pub shipping_fee: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = cart_items)]
pub struct NewCartItemRow<'a> {
    pub id: Uuid,
    pub user_id: &'a str,
    pub asin: &'a str,
    pub quantity: i32,
    pub title: &'a str,
    pub price: BigDecimal,
    pub image_url: Option<&'a str>,
    pub product_link: Option<&'a str>,
    pub variant_asin: Option<&'a str>,
    pub variant_dimensions: Option<Value>,
    pub category: &'a str,
    pub specifications: Value,
    pub normalized_category: &'a str,
    pub weight_lb: f64,
    pub shipping_fee: f64,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub user_id: String,
    pub total_amount: BigDecimal,
    pub total_amount_usd: Option<BigDecimal>,
    pub status: String,
    pub full_name: String,
    pub street: String,
    pub postal_code: String,
    pub phone: String,
    pub delivery_instructions: String,
    pub shipping_guide: Option<String>,
    pub blockchain_order_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: Uuid,
    pub user_id: String,
    pub total_amount: BigDecimal,
    pub total_amount_usd: Option<BigDecimal>,
    pub status: String,
    pub full_name: String,
    pub street: String,
    pub postal_code: String,
    pub phone: String,
    pub delivery_instructions: String,
    pub blockchain_order_id: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = order_items)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub asin: String,
    pub quantity: i32,
    pub price: BigDecimal,
    pub title: String,
    pub image_url: Option<String>,
    pub product_link: Option<String>,
    pub variant_asin: Option<String>,
    pub variant_dimensions: Option<Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_items)]
pub struct NewOrderItemRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub asin: String,
    pub quantity: i32,
    pub price: BigDecimal,
    pub title: String,
    pub image_url: Option<String>,
    pub product_link: Option<String>,
    pub variant_asin: Option<String>,
    pub variant_dimensions: Option<Value>,
}
