use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductPrice {
    pub value: f64,
    pub currency: String,
    pub raw: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub asin: String,
    pub title: String,
    pub price: ProductPrice,
    pub image: String,
    pub rating: Option<f64>,
    pub ratings_total: Option<i64>,
    pub link: String,
    pub brand: Option<String>,
    pub position: Option<i64>,
    pub is_sponsored: Option<bool>,
    pub is_prime: Option<bool>,
    #[schema(value_type = Option<Object>)]
    pub fulfillment: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductVariant {
    pub asin: String,
    pub title: String,
    pub link: String,
    #[schema(value_type = Vec<Object>)]
    pub dimensions: Vec<Value>,
    pub main_image: String,
    #[schema(value_type = Vec<Object>)]
    pub images: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Availability {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDetail {
    pub asin: String,
    pub title: String,
    pub description: Option<String>,
    pub feature_bullets: Vec<String>,
    pub variants: Vec<ProductVariant>,
    #[schema(value_type = Object)]
    pub attributes: BTreeMap<String, Value>,
    pub images: Vec<String>,
    pub price: Option<ProductPrice>,
    pub rating: Option<f64>,
    pub ratings_total: Option<i64>,
    pub link: String,
    pub brand: Option<String>,
    pub availability: Availability,
}

/// Latest datum of a Banxico exchange-rate series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExchangeRate {
    #[serde(rename = "idSerie")]
    pub series_id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "valor")]
    pub value: String,
}
