use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::DomainError;
use super::shipping::CategoryLabel;
use super::validation::{check_asin, check_money, check_quantity, PRICE_INTEGER_DIGITS};

/// An add-to-cart request as received from the client.
#[derive(Debug, Clone)]
pub struct CartItemInput {
    pub asin: String,
    pub quantity: i32,
    pub title: String,
    pub price: BigDecimal,
    pub image_url: Option<String>,
    pub product_link: Option<String>,
    pub variant_asin: Option<String>,
    pub variant_dimensions: Option<Value>,
    /// Free-text category as shown by the marketplace, in any language.
    pub category: String,
    /// Unstructured product specifications the weight is extracted from.
    pub specifications: Value,
}

impl CartItemInput {
    /// Bounds the stored row enforces, checked before any paid model call.
    pub fn validate(&self) -> Result<(), DomainError> {
        check_asin(&self.asin)?;
        check_quantity(&self.asin, self.quantity)?;
        check_money("price", &self.price, PRICE_INTEGER_DIGITS)
    }
}

/// A line item after classification, weight extraction and fee computation.
#[derive(Debug, Clone)]
pub struct EnrichedCartItem {
    pub item: CartItemInput,
    pub normalized_category: CategoryLabel,
    pub weight_lb: f64,
    pub shipping_fee: f64,
}

#[derive(Debug, Clone)]
pub struct CartItemView {
    pub asin: String,
    pub quantity: i32,
    pub title: String,
    pub price: BigDecimal,
    pub image_url: Option<String>,
    pub product_link: Option<String>,
    pub variant_asin: Option<String>,
    pub variant_dimensions: Option<Value>,
    pub normalized_category: String,
    pub weight_lb: f64,
    pub shipping_fee: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Cart {
    pub items: Vec<CartItemView>,
}

/// Output of the category classifier. An empty prediction means the
/// classifier could not settle on any of the known labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPrediction {
    #[serde(default)]
    pub prediction: String,
}

impl CategoryPrediction {
    pub fn new(prediction: impl Into<String>) -> Self {
        Self {
            prediction: prediction.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.prediction.trim().is_empty()
    }
}
