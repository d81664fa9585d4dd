//! Marketplace search through a SerpApi-style `engine=` endpoint.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::SearchConfig;
use crate::domain::catalog::{Availability, Product, ProductDetail, ProductPrice, ProductVariant};
use crate::domain::errors::DomainError;
use crate::domain::ports::ProductCatalog;

#[derive(Clone)]
pub struct ProductSearchClient {
    http: reqwest::Client,
    api_key: String,
    api_url: String,
    amazon_domain: String,
}

impl ProductSearchClient {
    pub fn new(config: &SearchConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            api_key: config.api_key.clone(),
            api_url: config.api_url.clone(),
            amazon_domain: config.amazon_domain.clone(),
        }
    }

    async fn query(&self, engine: &str, param: (&str, &str)) -> Result<Value, DomainError> {
        self.http
            .get(&self.api_url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("engine", engine),
                param,
                ("amazon_domain", self.amazon_domain.as_str()),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| DomainError::Upstream(e.without_url().to_string()))?
            .json()
            .await
            .map_err(|e| DomainError::Upstream(e.to_string()))
    }
}

#[async_trait]
impl ProductCatalog for ProductSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<Product>, DomainError> {
        let data = self.query("amazon_search", ("q", query)).await?;
        Ok(map_search_results(&data))
    }

    async fn details(&self, asin: &str) -> Result<ProductDetail, DomainError> {
        let data = self.query("amazon_product", ("asin", asin)).await?;
        Ok(map_product_detail(&data["product"]))
    }
}

// ── Response mapping ─────────────────────────────────────────────────────────

fn text(value: &Value, key: &str) -> String {
    value[key].as_str().unwrap_or_default().to_string()
}

fn opt_text(value: &Value, key: &str) -> Option<String> {
    value[key].as_str().map(str::to_string)
}

fn array<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value[key].as_array().map(Vec::as_slice).unwrap_or_default()
}

/// Price objects may be missing or flattened to a bare string.
fn map_price(value: &Value) -> ProductPrice {
    match value {
        Value::Object(_) => ProductPrice {
            value: value["value"].as_f64().unwrap_or(0.0),
            currency: text(value, "currency"),
            raw: text(value, "raw"),
        },
        Value::Null => ProductPrice::default(),
        Value::String(raw) => ProductPrice {
            raw: raw.clone(),
            ..ProductPrice::default()
        },
        other => ProductPrice {
            raw: other.to_string(),
            ..ProductPrice::default()
        },
    }
}

fn map_search_results(data: &Value) -> Vec<Product> {
    let mut results = array(data, "shopping_results");
    if results.is_empty() {
        results = array(data, "organic_results");
    }

    results
        .iter()
        .map(|item| Product {
            asin: text(item, "asin"),
            title: text(item, "title"),
            price: map_price(&item["price"]),
            image: text(item, "thumbnail"),
            rating: item["rating"].as_f64(),
            ratings_total: item["ratings_total"].as_i64(),
            link: text(item, "link"),
            brand: opt_text(item, "brand"),
            position: item["position"].as_i64(),
            is_sponsored: item["is_sponsored"].as_bool(),
            is_prime: item["is_prime"].as_bool(),
            fulfillment: item.get("fulfillment").filter(|v| !v.is_null()).cloned(),
        })
        .collect()
}

fn map_product_detail(product: &Value) -> ProductDetail {
    let buybox = &product["buybox"];
    let price = match &buybox["price"] {
        Value::Null => None,
        price => Some(map_price(price)),
    };

    let attributes: BTreeMap<String, Value> = array(product, "attributes")
        .iter()
        .filter_map(|attr| Some((attr["name"].as_str()?.to_string(), attr["value"].clone())))
        .collect();

    ProductDetail {
        asin: text(product, "asin"),
        title: text(product, "title"),
        description: opt_text(product, "description"),
        feature_bullets: array(product, "feature_bullets")
            .iter()
            .filter_map(|b| b.as_str().map(str::to_string))
            .collect(),
        variants: array(product, "variants")
            .iter()
            .map(|v| ProductVariant {
                asin: text(v, "asin"),
                title: text(v, "title"),
                link: text(v, "link"),
                dimensions: array(v, "dimensions").to_vec(),
                main_image: text(v, "main_image"),
                images: array(v, "images").to_vec(),
            })
            .collect(),
        attributes,
        images: array(product, "images")
            .iter()
            .map(|img| text(img, "link"))
            .collect(),
        price,
        rating: product["rating"].as_f64(),
        ratings_total: product["reviews"].as_i64(),
        link: text(product, "link"),
        brand: product["brand_store"]
            .as_object()
            .map(|_| text(&product["brand_store"], "text")),
        availability: Availability {
            status: text(buybox, "availability"),
        },
    }
}
