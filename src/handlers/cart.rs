use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::cart::{Cart, CartItemInput, CartItemView};
use crate::errors::AppError;
use crate::state::AppState;

use super::parse_money;

// ── Request / response DTOs ──────────────────────────────────────────────────

/// A product to add to the cart. Category and weight enrichment happen
/// server-side; they are never taken from the client.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddCartItemRequest {
    pub asin: String,
    pub quantity: i32,
    pub title: String,
    /// Decimal price as a string, e.g. "599.00"
    pub price: String,
    pub image_url: Option<String>,
    pub product_link: Option<String>,
    pub variant_asin: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub variant_dimensions: Option<Value>,
    /// Marketplace category text, in any language.
    pub category: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub specifications: Value,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartItemResponse {
    pub asin: String,
    pub quantity: i32,
    pub title: String,
    pub price: String,
    pub image_url: Option<String>,
    pub product_link: Option<String>,
    pub variant_asin: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub variant_dimensions: Option<Value>,
    pub normalized_category: String,
    pub weight_lb: f64,
    pub shipping_fee: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartResponse {
    pub items: Vec<CartItemResponse>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuantityParams {
    /// New quantity; zero or less removes the item.
    pub quantity: i32,
}

impl From<CartItemView> for CartItemResponse {
    fn from(item: CartItemView) -> Self {
        CartItemResponse {
            asin: item.asin,
            quantity: item.quantity,
            title: item.title,
            price: item.price.to_string(),
            image_url: item.image_url,
            product_link: item.product_link,
            variant_asin: item.variant_asin,
            variant_dimensions: item.variant_dimensions,
            normalized_category: item.normalized_category,
            weight_lb: item.weight_lb,
            shipping_fee: item.shipping_fee,
        }
    }
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        CartResponse {
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
        }
    }
}

impl AddCartItemRequest {
    fn into_input(self) -> Result<CartItemInput, AppError> {
        Ok(CartItemInput {
            price: parse_money("price", &self.price)?,
            asin: self.asin,
            quantity: self.quantity,
            title: self.title,
            image_url: self.image_url,
            product_link: self.product_link,
            variant_asin: self.variant_asin,
            variant_dimensions: self.variant_dimensions,
            category: self.category,
            specifications: self.specifications,
        })
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /cart/{user_id}
#[utoipa::path(
    get,
    path = "/cart/{user_id}",
    params(("user_id" = String, Path, description = "Owner of the cart")),
    responses(
        (status = 200, description = "The user's cart", body = CartResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn get_cart(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let cart = state.carts.get_cart(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(cart)))
}

/// POST /cart/{user_id}
///
/// Classifies the product, extracts its weight, computes the shipping fee
/// and adds it to the cart. Adding an asin already in the cart increments
/// its quantity.
#[utoipa::path(
    post,
    path = "/cart/{user_id}",
    params(("user_id" = String, Path, description = "Owner of the cart")),
    request_body = AddCartItemRequest,
    responses(
        (status = 200, description = "The cart after the item was added", body = CartResponse),
        (status = 400, description = "Could not determine product category, or invalid input"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn add_to_cart(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<AddCartItemRequest>,
) -> Result<HttpResponse, AppError> {
    let item = body.into_inner().into_input()?;
    let cart = state.carts.add_item(&path.into_inner(), item).await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(cart)))
}

/// DELETE /cart/{user_id}/{asin}
#[utoipa::path(
    delete,
    path = "/cart/{user_id}/{asin}",
    params(
        ("user_id" = String, Path, description = "Owner of the cart"),
        ("asin" = String, Path, description = "Product to remove"),
    ),
    responses(
        (status = 200, description = "The remaining cart", body = CartResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn remove_from_cart(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (user_id, asin) = path.into_inner();
    let cart = state.carts.remove_item(&user_id, &asin).await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(cart)))
}

/// PUT /cart/{user_id}/{asin}?quantity=N
#[utoipa::path(
    put,
    path = "/cart/{user_id}/{asin}",
    params(
        ("user_id" = String, Path, description = "Owner of the cart"),
        ("asin" = String, Path, description = "Product to update"),
        QuantityParams,
    ),
    responses(
        (status = 200, description = "The updated cart", body = CartResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn update_quantity(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    query: web::Query<QuantityParams>,
) -> Result<HttpResponse, AppError> {
    let (user_id, asin) = path.into_inner();
    let cart = state
        .carts
        .update_quantity(&user_id, &asin, query.quantity)
        .await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(cart)))
}
