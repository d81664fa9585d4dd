use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::order::{NewOrder, OrderItemInput, OrderItemView, OrderView};
use crate::errors::AppError;
use crate::state::AppState;

use super::parse_money;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    pub asin: String,
    pub quantity: i32,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub price: String,
    pub title: String,
    pub image_url: Option<String>,
    pub product_link: Option<String>,
    pub variant_asin: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub variant_dimensions: Option<Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub user_id: String,
    pub items: Vec<OrderItemRequest>,
    /// Total in MXN as a decimal string.
    pub total_amount: String,
    pub total_amount_usd: Option<String>,
    pub full_name: String,
    pub street: String,
    pub postal_code: String,
    pub phone: String,
    #[serde(default)]
    pub delivery_instructions: String,
    pub blockchain_order_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub asin: String,
    pub quantity: i32,
    pub price: String,
    pub title: String,
    pub image_url: Option<String>,
    pub product_link: Option<String>,
    pub variant_asin: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub variant_dimensions: Option<Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub user_id: String,
    pub total_amount: String,
    pub total_amount_usd: Option<String>,
    pub status: String,
    pub created_at: String,
    pub items: Vec<OrderItemResponse>,
    pub full_name: String,
    pub street: String,
    pub postal_code: String,
    pub phone: String,
    pub delivery_instructions: String,
    /// "Generando orden de envío" until the order ships.
    pub shipping_guide: String,
    pub blockchain_order_id: Option<String>,
}

impl From<OrderItemView> for OrderItemResponse {
    fn from(i: OrderItemView) -> Self {
        OrderItemResponse {
            id: i.id,
            asin: i.asin,
            quantity: i.quantity,
            price: i.price.to_string(),
            title: i.title,
            image_url: i.image_url,
            product_link: i.product_link,
            variant_asin: i.variant_asin,
            variant_dimensions: i.variant_dimensions,
        }
    }
}

impl From<OrderView> for OrderResponse {
    fn from(o: OrderView) -> Self {
        OrderResponse {
            shipping_guide: o.shipping_guide_or_pending().to_string(),
            id: o.id,
            user_id: o.user_id,
            total_amount: o.total_amount.to_string(),
            total_amount_usd: o.total_amount_usd.map(|v| v.to_string()),
            status: o.status.to_string(),
            created_at: o.created_at.to_rfc3339(),
            items: o.items.into_iter().map(OrderItemResponse::from).collect(),
            full_name: o.full_name,
            street: o.street,
            postal_code: o.postal_code,
            phone: o.phone,
            delivery_instructions: o.delivery_instructions,
            blockchain_order_id: o.blockchain_order_id,
        }
    }
}

impl CreateOrderRequest {
    fn into_new_order(self) -> Result<NewOrder, AppError> {
        let items = self
            .items
            .into_iter()
            .map(|i| {
                Ok(OrderItemInput {
                    price: parse_money("price", &i.price)?,
                    asin: i.asin,
                    quantity: i.quantity,
                    title: i.title,
                    image_url: i.image_url,
                    product_link: i.product_link,
                    variant_asin: i.variant_asin,
                    variant_dimensions: i.variant_dimensions,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(NewOrder {
            total_amount: parse_money("total_amount", &self.total_amount)?,
            total_amount_usd: self
                .total_amount_usd
                .as_deref()
                .map(|raw| parse_money("total_amount_usd", raw))
                .transpose()?,
            user_id: self.user_id,
            items,
            full_name: self.full_name,
            street: self.street,
            postal_code: self.postal_code,
            phone: self.phone,
            delivery_instructions: self.delivery_instructions,
            blockchain_order_id: self.blockchain_order_id,
        })
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/orders
///
/// Stores the order and its items and empties the user's cart in a single
/// database transaction, then notifies the operators.
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created successfully", body = OrderResponse),
        (status = 400, description = "Invalid order"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    state: web::Data<AppState>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let order = body.into_inner().into_new_order()?;
    let created = state.orders.create_order(order).await?;
    Ok(HttpResponse::Created().json(OrderResponse::from(created)))
}

/// GET /api/orders/{user_id}
///
/// Returns the user's orders, newest first, with their items.
#[utoipa::path(
    get,
    path = "/api/orders/{user_id}",
    params(("user_id" = String, Path, description = "Owner of the orders")),
    responses(
        (status = 200, description = "The user's orders", body = Vec<OrderResponse>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_user_orders(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let orders = state.orders.list_user_orders(&path.into_inner()).await?;
    let body: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}
