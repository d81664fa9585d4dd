use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::AdminIdentity;
use crate::errors::AppError;
use crate::state::AppState;

use super::orders::OrderResponse;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    #[serde(rename = "shippingGuide")]
    pub shipping_guide: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /api/admin/orders
#[utoipa::path(
    get,
    path = "/api/admin/orders",
    responses(
        (status = 200, description = "Every order, newest first", body = Vec<OrderResponse>),
        (status = 401, description = "Invalid token"),
        (status = 403, description = "Not authorized"),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn list_all_orders(
    admin: AdminIdentity,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    log::debug!("Admin {} listing all orders", admin.0);
    let orders = state.orders.list_all_orders().await?;
    let body: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/orders_admin/{order_id}
#[utoipa::path(
    get,
    path = "/api/orders_admin/{order_id}",
    params(("order_id" = Uuid, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 401, description = "Invalid token"),
        (status = 403, description = "Not authorized"),
        (status = 404, description = "Order not found"),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn get_order(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order = state.orders.get_order(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// PUT /api/orders/{order_id}/status
///
/// Marks the order shipped and emails the customer the shipping guide.
#[utoipa::path(
    put,
    path = "/api/orders/{order_id}/status",
    params(("order_id" = Uuid, Path, description = "Order UUID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order status updated", body = MessageResponse),
        (status = 401, description = "Invalid token"),
        (status = 403, description = "Not authorized"),
        (status = 404, description = "Order not found"),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn update_order_status(
    admin: AdminIdentity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateOrderStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    log::info!("Admin {} shipping order {}", admin.0, order_id);

    state
        .orders
        .mark_shipped(order_id, &body.shipping_guide)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Order status updated successfully".to_string(),
    }))
}
