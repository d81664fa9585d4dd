use actix_web::{web, HttpResponse};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::catalog::ExchangeRate;
use crate::domain::errors::DomainError;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    pub total_users: i64,
    /// Sum of every order total, as a decimal string.
    pub total_order_amount: String,
}

/// GET /
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is up")),
    tag = "health"
)]
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "hello": "world" }))
}

/// GET /api/exchange-rate/latest
///
/// Latest USD/MXN FIX rate published by Banxico.
#[utoipa::path(
    get,
    path = "/api/exchange-rate/latest",
    responses(
        (status = 200, description = "Latest exchange rate", body = ExchangeRate),
        (status = 404, description = "No data found for the given series."),
        (status = 503, description = "Banxico unreachable"),
    ),
    tag = "exchange-rate"
)]
pub async fn latest_exchange_rate(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let rate = state.exchange_rates.latest().await.map_err(|e| match e {
        DomainError::NotFound(_) => {
            AppError::NotFound("No data found for the given series.".to_string())
        }
        other => AppError::from(other),
    })?;
    Ok(HttpResponse::Ok().json(rate))
}

/// GET /api/stats
#[utoipa::path(
    get,
    path = "/api/stats",
    responses((status = 200, description = "Aggregate stats", body = StatsResponse)),
    tag = "stats"
)]
pub async fn stats(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let stats = state.orders.stats().await?;
    Ok(HttpResponse::Ok().json(StatsResponse {
        total_users: stats.total_users,
        total_order_amount: stats.total_order_amount.to_string(),
    }))
}
