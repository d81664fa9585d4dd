use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::catalog::{Product, ProductDetail};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    pub products: Vec<Product>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductDetailRequest {
    pub asin: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetailResponse {
    pub product: ProductDetail,
}

/// POST /api/searchProduct
#[utoipa::path(
    post,
    path = "/api/searchProduct",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching products", body = SearchResponse),
        (status = 502, description = "Search service failed"),
    ),
    tag = "products"
)]
pub async fn search_product(
    state: web::Data<AppState>,
    body: web::Json<SearchRequest>,
) -> Result<HttpResponse, AppError> {
    let query = body.query.trim();
    if query.is_empty() {
        return Err(AppError::BadRequest("query must not be empty".to_string()));
    }

    let products = state.catalog.search(query).await?;
    Ok(HttpResponse::Ok().json(SearchResponse { products }))
}

/// POST /api/productDetails
#[utoipa::path(
    post,
    path = "/api/productDetails",
    request_body = ProductDetailRequest,
    responses(
        (status = 200, description = "Product details", body = ProductDetailResponse),
        (status = 502, description = "Search service failed"),
    ),
    tag = "products"
)]
pub async fn product_details(
    state: web::Data<AppState>,
    body: web::Json<ProductDetailRequest>,
) -> Result<HttpResponse, AppError> {
    let product = state.catalog.details(body.asin.trim()).await?;
    Ok(HttpResponse::Ok().json(ProductDetailResponse { product }))
}
