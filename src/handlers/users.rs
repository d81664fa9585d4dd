use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::user::{NewUser, User};
use crate::errors::AppError;
use crate::state::AppState;

use super::admin::MessageResponse;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PrivyIdQuery {
    pub privy_id: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UpdateEmailQuery {
    pub privy_id: String,
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterUserRequest {
    pub privy_id: String,
    pub wallet_address: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub privy_id: String,
    pub wallet_address: Option<String>,
    pub email: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrationStatus {
    #[serde(rename = "isRegistered")]
    pub is_registered: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmailResponse {
    pub email: Option<String>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id,
            privy_id: u.privy_id,
            wallet_address: u.wallet_address,
            email: u.email,
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// GET /user/check?privy_id=...
#[utoipa::path(
    get,
    path = "/user/check",
    params(PrivyIdQuery),
    responses((status = 200, description = "Whether the user exists", body = RegistrationStatus)),
    tag = "users"
)]
pub async fn check_registration(
    state: web::Data<AppState>,
    query: web::Query<PrivyIdQuery>,
) -> Result<HttpResponse, AppError> {
    let is_registered = state.users.is_registered(&query.privy_id).await?;
    Ok(HttpResponse::Ok().json(RegistrationStatus { is_registered }))
}

/// POST /user
#[utoipa::path(
    post,
    path = "/user",
    request_body = RegisterUserRequest,
    responses(
        (status = 200, description = "User registered", body = UserResponse),
        (status = 400, description = "Failed to register user"),
    ),
    tag = "users"
)]
pub async fn register_user(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let user = state
        .users
        .register(NewUser {
            privy_id: body.privy_id,
            wallet_address: body.wallet_address,
        })
        .await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// GET /user/email?privy_id=...
#[utoipa::path(
    get,
    path = "/user/email",
    params(PrivyIdQuery),
    responses((status = 200, description = "The user's email, or null", body = EmailResponse)),
    tag = "users"
)]
pub async fn get_email(
    state: web::Data<AppState>,
    query: web::Query<PrivyIdQuery>,
) -> Result<HttpResponse, AppError> {
    let email = state.users.get_email(&query.privy_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "email": email })))
}

/// PUT /user/email?privy_id=...&email=...
#[utoipa::path(
    put,
    path = "/user/email",
    params(UpdateEmailQuery),
    responses(
        (status = 200, description = "Email updated", body = MessageResponse),
        (status = 400, description = "Invalid email"),
        (status = 404, description = "User not found"),
    ),
    tag = "users"
)]
pub async fn update_email(
    state: web::Data<AppState>,
    query: web::Query<UpdateEmailQuery>,
) -> Result<HttpResponse, AppError> {
    state.users.update_email(&query.privy_id, &query.email).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Email updated successfully".to_string(),
    }))
}
