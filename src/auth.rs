//! Admin authorization for the back-office routes.
//!
//! Admin requests carry a bearer JWT issued by the wallet/auth provider. The
//! token is verified against the configured public key and its `sub` or
//! `wallet_address` claim must name the configured admin.

use std::future::{ready, Ready};

use actix_web::http::header::AUTHORIZATION;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::config::AdminConfig;
use crate::errors::AppError;

const INVALID_TOKEN: &str = "Invalid token";
const NOT_AUTHORIZED: &str = "Not authorized";

#[derive(Debug, Deserialize)]
struct Claims {
    sub: Option<String>,
    wallet_address: Option<String>,
}

/// Verifies admin bearer tokens. Shared through `web::Data`.
pub struct AdminAuth {
    key: Option<DecodingKey>,
    validation: Validation,
    privy_id: Option<String>,
    wallet_address: Option<String>,
}

impl AdminAuth {
    /// `key = None` rejects every token.
    pub fn new(key: Option<DecodingKey>, algorithm: Algorithm, config: &AdminConfig) -> Self {
        let mut validation = Validation::new(algorithm);
        match &config.app_id {
            Some(app_id) => validation.set_audience(&[app_id]),
            None => validation.validate_aud = false,
        }

        Self {
            key,
            validation,
            privy_id: config.privy_id.clone(),
            wallet_address: config.wallet_address.clone(),
        }
    }

    /// ES256 verification with the PEM public key from the configuration.
    pub fn from_config(config: &AdminConfig) -> Result<Self, jsonwebtoken::errors::Error> {
        let key = match &config.verification_key_pem {
            Some(pem) => Some(DecodingKey::from_ec_pem(pem.as_bytes())?),
            None => {
                log::warn!("No admin verification key configured, admin routes are disabled");
                None
            }
        };
        Ok(Self::new(key, Algorithm::ES256, config))
    }

    /// Returns the admin's privy id, or wallet address if the token has no subject.
    pub fn authorize(&self, token: &str) -> Result<String, AppError> {
        let invalid = || AppError::Unauthorized(INVALID_TOKEN.to_string());

        let key = self.key.as_ref().ok_or_else(invalid)?;
        let claims = decode::<Claims>(token, key, &self.validation)
            .map_err(|e| {
                log::warn!("Rejected admin token: {}", e);
                invalid()
            })?
            .claims;

        if claims.sub.is_none() && claims.wallet_address.is_none() {
            return Err(invalid());
        }

        if !same(&claims.sub, &self.privy_id) && !same(&claims.wallet_address, &self.wallet_address)
        {
            log::warn!(
                "Admin access denied for sub={:?} wallet={:?}",
                claims.sub,
                claims.wallet_address
            );
            return Err(AppError::Forbidden(NOT_AUTHORIZED.to_string()));
        }

        claims.sub.or(claims.wallet_address).ok_or_else(invalid)
    }
}

/// Both sides must be set; an unset admin id matches nothing.
fn same(claim: &Option<String>, expected: &Option<String>) -> bool {
    matches!((claim, expected), (Some(c), Some(e)) if c == e)
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

/// Extractor that only succeeds for an authorized admin.
///
/// ```rust,ignore
/// async fn handler(admin: AdminIdentity) -> HttpResponse { .. }
/// ```
#[derive(Debug, Clone)]
pub struct AdminIdentity(pub String);

impl FromRequest for AdminIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.app_data::<web::Data<AdminAuth>>() {
            None => Err(AppError::Internal("AdminAuth is not registered".to_string())),
            Some(auth) => bearer_token(req)
                .ok_or_else(|| AppError::Unauthorized(INVALID_TOKEN.to_string()))
                .and_then(|token| auth.authorize(token))
                .map(AdminIdentity),
        };
        ready(result)
    }
}
