pub mod admin;
pub mod cart;
pub mod misc;
pub mod orders;
pub mod products;
pub mod users;

use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::errors::AppError;

/// Money travels as decimal strings, e.g. "29.99".
pub(crate) fn parse_money(field: &str, raw: &str) -> Result<BigDecimal, AppError> {
    BigDecimal::from_str(raw.trim())
        .map_err(|e| AppError::BadRequest(format!("Invalid {field} '{raw}': {e}")))
}
