use bigdecimal::BigDecimal;

use super::errors::DomainError;

pub const MAX_ASIN_LEN: usize = 32;
/// Upper bound for a single line item, also enforced by `cart_items`.
pub const MAX_QUANTITY: i32 = 10_000;
/// Integer digits that fit `NUMERIC(12, 2)`.
pub const PRICE_INTEGER_DIGITS: i64 = 10;
/// Integer digits that fit `NUMERIC(14, 2)`.
pub const TOTAL_INTEGER_DIGITS: i64 = 12;

const MONEY_SCALE: i64 = 2;

/// A non-negative amount with at most two decimals and `integer_digits`
/// digits before the point.
pub fn check_money(field: &str, value: &BigDecimal, integer_digits: i64) -> Result<(), DomainError> {
    if *value < BigDecimal::from(0) {
        return Err(DomainError::InvalidInput(format!("{field} must not be negative")));
    }

    let normalized = value.normalized();
    let (_, scale) = normalized.as_bigint_and_exponent();
    if scale > MONEY_SCALE {
        return Err(DomainError::InvalidInput(format!(
            "{field} must have at most {MONEY_SCALE} decimal places"
        )));
    }
    if normalized.digits() as i64 - scale > integer_digits {
        return Err(DomainError::InvalidInput(format!("{field} is too large")));
    }
    Ok(())
}

pub fn check_asin(asin: &str) -> Result<(), DomainError> {
    if asin.trim().is_empty() {
        return Err(DomainError::InvalidInput("asin must not be empty".to_string()));
    }
    if asin.chars().count() > MAX_ASIN_LEN {
        return Err(DomainError::InvalidInput(format!(
            "asin must be at most {MAX_ASIN_LEN} characters"
        )));
    }
    Ok(())
}

pub fn check_quantity(asin: &str, quantity: i32) -> Result<(), DomainError> {
    if !(1..=MAX_QUANTITY).contains(&quantity) {
        return Err(DomainError::InvalidInput(format!(
            "quantity for {asin} must be between 1 and {MAX_QUANTITY}"
        )));
    }
    Ok(())
}
