use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::upsert::excluded;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::cart::{CartItemView, EnrichedCartItem};
use crate::domain::errors::DomainError;
use crate::domain::ports::CartRepository;
use crate::schema::cart_items;

use super::models::{CartItemRow, NewCartItemRow};

impl From<CartItemRow> for CartItemView {
    fn from(row: CartItemRow) -> Self {
        CartItemView {
            asin: row.asin,
            quantity: row.quantity,
            title: row.title,
            price: row.price,
            image_url: row.image_url,
            product_link: row.product_link,
            variant_asin: row.variant_asin,
            variant_dimensions: row.variant_dimensions,
            normalized_category: row.normalized_category,
            weight_lb: row.weight_lb,
            shipping_fee: row.shipping_fee,
        }
    }
}

pub struct DieselCartRepository {
    pool: DbPool,
}

impl DieselCartRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CartRepository for DieselCartRepository {
    fn upsert_item(&self, user_id: &str, enriched: &EnrichedCartItem) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        let item = &enriched.item;

        // A single INSERT .. ON CONFLICT statement, so concurrent adds of the
        // same asin cannot lose an increment.
        diesel::insert_into(cart_items::table)
            .values(&NewCartItemRow {
                id: Uuid::new_v4(),
                user_id,
                asin: &item.asin,
                quantity: item.quantity,
                title: &item.title,
                price: item.price.clone(),
                image_url: item.image_url.as_deref(),
                product_link: item.product_link.as_deref(),
                variant_asin: item.variant_asin.as_deref(),
                variant_dimensions: item.variant_dimensions.clone(),
                category: &item.category,
                specifications: item.specifications.clone(),
                normalized_category: enriched.normalized_category.as_str(),
                weight_lb: enriched.weight_lb,
                shipping_fee: enriched.shipping_fee,
            })
            .on_conflict((cart_items::user_id, cart_items::asin))
            .do_update()
            .set(cart_items::quantity.eq(cart_items::quantity + excluded(cart_items::quantity)))
            .execute(&mut conn)
            .map_err(quantity_out_of_range)?;

        Ok(())
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<CartItemView>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = cart_items::table
            .filter(cart_items::user_id.eq(user_id))
            .select(CartItemRow::as_select())
            .order(cart_items::created_at.asc())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(CartItemView::from).collect())
    }

    fn set_quantity(&self, user_id: &str, asin: &str, quantity: i32) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        diesel::update(
            cart_items::table
                .filter(cart_items::user_id.eq(user_id))
                .filter(cart_items::asin.eq(asin)),
        )
        .set(cart_items::quantity.eq(quantity))
        .execute(&mut conn)
        .map_err(quantity_out_of_range)?;

        Ok(())
    }

    fn remove_item(&self, user_id: &str, asin: &str) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        diesel::delete(
            cart_items::table
                .filter(cart_items::user_id.eq(user_id))
                .filter(cart_items::asin.eq(asin)),
        )
        .execute(&mut conn)?;

        Ok(())
    }
}

/// Maps the range CHECK on `cart_items.quantity` to invalid input.
fn quantity_out_of_range(e: DieselError) -> DomainError {
    match e {
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            DomainError::InvalidInput("cart quantity out of range".to_string())
        }
        other => other.into(),
    }
}
