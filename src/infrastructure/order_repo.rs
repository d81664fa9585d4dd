use bigdecimal::BigDecimal;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, OrderItemView, OrderStatus, OrderView};
use crate::domain::ports::OrderRepository;
use crate::schema::{cart_items, order_items, orders};

use super::models::{NewOrderItemRow, NewOrderRow, OrderItemRow, OrderRow};

fn into_view(order: OrderRow, items: Vec<OrderItemRow>) -> Result<OrderView, DomainError> {
    Ok(OrderView {
        id: order.id,
        user_id: order.user_id,
        total_amount: order.total_amount,
        total_amount_usd: order.total_amount_usd,
        status: OrderStatus::parse(&order.status)?,
        created_at: order.created_at,
        items: items
            .into_iter()
            .map(|i| OrderItemView {
                id: i.id,
                asin: i.asin,
                quantity: i.quantity,
                price: i.price,
                title: i.title,
                image_url: i.image_url,
                product_link: i.product_link,
                variant_asin: i.variant_asin,
                variant_dimensions: i.variant_dimensions,
            })
            .collect(),
        full_name: order.full_name,
        street: order.street,
        postal_code: order.postal_code,
        phone: order.phone,
        delivery_instructions: order.delivery_instructions,
        shipping_guide: order.shipping_guide,
        blockchain_order_id: order.blockchain_order_id,
    })
}

/// Attach each order's items with a single extra query.
fn load_with_items(
    conn: &mut PgConnection,
    rows: Vec<OrderRow>,
) -> Result<Vec<OrderView>, DomainError> {
    let items = OrderItemRow::belonging_to(&rows)
        .select(OrderItemRow::as_select())
        .order(order_items::created_at.asc())
        .load(conn)?
        .grouped_by(&rows);

    rows.into_iter()
        .zip(items)
        .map(|(order, items)| into_view(order, items))
        .collect()
}

// ── Repository ────────────────────────────────────────────────────────────────

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn create(&self, order: NewOrder) -> Result<Uuid, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Insert the order
            let order_id = Uuid::new_v4();
            diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    id: order_id,
                    user_id: order.user_id.clone(),
                    total_amount: order.total_amount,
                    total_amount_usd: order.total_amount_usd,
                    status: OrderStatus::Received.as_str().to_string(),
                    full_name: order.full_name,
                    street: order.street,
                    postal_code: order.postal_code,
                    phone: order.phone,
                    delivery_instructions: order.delivery_instructions,
                    blockchain_order_id: order.blockchain_order_id,
                })
                .execute(conn)?;

            // 2. Insert order items
            let new_items: Vec<NewOrderItemRow> = order
                .items
                .into_iter()
                .map(|i| NewOrderItemRow {
                    id: Uuid::new_v4(),
                    order_id,
                    asin: i.asin,
                    quantity: i.quantity,
                    price: i.price,
                    title: i.title,
                    image_url: i.image_url,
                    product_link: i.product_link,
                    variant_asin: i.variant_asin,
                    variant_dimensions: i.variant_dimensions,
                })
                .collect();
            if !new_items.is_empty() {
                diesel::insert_into(order_items::table)
                    .values(&new_items)
                    .execute(conn)?;
            }

            // 3. The cart has been checked out.
            diesel::delete(cart_items::table.filter(cart_items::user_id.eq(&order.user_id)))
                .execute(conn)?;

            Ok(order_id)
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let order = orders::table
            .filter(orders::id.eq(id))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = order_items::table
            .filter(order_items::order_id.eq(order.id))
            .select(OrderItemRow::as_select())
            .order(order_items::created_at.asc())
            .load(&mut conn)?;

        into_view(order, items).map(Some)
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = orders::table
            .filter(orders::user_id.eq(user_id))
            .select(OrderRow::as_select())
            .order(orders::created_at.desc())
            .load(&mut conn)?;

        load_with_items(&mut conn, rows)
    }

    fn list_all(&self) -> Result<Vec<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = orders::table
            .select(OrderRow::as_select())
            .order(orders::created_at.desc())
            .load(&mut conn)?;

        load_with_items(&mut conn, rows)
    }

    fn mark_shipped(&self, id: Uuid, shipping_guide: &str) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let updated = diesel::update(orders::table.filter(orders::id.eq(id)))
            .set((
                orders::status.eq(OrderStatus::Shipped.as_str()),
                orders::shipping_guide.eq(shipping_guide),
            ))
            .execute(&mut conn)?;

        Ok(updated > 0)
    }

    fn total_amount(&self) -> Result<BigDecimal, DomainError> {
        let mut conn = self.pool.get()?;

        let total: Option<BigDecimal> = orders::table
            .select(diesel::dsl::sum(orders::total_amount))
            .first(&mut conn)?;

        Ok(total.unwrap_or_else(|| BigDecimal::from(0)))
    }
}
