use std::sync::Arc;

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, OrderView};
use crate::domain::ports::{Mailer, OrderNotifier, OrderRepository, UserRepository};
use crate::domain::validation::{
    check_asin, check_money, check_quantity, PRICE_INTEGER_DIGITS, TOTAL_INTEGER_DIGITS,
};

use super::blocking;

pub const SHIPPED_SUBJECT: &str = "Your order has been shipped";

#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub total_users: i64,
    pub total_order_amount: BigDecimal,
}

pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    users: Arc<dyn UserRepository>,
    notifier: Option<Arc<dyn OrderNotifier>>,
    mailer: Option<Arc<dyn Mailer>>,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        users: Arc<dyn UserRepository>,
        notifier: Option<Arc<dyn OrderNotifier>>,
        mailer: Option<Arc<dyn Mailer>>,
    ) -> Self {
        Self {
            orders,
            users,
            notifier,
            mailer,
        }
    }

    /// Store the order, empty the user's cart and tell the operators.
    pub async fn create_order(&self, order: NewOrder) -> Result<OrderView, DomainError> {
        validate(&order)?;

        let repo = Arc::clone(&self.orders);
        let order_id = blocking(move || repo.create(order)).await?;

        let created = self
            .find(order_id)
            .await?
            .ok_or_else(|| DomainError::Internal(format!("order {order_id} missing after insert")))?;

        log::info!("Order {} created for {}", created.id, created.user_id);
        self.notify_operators(&created).await;

        Ok(created)
    }

    pub async fn list_user_orders(&self, user_id: &str) -> Result<Vec<OrderView>, DomainError> {
        let repo = Arc::clone(&self.orders);
        let user_id = user_id.to_string();
        blocking(move || repo.list_for_user(&user_id)).await
    }

    pub async fn list_all_orders(&self) -> Result<Vec<OrderView>, DomainError> {
        let repo = Arc::clone(&self.orders);
        blocking(move || repo.list_all()).await
    }

    pub async fn get_order(&self, id: Uuid) -> Result<OrderView, DomainError> {
        self.find(id).await?.ok_or(DomainError::NotFound("Order"))
    }

    /// Mark the order shipped and email the customer its shipping guide.
    /// Email problems are logged and never undo the status change.
    pub async fn mark_shipped(&self, id: Uuid, shipping_guide: &str) -> Result<(), DomainError> {
        let shipping_guide = shipping_guide.trim().to_string();
        if shipping_guide.is_empty() {
            return Err(DomainError::InvalidInput(
                "shipping guide must not be empty".to_string(),
            ));
        }

        let order = self.get_order(id).await?;

        let repo = Arc::clone(&self.orders);
        let guide = shipping_guide.clone();
        if !blocking(move || repo.mark_shipped(id, &guide)).await? {
            return Err(DomainError::NotFound("Order"));
        }
        log::info!("Order {} shipped with guide {}", id, shipping_guide);

        self.email_shipping_guide(&order, &shipping_guide).await;
        Ok(())
    }

    pub async fn stats(&self) -> Result<Stats, DomainError> {
        let users = Arc::clone(&self.users);
        let orders = Arc::clone(&self.orders);
        blocking(move || {
            Ok(Stats {
                total_users: users.count()?,
                total_order_amount: orders.total_amount()?,
            })
        })
        .await
    }

    async fn find(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        let repo = Arc::clone(&self.orders);
        blocking(move || repo.find_by_id(id)).await
    }

    async fn notify_operators(&self, order: &OrderView) {
        let Some(notifier) = &self.notifier else {
            log::warn!("No order notifier configured, skipping notification for {}", order.id);
            return;
        };

        if let Err(e) = notifier.notify(&new_order_message(order)).await {
            log::warn!("Failed to send notification for order {}: {}", order.id, e);
        }
    }

    async fn email_shipping_guide(&self, order: &OrderView, shipping_guide: &str) {
        let users = Arc::clone(&self.users);
        let privy_id = order.user_id.clone();
        let email = match blocking(move || users.find_by_privy_id(&privy_id)).await {
            Ok(user) => user.and_then(|u| u.email),
            Err(e) => {
                log::warn!("Could not look up user {}: {}", order.user_id, e);
                return;
            }
        };

        let Some(email) = email else {
            log::warn!("User email not found for user_id: {}", order.user_id);
            return;
        };

        let Some(mailer) = &self.mailer else {
            log::warn!("No mailer configured, not emailing {}", email);
            return;
        };

        let html = shipped_email_html(order.id, shipping_guide);
        if let Err(e) = mailer.send(&email, SHIPPED_SUBJECT, &html).await {
            log::warn!("Failed to send email for order {}: {}", order.id, e);
        }
    }
}

fn validate(order: &NewOrder) -> Result<(), DomainError> {
    if order.user_id.trim().is_empty() {
        return Err(DomainError::InvalidInput("user_id must not be empty".to_string()));
    }
    if order.items.is_empty() {
        return Err(DomainError::InvalidInput("order has no items".to_string()));
    }
    for item in &order.items {
        check_asin(&item.asin)?;
        check_quantity(&item.asin, item.quantity)?;
        check_money("price", &item.price, PRICE_INTEGER_DIGITS)?;
    }
    check_money("total_amount", &order.total_amount, TOTAL_INTEGER_DIGITS)?;
    if let Some(usd) = &order.total_amount_usd {
        check_money("total_amount_usd", usd, TOTAL_INTEGER_DIGITS)?;
    }
    Ok(())
}

fn new_order_message(order: &OrderView) -> String {
    let usd = order
        .total_amount_usd
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "-".to_string());

    format!(
        "Nueva orden creada:\nID: {}\nUsuario: {}\nMonto total: {}\nMonto total USD: {}",
        order.id, order.user_id, order.total_amount, usd
    )
}

fn shipped_email_html(order_id: Uuid, shipping_guide: &str) -> String {
    format!(
        "<h1>Your order has been shipped!</h1>\
         <p>Order ID: {order_id}</p>\
         <p>Shipping Guide: {shipping_guide}</p>\
         <p>Thank you for your purchase!</p>"
    )
}
