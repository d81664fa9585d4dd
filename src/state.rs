use std::sync::Arc;

use crate::application::cart_service::CartService;
use crate::application::order_service::OrderService;
use crate::application::user_service::UserService;
use crate::domain::ports::{ExchangeRateSource, ProductCatalog};

/// Everything a request handler needs, built once in `main`.
pub struct AppState {
    pub carts: CartService,
    pub orders: OrderService,
    pub users: UserService,
    pub catalog: Arc<dyn ProductCatalog>,
    pub exchange_rates: Arc<dyn ExchangeRateSource>,
}
