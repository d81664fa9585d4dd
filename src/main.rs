use std::sync::Arc;

use actix_web::web;
use dotenvy::dotenv;

use coinshop_service::application::cart_service::CartService;
use coinshop_service::application::order_service::OrderService;
use coinshop_service::application::user_service::UserService;
use coinshop_service::auth::AdminAuth;
use coinshop_service::config::AppConfig;
use coinshop_service::domain::ports::{Mailer, OrderNotifier};
use coinshop_service::domain::shipping::ShippingRateTable;
use coinshop_service::infrastructure::banxico::BanxicoClient;
use coinshop_service::infrastructure::cart_repo::DieselCartRepository;
use coinshop_service::infrastructure::http_client;
use coinshop_service::infrastructure::openai::OpenAiClient;
use coinshop_service::infrastructure::order_repo::DieselOrderRepository;
use coinshop_service::infrastructure::product_search::ProductSearchClient;
use coinshop_service::infrastructure::resend::ResendMailer;
use coinshop_service::infrastructure::telegram::TelegramNotifier;
use coinshop_service::infrastructure::user_repo::DieselUserRepository;
use coinshop_service::state::AppState;
use coinshop_service::{build_server, create_pool, run_migrations};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().expect("Invalid configuration");

    let pool = create_pool(&config.database_url).expect("Failed to create database connection pool");
    run_migrations(&pool).expect("Failed to run database migrations");

    let http = http_client(config.http_timeout).expect("Failed to build HTTP client");
    let openai = Arc::new(OpenAiClient::new(&config.openai, http.clone()));

    let notifier = config.telegram.clone().map(|telegram| {
        Arc::new(TelegramNotifier::new(telegram, http.clone())) as Arc<dyn OrderNotifier>
    });
    let mailer = config
        .mail
        .clone()
        .map(|mail| Arc::new(ResendMailer::new(mail, http.clone())) as Arc<dyn Mailer>);

    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let state = web::Data::new(AppState {
        carts: CartService::new(
            Arc::new(DieselCartRepository::new(pool.clone())),
            openai.clone(),
            openai,
            ShippingRateTable::standard(),
        ),
        orders: OrderService::new(
            Arc::new(DieselOrderRepository::new(pool)),
            users.clone(),
            notifier,
            mailer,
        ),
        users: UserService::new(users),
        catalog: Arc::new(ProductSearchClient::new(&config.search, http.clone())),
        exchange_rates: Arc::new(BanxicoClient::new(config.banxico.clone(), http)),
    });
    let admin_auth =
        web::Data::new(AdminAuth::from_config(&config.admin).expect("Invalid PRIVY_VERIFICATION_KEY"));

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(state, admin_auth, &config.host, config.port)?.await
}
