pub mod application;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;
pub mod state;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use auth::AdminAuth;
use state::AppState;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    log::info!("Applied {} pending migration(s)", applied.len());
    Ok(())
}

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::misc::root,
        handlers::misc::latest_exchange_rate,
        handlers::misc::stats,
        handlers::products::search_product,
        handlers::products::product_details,
        handlers::users::check_registration,
        handlers::users::register_user,
        handlers::users::get_email,
        handlers::users::update_email,
        handlers::cart::get_cart,
        handlers::cart::add_to_cart,
        handlers::cart::remove_from_cart,
        handlers::cart::update_quantity,
        handlers::orders::create_order,
        handlers::orders::list_user_orders,
        handlers::admin::list_all_orders,
        handlers::admin::get_order,
        handlers::admin::update_order_status,
    ),
    modifiers(&BearerSecurity)
)]
pub struct ApiDoc;

/// Register every route. Expects `web::Data<AppState>` and
/// `web::Data<AdminAuth>` to be registered on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    use handlers::{admin, cart, misc, orders, products, users};

    cfg.route("/", web::get().to(misc::root))
        .service(
            web::scope("/api")
                .route("/searchProduct", web::post().to(products::search_product))
                .route("/productDetails", web::post().to(products::product_details))
                .route("/orders", web::post().to(orders::create_order))
                .route("/orders/{user_id}", web::get().to(orders::list_user_orders))
                .route(
                    "/orders/{order_id}/status",
                    web::put().to(admin::update_order_status),
                )
                .route("/orders_admin/{order_id}", web::get().to(admin::get_order))
                .route("/admin/orders", web::get().to(admin::list_all_orders))
                .route("/exchange-rate/latest", web::get().to(misc::latest_exchange_rate))
                .route("/stats", web::get().to(misc::stats)),
        )
        .service(
            web::scope("/user")
                .route("", web::post().to(users::register_user))
                .route("/check", web::get().to(users::check_registration))
                .route("/email", web::get().to(users::get_email))
                .route("/email", web::put().to(users::update_email)),
        )
        .service(
            web::scope("/cart")
                .route("/{user_id}", web::get().to(cart::get_cart))
                .route("/{user_id}", web::post().to(cart::add_to_cart))
                .route("/{user_id}/{asin}", web::delete().to(cart::remove_from_cart))
                .route("/{user_id}/{asin}", web::put().to(cart::update_quantity)),
        );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: web::Data<AppState>,
    admin_auth: web::Data<AdminAuth>,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let openapi = ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(admin_auth.clone())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            .configure(configure)
    })
    .bind((host.to_string(), port))?
    .run())
}
