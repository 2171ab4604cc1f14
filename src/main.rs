use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod error;
mod extract;
mod state;

mod auth {
    pub mod password;
    pub mod token;
}

mod models {
    pub mod admin;
    pub mod category;
    pub mod patch;
    pub mod product;
}

mod repositories {
    pub mod admin;
    pub mod category;
    pub mod product;
}

mod services {
    pub mod auth;
    pub mod categories;
    pub mod products;
}

mod handlers {
    pub mod auth;
    pub mod categories;
    pub mod meta;
    pub mod products;
    pub mod upload;
}

mod middleware_layer {
    pub mod auth;
}

mod validation {
    pub mod category;
    pub mod product;
}

use config::Config;
use state::AppState;

/// Upper bound for request bodies, sized for multi-image uploads.
const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    tracing::info!("✅ Configuration loaded successfully");

    let state = AppState::new(&config).await?;

    db::run_migrations(&state.db).await?;
    tracing::info!("✅ Database migrations applied");

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("Failed to create upload directory: {}", config.upload_dir))?;
    tracing::info!("📦 Upload directory ready: {}", config.upload_dir);

    let mut origins = Vec::with_capacity(config.allowed_origins.len());
    for origin in &config.allowed_origins {
        origins.push(
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid origin in ALLOWED_ORIGINS: {}", origin))?,
        );
    }

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(86400));

    let public_routes = Router::new()
        .route("/", get(handlers::meta::api_index))
        .route("/health", get(handlers::meta::health))
        .route("/api/auth/login", post(handlers::auth::login))
        .route(
            "/api/categories",
            get(handlers::categories::list_categories),
        )
        .route(
            "/api/categories/{id}",
            get(handlers::categories::get_category),
        )
        .route("/api/products", get(handlers::products::list_products))
        .route("/api/products/{id}", get(handlers::products::get_product))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/api/auth/verify", get(handlers::auth::verify))
        .route(
            "/api/categories",
            post(handlers::categories::create_category),
        )
        .route(
            "/api/categories/{id}",
            put(handlers::categories::update_category),
        )
        .route(
            "/api/categories/{id}",
            delete(handlers::categories::delete_category),
        )
        .route("/api/products", post(handlers::products::create_product))
        .route(
            "/api/products/{id}",
            put(handlers::products::update_product),
        )
        .route(
            "/api/products/{id}",
            delete(handlers::products::delete_product),
        )
        .route("/api/upload/single", post(handlers::upload::upload_single))
        .route(
            "/api/upload/multiple",
            post(handlers::upload::upload_multiple),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::auth::require_auth,
        ))
        .with_state(state.clone());

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .nest_service("/uploads", ServeDir::new(&config.upload_dir))
        .fallback(handlers::meta::not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default())
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);
    tracing::info!("📍 Environment: {}", config.app_env);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
