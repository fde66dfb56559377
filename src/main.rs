//! Ticketry
//!
//! Main application entry point

use std::net::SocketAddr;

use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use ticketry::{
    config::Settings,
    database::{connection::create_pool, DatabaseService},
    middleware::{RateLimitConfig, RateLimiter},
    routes,
    services::ServiceFactory,
    state::AppState,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    logging::init_logging(&settings.logging)?;

    info!("Starting Ticketry API server...");

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = ticketry::database::connection::DatabaseConfig {
        url: settings.database.url.clone(),
        max_connections: settings.database.max_connections,
        min_connections: settings.database.min_connections,
        acquire_timeout: std::time::Duration::from_secs(30),
        idle_timeout: Some(std::time::Duration::from_secs(600)),
        max_lifetime: Some(std::time::Duration::from_secs(1800)),
    };
    let db_pool = create_pool(&db_config).await?;

    // Run database migrations
    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    // Initialize database service
    let database_service = DatabaseService::new(db_pool);

    // Initialize services
    info!("Initializing services...");
    let redis_client = redis::Client::open(settings.redis.url.clone())?;
    let user_repository = database_service.users.clone();
    let services = ServiceFactory::new(settings.clone(), user_repository, redis_client)?;

    let app_state = AppState {
        db: database_service,
        services,
        settings: settings.clone(),
        rate_limiter: RateLimiter::new(RateLimitConfig::default()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(vec![
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ])
        .allow_methods(Any);

    let app = routes::create_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = SocketAddr::new(settings.server.host.parse()?, settings.server.port);
    info!("Ticketry API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    info!("Ticketry API server has been shut down.");

    Ok(())
}
