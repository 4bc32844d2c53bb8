use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use breakwatch_api::api::handlers::scheduler as scheduler_handlers;
use breakwatch_api::config::Config;
use breakwatch_api::infrastructure::repositories::{
    PostgresBreakSessionStore, PostgresNotificationHistoryStore, PostgresShiftRepository,
};
use breakwatch_api::scheduler::{ReminderScheduler, SystemClock, TracingPublisher};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();
    let config = Config::from_env();

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Database connected successfully");

    // Wire the engine: Postgres stores, system clock in the canonical zone,
    // tracing publisher until a realtime transport is attached
    let engine = Arc::new(ReminderScheduler::new(
        Arc::new(PostgresShiftRepository::new(pool.clone())),
        Arc::new(PostgresBreakSessionStore::new(pool.clone())),
        Arc::new(PostgresNotificationHistoryStore::new(pool.clone())),
        Arc::new(TracingPublisher),
        Arc::new(SystemClock::new(config.timezone)),
        config.scheduler(),
    ));

    // Spawn the poll loop
    tokio::spawn(Arc::clone(&engine).run());

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(scheduler_handlers::health_check))
        // Manual trigger: force one evaluation pass now
        .route("/api/scheduler/run", post(scheduler_handlers::run_scheduler))
        // Dry-run evaluation for one agent
        .route(
            "/api/scheduler/agents/:id",
            get(scheduler_handlers::evaluate_agent),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(engine);

    // Start server
    tracing::info!("Server listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
