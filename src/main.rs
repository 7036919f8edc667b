//! Clubhouse Server - Sports Club Management System
//!
//! A Rust REST API server for sports-club administration.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clubhouse_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::{identity::HttpIdentityProvider, Services},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("clubhouse_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Clubhouse Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // External identity provider used as the sign-in fallback
    let identity = Arc::new(HttpIdentityProvider::new(
        config.auth.identity_provider_url.clone(),
        config.auth.identity_provider_key.clone(),
    ));

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.auth.clone(), &config.storage, identity);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Uploaded files are served publicly under the configured prefix
    let files_dir = ServeDir::new(state.services.storage.root());
    let public_base = state.services.storage.public_base().to_string();

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/login", post(api::auth::login))
        .route("/auth/me", get(api::auth::me))
        // Students
        .route("/students", get(api::students::list_students))
        .route("/students", post(api::students::create_student))
        .route("/students/:id", get(api::students::get_student))
        .route("/students/:id", put(api::students::update_student))
        .route("/students/:id", delete(api::students::delete_student))
        .route(
            "/students/:id/recalculate-payments",
            post(api::students::recalculate_payments),
        )
        .route("/enrollments", post(api::students::enroll_student))
        // Sport branches
        .route("/branches", get(api::branches::list_branches))
        .route("/branches", post(api::branches::create_branch))
        .route("/branches/:id", get(api::branches::get_branch))
        .route("/branches/:id", put(api::branches::update_branch))
        .route("/branches/:id", delete(api::branches::delete_branch))
        // Equipment
        .route("/equipment", get(api::equipment::list_equipment))
        .route("/equipment", post(api::equipment::create_equipment))
        .route("/equipment/:id", get(api::equipment::get_equipment))
        .route("/equipment/:id", put(api::equipment::update_equipment))
        .route("/equipment/:id", delete(api::equipment::delete_equipment))
        .route("/equipment/:id/availability", get(api::equipment::get_availability))
        .route("/equipment/:id/stock", post(api::equipment::add_stock))
        // Assignments
        .route("/assignments", get(api::equipment::list_assignments))
        .route("/assignments", post(api::equipment::create_assignment))
        .route("/assignments/:id/return", post(api::equipment::return_assignment))
        // Payments
        .route("/payments", get(api::payments::list_payments))
        .route("/payments", post(api::payments::create_payment))
        .route("/payments/:id", get(api::payments::get_payment))
        .route("/payments/:id", put(api::payments::update_payment))
        .route("/payments/:id", delete(api::payments::delete_payment))
        // Trainings & attendance
        .route("/trainings", get(api::trainings::list_trainings))
        .route("/trainings", post(api::trainings::create_training))
        .route("/trainings/:id", get(api::trainings::get_training))
        .route("/trainings/:id", put(api::trainings::update_training))
        .route("/trainings/:id", delete(api::trainings::delete_training))
        .route("/trainings/:id/attendance", get(api::trainings::list_attendance))
        .route("/trainings/:id/attendance", post(api::trainings::record_attendance))
        .route("/attendance/:id", delete(api::trainings::delete_attendance))
        // Users
        .route("/users", get(api::users::list_users))
        .route("/users", post(api::users::create_user))
        .route("/users/:id", get(api::users::get_user))
        .route("/users/:id", put(api::users::update_user))
        .route("/users/:id", delete(api::users::delete_user))
        .route("/users/:id/role", put(api::users::update_role))
        // Activity log
        .route("/activity", get(api::activity::list_activity))
        // File storage
        .route("/files", post(api::storage::upload_file))
        .route("/files/:name", delete(api::storage::delete_file))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .nest_service(&public_base, files_dir)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
