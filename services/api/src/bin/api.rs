//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{DisabledMailer, HttpMailer},
    config::Config,
    error::ApiError,
    web::{api_router, ApiDoc, AppState},
};
use axum::{extract::DefaultBodyLimit, Router};
use std::sync::Arc;
use techpro_core::ports::Mailer;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Prepare the Data Directory ---
    tokio::fs::create_dir_all(&config.data_dir).await?;
    info!("Data directory ready at {}", config.data_dir.display());

    // --- 3. Select the Mail Adapter ---
    let mailer: Arc<dyn Mailer> = match &config.mail {
        Some(mail_config) => {
            info!("Email service configured for {}", mail_config.from_address);
            Arc::new(HttpMailer::new(mail_config.clone()))
        }
        None => {
            warn!("Email service not configured. Verification emails will be skipped.");
            Arc::new(DisabledMailer)
        }
    };

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState::new(config.clone(), mailer));

    // --- 5. Create the Web Router ---
    // The admin pages are served from arbitrary origins during development.
    let cors = CorsLayer::permissive();

    let api = api_router(app_state)
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(cors);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
