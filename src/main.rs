// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! DevAtlas API Server
//!
//! Serves the course catalog: signup/login, course metadata and
//! course outline uploads.

use devatlas_api::{config::Config, db::CatalogDb, services::UploadStore, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Missing JWT_KEY or GCP_PROJECT_ID aborts startup here
    let config = Config::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
    })?;
    tracing::info!(port = config.port, "Starting DevAtlas API");

    let db = CatalogDb::new(&config.gcp_project_id, &config.firestore_database).await?;

    let uploads = UploadStore::new(&config.uploads_dir);
    uploads.ensure_directories().await?;
    tracing::info!(path = %config.uploads_dir.display(), "Upload storage ready");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        uploads,
    });

    // Build router
    let app = devatlas_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("devatlas_api=debug".parse().expect("static directive"))
                .add_directive("info".parse().expect("static directive")),
        )
        .with(format)
        .init();
}
