// src/bin/api_server.rs

use recipe_catalog::infra::{self, config::Config, logging};
use recipe_catalog::transport;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    let config = Config::from_env()?;
    info!(store = ?config.store, bind = %config.bind_addr, "starting recipe catalog");

    // Only misconfiguration is fatal; an unreachable store answers 503 until it recovers.
    let repository = infra::open_repository(&config).await?;
    match repository.list().await {
        Ok(recipes) => info!(
            recipes = recipes.len(),
            categories = recipes
                .iter()
                .map(|r| r.category.as_str())
                .collect::<std::collections::HashSet<_>>()
                .len(),
            "catalog loaded"
        ),
        Err(e) => warn!(error = %e, "could not read catalog at startup"),
    }

    let app_state = transport::http::AppState { repository };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("API server listening on http://{}", listener.local_addr()?);
    info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown signal received");
            }
        })
        .await?;

    info!("graceful shutdown complete");
    Ok(())
}
