use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_rest::{build_router, ApiDoc, AppState};
use emrmock_core::{constants, CoreConfig, EmrStore};

/// Main entry point for the EMR mock server
///
/// Simulates an EMR integration endpoint for a clinical-notes capture tool:
/// seeds the in-memory store with demo patients, then serves the REST API
/// (with OpenAPI/Swagger documentation and permissive CORS so a browser
/// extension or web app can call it from any origin).
///
/// # Environment Variables
/// - `EMRMOCK_ADDR`: listen address (default: "127.0.0.1:3001")
/// - `EMRMOCK_API_KEY`: shared secret clients must present
/// - `EMRMOCK_BASE_URL`: public base URL used in endpoint links
/// - `EMRMOCK_OPEN_VIEWER`: set to `0`/`false` to keep note ingestion from
///   opening the viewer page in a browser
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration or server startup fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("emrmock_run=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr =
        std::env::var("EMRMOCK_ADDR").unwrap_or_else(|_| constants::DEFAULT_LISTEN_ADDR.into());
    let api_key =
        std::env::var("EMRMOCK_API_KEY").unwrap_or_else(|_| constants::DEFAULT_API_KEY.into());
    let base_url = std::env::var("EMRMOCK_BASE_URL")
        .unwrap_or_else(|_| constants::DEFAULT_PUBLIC_BASE_URL.into());
    let open_viewer = std::env::var("EMRMOCK_OPEN_VIEWER")
        .map(|value| !matches!(value.trim(), "0" | "false" | "no"))
        .unwrap_or(true);

    let cfg = Arc::new(CoreConfig::new(api_key, base_url, open_viewer)?);
    let store = EmrStore::with_fixtures()?;

    let base = cfg.public_base_url();
    tracing::info!("++ EMR mock server listening on {}", addr);
    tracing::info!("++ API key: \"{}\"", cfg.api_key());
    tracing::info!("++ Patient list (GET):   {}/patients", base);
    tracing::info!("++ Post notes (POST):    {}/notes", base);
    tracing::info!("++ Get summary (GET):    {}/patient-summary/:patientId", base);
    tracing::info!("++ Set summary (POST):   {}/patient-summary/:patientId", base);
    tracing::info!("++ Swagger UI:           {}/swagger-ui", base);
    if open_viewer {
        tracing::info!("Posting a note will open a browser tab displaying it.");
    }

    let app = build_router(AppState { store, cfg })
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
