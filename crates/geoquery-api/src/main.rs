use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geoquery_api::{create_router, ApiConfig, AppState};
use geoquery_engine::SpatialEngine;
use geoquery_llm::OpenAiTranslator;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geoquery_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match ApiConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            tracing::error!(
                "Remediation:\n\
                1. Set DATABASE_URL to a PostgreSQL instance with the PostGIS extension available\n\
                2. Optionally set GEOQUERY_PORT, GEOQUERY_CORS_ORIGIN, GEOQUERY_QUERY_TIMEOUT_SECS\n\
                3. Set OPENAI_API_KEY to enable the natural-language query path"
            );
            std::process::exit(1);
        }
    };

    tracing::info!(
        port = config.port,
        hemisphere = %config.engine.hemisphere,
        model = %config.translator.model,
        "Starting geoquery API server"
    );

    let engine = Arc::new(SpatialEngine::new(config.engine.clone()));

    let translator = OpenAiTranslator::new(config.translator.clone());
    if !translator.is_configured() {
        tracing::warn!("OPENAI_API_KEY not set; the /query path will reject requests");
    }

    let state = Arc::new(AppState::new(engine, Arc::new(translator)));

    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let app = create_router(state).layer(cors);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("Listening on {}", addr);
    tracing::info!("Spatial engine session will be created on first request");

    axum::serve(listener, app).await.unwrap();
}
