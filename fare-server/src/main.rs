use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fare_server::cache::CachedEstimator;
use fare_server::config::AppConfig;
use fare_server::depots::DepotDirectory;
use fare_server::engine::FareEngine;
use fare_server::estimate::{FareEstimator, GeminiEstimator, PolicyEstimator, PricingPolicy};
use fare_server::tariff::RateCard;
use fare_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Reference data is loaded once; changing it requires a restart
    let depots = DepotDirectory::load(&config.depots_path).expect("Failed to load depots");
    let rate_card = RateCard::load(&config.rate_card_path).expect("Failed to load rate card");

    let estimator: Arc<dyn FareEstimator> = match config.gemini_config() {
        Some(gemini_config) => {
            info!(model = %gemini_config.model, "using Gemini fare estimator");
            let gemini = GeminiEstimator::new(gemini_config, PricingPolicy::default())
                .expect("Failed to create Gemini client");
            Arc::new(CachedEstimator::new(gemini, &config.estimate_cache))
        }
        None => {
            warn!("GEMINI_API_KEY not set, using deterministic policy estimator");
            Arc::new(PolicyEstimator::default())
        }
    };

    let engine = FareEngine::new(depots, rate_card, estimator)
        .with_estimate_timeout(config.estimate_timeout);

    let app = create_router(AppState::new(engine));

    let addr = config.bind_addr;
    info!("Fare server listening on http://{addr}");
    info!("  GET  /health         - Health check");
    info!("  GET  /depots         - List depots");
    info!("  GET  /calculate-fare - Scheduled fare between depots");
    info!("  GET  /stage-fare     - Stage fare for a distance");
    info!("  POST /charter/quote  - Private charter quote");
    info!("  POST /estimate       - Blended fare estimate");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
