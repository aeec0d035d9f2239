use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use tripwise::api::AppState;
use tripwise::{PlanService, TripwiseConfig, cache, web};

fn init_tracing(config: &TripwiseConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = TripwiseConfig::load().with_context(|| "Failed to load configuration")?;
    init_tracing(&config);

    cache::init(config.cache_dir()).with_context(|| "Failed to open the provider cache")?;

    let service = PlanService::from_config(&config);
    let state = AppState {
        service: Arc::new(service),
    };

    web::run(config.server.port, state).await
}
