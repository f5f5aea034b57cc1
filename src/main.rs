use flag_evaluator::{config::Config, repository::sample, routes, state::AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let state = AppState::in_memory(config.api_key.as_str());

    if config.load_sample_data {
        sample::load(state.flags.as_ref(), state.environments.as_ref())?;
        info!("sample data loaded");
    }

    let app = routes::routes(state);

    let listener = tokio::net::TcpListener::bind(config.addr()).await?;

    info!("server is listening at http://{}", config.addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
