use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use chat_gateway::config::Config;
use chat_gateway::routes::create_router;
use chat_gateway::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("chat_gateway=debug,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let bind_addr = config.bind_addr;
    let state = Arc::new(AppState::new(config)?);

    // Sweep idle sessions so the store does not grow without bound.
    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(Duration::from_secs(600));
        loop {
            tick.tick().await;
            let purged = sessions.purge_expired().await;
            if purged > 0 {
                tracing::debug!(purged, "removed expired sessions");
            }
        }
    });

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!(%bind_addr, "chat gateway listening");
    axum::serve(listener, app).await?;

    Ok(())
}
