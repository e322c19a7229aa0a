use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::{self, AppState};
use crate::config::ServerConfig;

/// Open the configured repository and serve the API until Ctrl-C.
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let repo = config.open_repo()?;
    let app = api::router(AppState::new(repo));

    let listener = TcpListener::bind(config.bind).await?;
    info!(
        addr = %listener.local_addr()?,
        repo = ?config.repo,
        database = %config.database.display(),
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a signal handler the server simply runs until killed.
        std::future::pending::<()>().await;
    }
}
