use anyhow::{Context, Result};
use logs_viewer_core::LogFiles;
use logs_viewer_server::LogsViewerPlugin;

use crate::config::ServerSettings;

/// Host the viewer routes until Ctrl-C.
pub async fn run_serve(files: LogFiles, settings: &ServerSettings) -> Result<()> {
    let plugin = LogsViewerPlugin::new(files).with_base_url(settings.base_url());
    tracing::info!(
        "reading {} from {}",
        LogsViewerPlugin::NAME,
        plugin.files().dir().display()
    );
    let app = logs_viewer_server::router(&plugin);

    let addr = format!("{}:{}", settings.bind, settings.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
