//! appcatalog - serve a browsable catalog of .ipa bundles

use anyhow::Context;
use appcatalog_bundle::Catalog;
use appcatalog_logging::{LogLevel, ReloadHandle, init_logging};
use appcatalog_server::{AppState, Cli, Limits, ShutdownHandle, Templates, router};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(LogLevel::Info);

    let config = cli.resolve_config().context("invalid configuration")?;
    ReloadHandle::global()
        .reload_level(config.level()?)
        .map_err(anyhow::Error::msg)?;

    let catalog = Catalog::new(&config.ipa_dir);
    let templates = Templates::new().context("failed to compile page templates")?;
    let app = router(AppState::new(catalog, templates), Limits::from(&config));

    let address = config.listen_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!(
        address = %address,
        dir = %config.ipa_dir.display(),
        "app catalog listening"
    );

    let shutdown = ShutdownHandle::new();
    shutdown.listen_for_signals();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.wait())
        .await
        .context("server error")?;

    tracing::info!("app catalog stopped");
    Ok(())
}
