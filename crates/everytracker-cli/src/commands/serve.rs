use crate::output::Output;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use tokio::net::TcpListener;
use tracker_config::PathManager;
use tracker_server::{AppState, DEFAULT_SEARCH_COUNT};
use tracker_sources::SourceFactoryRegistry;

pub async fn run_serve(host: Option<String>, port: Option<u16>, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let mut config = super::load_config(&paths)?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let store = super::open_store(&config, &paths)?;
    let sources = SourceFactoryRegistry::new()
        .create_all_sources(&config)
        .map_err(|e| eyre!("Failed to create sources: {}", e))?;
    if sources.is_empty() {
        output.warn("No remote sources are enabled; sync and search endpoints will return 404");
    }

    let search_count = config
        .anilist
        .as_ref()
        .map(|a| a.search_limit)
        .unwrap_or(DEFAULT_SEARCH_COUNT);

    tracing::info!(
        operation = "serve_start",
        host = %config.server.host,
        port = config.server.port,
        database = %config.database_path(&paths).display(),
        sources = ?config.configured_sources(),
        "Starting server"
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", addr))?;

    output.success(format!("Serving on http://{}", addr));
    let state = AppState::new(store, sources).with_default_search_count(search_count);
    tracker_server::serve(listener, state)
        .await
        .wrap_err("Server error")?;

    output.info("Server stopped");
    Ok(())
}
