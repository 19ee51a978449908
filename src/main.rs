use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod db;
mod state;

use docsearch_backend::config;
use docsearch_backend::search::{MySqlStore, SearchService};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docsearch_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration / 加载配置
    let app_config = config::load_config().map_err(anyhow::Error::msg)?;
    tracing::info!("Server will listen on {}:{}", app_config.server.host, app_config.server.port);
    tracing::info!(
        "Search settings: page_size={}, min_word_len={}",
        app_config.search.page_size,
        app_config.search.min_word_len
    );

    // Pool connects on first use, an unreachable database fails requests, not startup
    let store = MySqlStore::connect_lazy(&app_config.database, &app_config.get_database_url())?;

    if app_config.database.create_schema {
        if let Err(e) = db::ensure_schema(store.pool()).await {
            tracing::warn!("Failed to create database schema: {}", e);
        }
    }

    let state = Arc::new(AppState {
        search: SearchService::new(
            Arc::new(store.clone()),
            app_config.search.clone(),
            app_config.links.clone(),
        ),
        site: app_config.site.clone(),
    });

    let app = api::routes(state);

    let bind_addr = app_config.get_bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server running at http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    store.close().await;
    Ok(())
}
