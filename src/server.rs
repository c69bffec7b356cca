//! MCP server initialization for stdio and Streamable HTTP transports.
//!
//! Provides [`serve_stdio`] and [`serve_http`] entry points that wire up the
//! session state, the model catalog, and the MCP tool handler into a running
//! server. Both start the idle-session reaper when it is enabled.

use anyhow::Result;
use axum::routing::get;
use axum::Json;
use rmcp::ServiceExt;
use std::sync::Arc;

use crate::tools::ThinkTools;
use thinkwell::catalog::{ModelCatalog, TieredCatalog};
use thinkwell::config::{SessionConfig, ThinkConfig};
use thinkwell::session::service::ThinkingService;
use thinkwell::session::SessionState;

/// Shared setup: session state sized from config, catalog with custom models merged in.
fn setup_service(config: &ThinkConfig) -> ThinkingService {
    if config.storage.enable_persistence {
        tracing::warn!(
            path = ?config.storage.persistence_path,
            "persistence is not supported; session state stays in memory"
        );
    }

    let state = Arc::new(SessionState::new(config.session.max_thoughts_per_session));
    tracing::info!(
        max_thoughts = state.registry().thought_cap(),
        "session state ready"
    );

    let models_path = config.resolved_models_path();
    let catalog: Arc<dyn ModelCatalog> = Arc::new(TieredCatalog::load(models_path.as_deref()));

    let service = ThinkingService::new(state, catalog);
    spawn_reaper(&service, &config.session);
    service
}

/// Periodically flag sessions idle past `timeout_secs` as inactive.
fn spawn_reaper(service: &ThinkingService, config: &SessionConfig) {
    if !config.reaper_enabled {
        return;
    }
    let Ok(timeout) = chrono::Duration::from_std(config.timeout()) else {
        tracing::warn!(timeout_secs = config.timeout_secs, "session timeout out of range, reaper disabled");
        return;
    };

    let service = service.clone();
    let period = config.reaper_interval();
    tracing::info!(?period, timeout_secs = config.timeout_secs, "session reaper started");

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            match service.state().registry().mark_idle(timeout, chrono::Utc::now()) {
                Ok(0) => {}
                Ok(flagged) => tracing::debug!(flagged, "marked idle sessions inactive"),
                Err(e) => {
                    tracing::error!(error = %e, "session reaper stopped");
                    break;
                }
            }
        }
    });
}

/// Start the MCP server over stdio transport.
pub async fn serve_stdio(config: ThinkConfig) -> Result<()> {
    tracing::info!("starting Thinkwell MCP server on stdio");

    let service = setup_service(&config);

    let tools = ThinkTools::new(service);
    let transport = rmcp::transport::stdio();

    let server = tools.serve(transport).await?;
    tracing::info!("MCP server running, waiting for client");

    server.waiting().await?;
    tracing::info!("MCP server shut down");

    Ok(())
}

/// Start the MCP server over Streamable HTTP transport.
pub async fn serve_http(config: ThinkConfig) -> Result<()> {
    let host = config.server.host.clone();
    let port = config.server.port;
    let bind_addr = format!("{host}:{port}");

    tracing::info!(addr = %bind_addr, "starting Thinkwell MCP server on HTTP");

    let service = setup_service(&config);

    let mcp = rmcp::transport::streamable_http_server::StreamableHttpService::new(
        move || Ok(ThinkTools::new(service.clone())),
        rmcp::transport::streamable_http_server::session::local::LocalSessionManager::default()
            .into(),
        Default::default(),
    );

    let router = axum::Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest_service("/mcp", mcp);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "MCP server listening at http://{bind_addr}/mcp");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("shutting down HTTP server");
        })
        .await?;

    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "Thinkwell MCP Server",
        "version": env!("CARGO_PKG_VERSION"),
        "description": env!("CARGO_PKG_DESCRIPTION"),
        "endpoints": { "health": "/health", "mcp": "/mcp" },
        "transport": "Streamable HTTP",
        "protocol": "Model Context Protocol (MCP)",
    }))
}
