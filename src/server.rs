//! Web server initialization.
//!
//! Wires the database, lexicon, and chat provider into an axum router and
//! serves the JSON API until ctrl-c.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;

use crate::analysis::Lexicon;
use crate::api;
use crate::chat::{self, ChatProvider};
use crate::config::CogitoConfig;
use crate::db;

/// Shared state for all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<rusqlite::Connection>>,
    pub lexicon: Arc<Lexicon>,
    pub config: Arc<CogitoConfig>,
    pub provider: Arc<ChatProvider>,
}

/// Build the API router over the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/thoughts", get(api::list_thoughts).post(api::create_thought))
        .route(
            "/thoughts/{id}",
            get(api::get_thought)
                .put(api::update_thought)
                .delete(api::delete_thought),
        )
        .route("/thoughts/{id}/analysis", get(api::thought_analysis))
        .route("/stats", get(api::stats))
        .route("/chat", post(api::chat))
        .with_state(state)
}

/// Open the database and start serving the JSON API.
pub async fn serve(config: CogitoConfig) -> Result<()> {
    let host = config.server.host.clone();
    let port = config.server.port;
    let bind_addr = format!("{host}:{port}");

    let db_path = config.resolved_db_path();
    let conn = db::open_database(&db_path)?;
    tracing::info!(db = %db_path.display(), "database ready");

    let provider = chat::create_provider(&config.chat)?;
    tracing::info!(provider = provider.name(), "chat provider ready");

    let state = AppState {
        db: Arc::new(Mutex::new(conn)),
        lexicon: Arc::new(Lexicon::builtin()),
        config: Arc::new(config),
        provider: Arc::new(provider),
    };

    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "serving JSON API at http://{bind_addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to listen for ctrl-c");
            tracing::info!("shutting down server");
        })
        .await?;

    Ok(())
}
