//! Web widget: a single page with a query box, plus a small JSON API.
//!
//! ```text
//! GET  /             → widget page
//! POST /             → widget page with the answer (form field `query`)
//! POST /api/ask      → {"answer", "detected_symbol", "tool_calls"}
//! GET  /api/health
//! GET  /favicon.ico  → 204
//! ```

mod api;
mod ui;

pub use ui::escape_html;

use std::future::Future;
use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tracing::info;

use crate::agent::Agent;
use crate::error::AssistantError;

/// Router state injected into every handler. Cheap to clone.
#[derive(Clone)]
pub struct WebState {
    pub agent: Arc<Agent>,
}

impl WebState {
    pub fn new(agent: Agent) -> Self {
        Self {
            agent: Arc::new(agent),
        }
    }
}

/// Build the widget router.
pub fn router(state: WebState) -> Router {
    Router::new()
        .route("/", get(ui::index).post(ui::submit))
        .route("/api/ask", post(api::ask))
        .route("/api/health", get(api::health))
        .route("/favicon.ico", get(|| async { StatusCode::NO_CONTENT }))
        .with_state(state)
}

/// Bind `bind_addr` and serve the widget until `shutdown` resolves.
pub async fn serve<F>(state: WebState, bind_addr: &str, shutdown: F) -> Result<(), AssistantError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(%local_addr, model = %state.agent.model_id(), "web widget listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("web widget shut down");
    Ok(())
}
