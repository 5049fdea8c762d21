//! HTTP surface for the agent: `POST /agent`, `GET /healthz`, `GET /llm_ping`.

pub mod dto;
pub mod error;
mod routes;
mod state;

use axum::routing::{get, post};
use axum::Router;
use localrag_agent::Agent;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use error::ServerError;
use state::ServerState;

pub fn router(agent: Agent) -> Router {
    let state = Arc::new(ServerState::new(agent));
    Router::new()
        .route("/agent", post(routes::agent::agent_handler))
        .route("/healthz", get(routes::health::healthz_handler))
        .route("/llm_ping", get(routes::health::llm_ping_handler))
        .with_state(state)
}

pub async fn serve(agent: Agent, addr: SocketAddr) -> Result<(), ServerError> {
    info!(%addr, "Binding REST server");
    let app = router(agent);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!(%addr, "REST server ready to accept connections");

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(ServerError::Serve)
}
