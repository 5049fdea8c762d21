use super::super::dto::{HealthResponse, PingResponse};
use super::super::state::ServerState;
use super::{api_error, ApiError};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use localrag_core::traits::Generator;
use std::sync::Arc;
use tracing::error;

pub(crate) async fn healthz_handler() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

pub(crate) async fn llm_ping_handler(State(state): State<Arc<ServerState>>) -> Result<Json<PingResponse>, ApiError> {
    let agent = state.agent();
    let outcome = tokio::task::spawn_blocking(move || {
        let generator = agent.generator();
        generator.ping(agent.config().options.timeout).map(|out| (generator.model().to_string(), out))
    })
    .await;
    match outcome {
        Ok(Ok((model, out))) => Ok(Json(PingResponse { ok: true, model, out })),
        Ok(Err(err)) => {
            error!(error = %err, "Generation service ping failed");
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))
        }
        Err(err) => {
            error!(error = %err, "Ping task panicked or was cancelled");
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "internal error"))
        }
    }
}
