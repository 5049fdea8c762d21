use super::super::dto::{AgentParams, AgentRequest, AgentResponse};
use super::super::state::ServerState;
use super::{api_error, ApiError};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use tracing::{error, info};

pub(crate) async fn agent_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<AgentParams>,
    payload: Result<Json<AgentRequest>, JsonRejection>,
) -> Result<Json<AgentResponse>, ApiError> {
    let Json(AgentRequest { query }) = payload.map_err(|rejection| {
        error!(error = %rejection, "Rejecting malformed /agent request");
        api_error(rejection.status(), rejection.body_text())
    })?;
    info!(debug = params.debug, query_chars = query.len(), "Received /agent request");

    if query.trim().is_empty() {
        error!("Rejecting /agent request due to empty query");
        return Err(api_error(StatusCode::BAD_REQUEST, "query cannot be empty"));
    }

    let agent = state.agent();
    let outcome = tokio::task::spawn_blocking(move || agent.ask(&query)).await;
    match outcome {
        Ok(Ok(answer)) => {
            info!(
                iterations = answer.iterations.len(),
                sources = answer.sources.len(),
                confidence = answer.confidence,
                "Agent run completed successfully"
            );
            Ok(Json(AgentResponse::from_answer(answer, params.debug)))
        }
        Ok(Err(err)) => {
            error!(error = %err, "Agent run failed");
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))
        }
        Err(err) => {
            error!(error = %err, "Agent task panicked or was cancelled");
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "internal error"))
        }
    }
}
