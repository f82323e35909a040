//! Request handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::error;
use tracing::info;

use crate::api::types::AskRequest;
use crate::api::types::AskResponse;
use crate::api::types::ErrorResponse;
use crate::api::types::HealthResponse;
use crate::persona::Persona;
use crate::rag::RagService;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub rag: Arc<RagService>,
}

/// Health check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Answer a question over the ingested documents
pub async fn ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, (StatusCode, Json<ErrorResponse>)> {
    info!("POST /api/ask: {}", req.query);

    if req.query.trim().is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "query must not be empty",
        ));
    }

    // Persona validation happens here, before any embedding or completion
    // call is made.
    let persona = match req.persona.as_deref() {
        None => Persona::default(),
        Some(name) => name.parse::<Persona>().map_err(|_| {
            error_response(
                StatusCode::NOT_FOUND,
                format!("unknown persona: {name}"),
            )
        })?,
    };

    match state.rag.answer_query(&req.query, persona).await {
        Ok(response) => Ok(Json(AskResponse {
            answer: response.answer,
            mode: response.mode,
            documents: response.cited,
        })),
        Err(e) => {
            error!("Error answering query: {}", e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                e.to_string(),
            ))
        }
    }
}

fn error_response(
    status: StatusCode,
    message: impl Into<String>,
) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}
