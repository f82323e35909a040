//! API request and response types

use serde::Deserialize;
use serde::Serialize;

use crate::rag::AnswerMode;
use crate::rag::ScoredChunk;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Ask request: the query plus an optional persona identifier.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub query: String,
    #[serde(default)]
    pub persona: Option<String>,
}

/// Ask response: the answer, the gating mode and the cited documents.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub mode: AnswerMode,
    pub documents: Vec<ScoredChunk>,
}

/// Error payload returned with a non-2xx status.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
