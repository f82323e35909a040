//! RAG (Retrieval-Augmented Generation) module
//!
//! End-to-end question answering over ingested documents:
//! - Semantic retrieval using vector embeddings with a similarity gate
//! - Persona-conditioned prompt construction with numbered citations
//! - LLM-based answer generation
//!
//! # Examples
//!
//! ```rust,no_run
//! use docrag::config::AppConfig;
//! use docrag::persona::Persona;
//! use docrag::rag::RagService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let service = RagService::from_config(&config).await?;
//!
//!     let response = service
//!         .answer_query("What is the refund policy?", Persona::Expert)
//!         .await?;
//!     println!("Answer: {}", response.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod pipeline;
pub mod retriever;
pub mod synthesizer;

pub use pipeline::RagResponse;
pub use pipeline::RagService;
pub use retriever::Retrieval;
pub use retriever::Retriever;
pub use synthesizer::AnswerSynthesizer;

use serde::Deserialize;
use serde::Serialize;

/// Whether an answer was grounded in retrieved document context or
/// generated as a direct conversational reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerMode {
    /// Retrieved context was injected into the prompt. Serialized as
    /// `"rag"` on the wire.
    #[serde(rename = "rag")]
    Grounded,
    /// No sufficiently relevant context; conversational fallback.
    #[serde(rename = "direct")]
    Direct,
}

/// Citation metadata attached to every stored chunk. Immutable after
/// ingestion, used only for citation display and traceability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Source document identifier (the ingested filename).
    pub source: String,
    /// Zero-based position of this chunk within its source.
    pub chunk_index: usize,
    /// How many chunks the source produced in total.
    pub total_chunks: usize,
    /// Normalized character length of the chunk content.
    pub char_length: usize,
}

/// A chunk as persisted by ingestion: content, citation metadata and the
/// embedding vector computed once at ingestion time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub content: String,
    pub metadata: ChunkMetadata,
    pub embedding: Vec<f32>,
}

/// A retrieved chunk with its similarity score, as returned by the vector
/// store in descending-similarity order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub content: String,
    pub metadata: ChunkMetadata,
    pub similarity: f32,
}
