//! Complete RAG pipeline: Retrieve -> Gate -> Synthesize

use std::sync::Arc;

use tracing::debug;
use tracing::info;

use crate::config::AppConfig;
use crate::embeddings::Embedder;
use crate::embeddings::EmbeddingService;
use crate::errors::Result;
use crate::llm::CompletionService;
use crate::llm::LlmClient;
use crate::persona::Persona;
use crate::rag::AnswerMode;
use crate::rag::AnswerSynthesizer;
use crate::rag::Retriever;
use crate::rag::ScoredChunk;
use crate::store::PgVectorStore;
use crate::store::VectorStore;

/// Complete RAG service: the request-level entry point.
pub struct RagService {
    retriever: Retriever,
    synthesizer: AnswerSynthesizer,
    top_k: usize,
    threshold: f32,
}

impl RagService {
    /// Create a new RAG service from configuration
    ///
    /// # Errors
    /// - Database connection errors
    /// - LLM service configuration errors (missing or invalid LLM config)
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let store: Arc<dyn VectorStore> = Arc::new(PgVectorStore::from_config(config).await?);
        let embedder: Arc<dyn Embedder> = Arc::new(EmbeddingService::new(config));
        let completion: Arc<dyn CompletionService> = Arc::new(LlmClient::from_config(config)?);

        Ok(Self::from_services(
            store,
            embedder,
            completion,
            config.retrieval.top_k,
            config.retrieval.threshold,
        ))
    }

    /// Create from existing services
    pub fn from_services(
        store: Arc<dyn VectorStore>,
        embedder: Arc<dyn Embedder>,
        completion: Arc<dyn CompletionService>,
        top_k: usize,
        threshold: f32,
    ) -> Self {
        Self {
            retriever: Retriever::new(store, embedder),
            synthesizer: AnswerSynthesizer::new(completion),
            top_k,
            threshold,
        }
    }

    /// Answer a query with the service's configured top-k and threshold.
    ///
    /// # Errors
    /// - Retrieval errors (query embedding, similarity search)
    /// - Synthesis errors (completion API failures)
    ///
    /// Errors propagate typed and complete - no partial answers, and no
    /// automatic retries (both embedding and completion are billed
    /// external calls; retrying is the caller's decision).
    pub async fn answer_query(&self, query: &str, persona: Persona) -> Result<RagResponse> {
        self.answer_query_with_options(query, persona, self.top_k, self.threshold)
            .await
    }

    /// Answer a query with explicit retrieval parameters.
    pub async fn answer_query_with_options(
        &self,
        query: &str,
        persona: Persona,
        top_k: usize,
        threshold: f32,
    ) -> Result<RagResponse> {
        info!("Processing query as {}: {}", persona, query);

        debug!("Step 1: Retrieving context");
        let retrieval = self.retriever.retrieve(query, top_k, threshold).await?;

        debug!("Step 2: Synthesizing {:?} answer", retrieval.mode);
        let answer = self
            .synthesizer
            .synthesize(query, retrieval.mode, &retrieval.results, persona)
            .await?;

        info!(
            "Query answered in {:?} mode with {} cited chunks",
            retrieval.mode,
            retrieval.results.len()
        );

        Ok(RagResponse {
            answer,
            mode: retrieval.mode,
            cited: retrieval.results,
        })
    }

    /// Get retriever reference
    pub const fn retriever(&self) -> &Retriever {
        &self.retriever
    }
}

/// RAG response: answer text, gating mode and the chunks cited.
#[derive(Debug, Clone)]
pub struct RagResponse {
    pub answer: String,
    pub mode: AnswerMode,
    pub cited: Vec<ScoredChunk>,
}

impl RagResponse {
    /// Get a formatted string representation for CLI output.
    pub fn format(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Answer:\n{}\n\n", self.answer));

        match self.mode {
            AnswerMode::Grounded => {
                output.push_str(&format!("Sources ({} chunks):\n", self.cited.len()));
                for (idx, chunk) in self.cited.iter().enumerate() {
                    output.push_str(&format!(
                        "  [{}] {} (chunk {}/{}, score {:.2})\n",
                        idx + 1,
                        chunk.metadata.source,
                        chunk.metadata.chunk_index + 1,
                        chunk.metadata.total_chunks,
                        chunk.similarity
                    ));
                }
            }
            AnswerMode::Direct => {
                output.push_str("(answered without document context)\n");
            }
        }

        output
    }
}
