//! Semantic retrieval with a similarity-threshold gate

use std::sync::Arc;

use tracing::debug;

use crate::embeddings::Embedder;
use crate::errors::DocRagError;
use crate::errors::Result;
use crate::rag::AnswerMode;
use crate::rag::ScoredChunk;
use crate::store::VectorStore;

/// Outcome of a retrieval: the gating decision plus the chunks that
/// justify it. In direct mode the below-threshold results are discarded,
/// since they will not be injected into the prompt.
#[derive(Debug, Clone)]
pub struct Retrieval {
    pub mode: AnswerMode,
    pub results: Vec<ScoredChunk>,
}

/// Retriever for semantic search over stored chunks
pub struct Retriever {
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn Embedder>,
}

impl Retriever {
    /// Create a new retriever
    pub fn new(store: Arc<dyn VectorStore>, embedder: Arc<dyn Embedder>) -> Self {
        Self { store, embedder }
    }

    /// Embed the query, fetch the top-`k` nearest chunks and apply the
    /// threshold gate.
    ///
    /// Only the top result's score decides the mode: non-empty results
    /// with top score >= `threshold` means grounded, anything else means
    /// direct. The threshold is caller-supplied on purpose - call sites
    /// legitimately differ in how permissive they want retrieval to be.
    ///
    /// # Errors
    /// Embedding or store failures are query-fatal and surface as
    /// [`DocRagError::Retrieval`]; there is no per-item tolerance here
    /// because there is only one query to serve.
    pub async fn retrieve(&self, query: &str, k: usize, threshold: f32) -> Result<Retrieval> {
        debug!("Retrieving top-{} chunks for query: {}", k, query);

        let query_embedding = self
            .embedder
            .embed(query)
            .await
            .map_err(|e| DocRagError::Retrieval(format!("query embedding failed: {e}")))?;

        let results = self
            .store
            .nearest_neighbors(&query_embedding, k)
            .await
            .map_err(|e| DocRagError::Retrieval(format!("similarity search failed: {e}")))?;

        let top_score = results.first().map(|r| r.similarity);
        let grounded = top_score.is_some_and(|score| score >= threshold);
        debug!(
            "Retrieved {} chunks, top score {:?}, threshold {} -> {}",
            results.len(),
            top_score,
            threshold,
            if grounded { "grounded" } else { "direct" }
        );

        if grounded {
            Ok(Retrieval {
                mode: AnswerMode::Grounded,
                results,
            })
        } else {
            Ok(Retrieval {
                mode: AnswerMode::Direct,
                results: Vec::new(),
            })
        }
    }
}
