//! Vector store abstraction
//!
//! The store is the single source of truth for persisted chunks. The core
//! only depends on two operations: insert and nearest-neighbor search. The
//! production implementation is PostgreSQL with the pgvector extension;
//! tests substitute an in-memory mock.

pub mod pgvector;

pub use pgvector::PgVectorStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::Result;
use crate::rag::DocumentChunk;
use crate::rag::ScoredChunk;

/// Insert and nearest-neighbor search over embedded chunks.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Persist a chunk with its embedding. Returns the stored row id.
    async fn insert(&self, chunk: &DocumentChunk) -> Result<Uuid>;

    /// Return up to `k` stored chunks nearest to `embedding`, ordered by
    /// descending similarity. Callers apply their own threshold gate on
    /// the returned scores.
    async fn nearest_neighbors(&self, embedding: &[f32], k: usize) -> Result<Vec<ScoredChunk>>;
}
