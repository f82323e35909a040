//! pgvector-backed chunk store
//!
//! Chunks live in a single `document_chunks` table with a jsonb metadata
//! column and a pgvector embedding column. Similarity is cosine, computed
//! as `1 - (embedding <=> query)`, which is magnitude invariant so raw
//! (unnormalized) embedding vectors are safe to store.

use async_trait::async_trait;
use pgvector::Vector;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use sqlx::Row;
use tracing::debug;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::DocRagError;
use crate::errors::Result;
use crate::rag::ChunkMetadata;
use crate::rag::DocumentChunk;
use crate::rag::ScoredChunk;
use crate::store::VectorStore;

/// A [`VectorStore`] backed by PostgreSQL with the pgvector extension.
pub struct PgVectorStore {
    pool: PgPool,
    dimension: usize,
}

impl PgVectorStore {
    /// Connect using the application configuration.
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections())
            .min_connections(config.min_connections())
            .acquire_timeout(std::time::Duration::from_secs(
                config.database.connection_timeout,
            ))
            .connect(config.database_url())
            .await?;

        Ok(Self {
            pool,
            dimension: config.embedding_dimension(),
        })
    }

    /// Wrap an existing connection pool.
    pub fn from_pool(pool: PgPool, dimension: usize) -> Self {
        Self { pool, dimension }
    }

    /// Create the pgvector extension, chunk table and ANN index if they
    /// do not exist yet.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query("CREATE EXTENSION IF NOT EXISTS vector")
            .execute(&self.pool)
            .await?;

        let create_table = format!(
            "CREATE TABLE IF NOT EXISTS document_chunks (
                id UUID PRIMARY KEY,
                content TEXT NOT NULL,
                metadata JSONB NOT NULL DEFAULT '{{}}'::jsonb,
                embedding vector({dim}) NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
            dim = self.dimension
        );
        sqlx::query(&create_table).execute(&self.pool).await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_document_chunks_embedding
             ON document_chunks USING ivfflat (embedding vector_cosine_ops)",
        )
        .execute(&self.pool)
        .await?;

        debug!("document_chunks schema ready (dimension {})", self.dimension);
        Ok(())
    }

    /// Delete every chunk belonging to a source document.
    pub async fn delete_source(&self, source: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM document_chunks WHERE metadata->>'source' = $1")
            .bind(source)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl VectorStore for PgVectorStore {
    async fn insert(&self, chunk: &DocumentChunk) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let metadata = serde_json::to_value(&chunk.metadata)?;

        sqlx::query(
            "INSERT INTO document_chunks (id, content, metadata, embedding)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(&chunk.content)
        .bind(metadata)
        .bind(Vector::from(chunk.embedding.clone()))
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn nearest_neighbors(&self, embedding: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        let rows = sqlx::query(
            "SELECT content,
                    metadata,
                    1 - (embedding <=> $1) AS similarity
             FROM document_chunks
             ORDER BY embedding <=> $1
             LIMIT $2",
        )
        .bind(Vector::from(embedding.to_vec()))
        .bind(i64::try_from(k).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let content: String = row.try_get("content")?;
            let metadata_json: serde_json::Value = row.try_get("metadata")?;
            // PostgreSQL returns FLOAT8 (f64) from the distance operator
            let similarity: f64 = row.try_get("similarity")?;

            let metadata: ChunkMetadata = serde_json::from_value(metadata_json)
                .map_err(DocRagError::Serialization)?;

            results.push(ScoredChunk {
                content,
                metadata,
                similarity: similarity as f32,
            });
        }

        Ok(results)
    }
}
