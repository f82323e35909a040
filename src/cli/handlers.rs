//! CLI command handlers

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::api::serve_api;
use crate::config::AppConfig;
use crate::embeddings::Embedder;
use crate::embeddings::EmbeddingService;
use crate::errors::Result;
use crate::ingest::DocumentIngestor;
use crate::persona::Persona;
use crate::rag::RagService;
use crate::store::PgVectorStore;
use crate::store::VectorStore;

/// Create the pgvector schema.
pub async fn handle_init(config: &AppConfig) -> Result<()> {
    let store = PgVectorStore::from_config(config).await?;
    store.init_schema().await?;
    println!("Vector store schema initialized");
    Ok(())
}

/// Ingest a file or directory and print the report.
pub async fn handle_ingest(config: &AppConfig, path: &Path) -> Result<()> {
    let store: Arc<dyn VectorStore> = Arc::new(PgVectorStore::from_config(config).await?);
    let embedder: Arc<dyn Embedder> = Arc::new(EmbeddingService::new(config));
    let ingestor = DocumentIngestor::new(store, embedder, config.ingest.clone());

    info!("Ingesting {}", path.display());
    let report = ingestor.ingest_path(path).await?;

    println!(
        "Done: {} chunks stored, {} skipped",
        report.chunks_stored,
        report.chunks_skipped()
    );
    for skipped in &report.skipped {
        match skipped.chunk_index {
            Some(idx) => println!("  skipped {} chunk {}: {}", skipped.source, idx, skipped.reason),
            None => println!("  skipped {}: {}", skipped.source, skipped.reason),
        }
    }
    Ok(())
}

/// Answer a single question from the command line.
pub async fn handle_ask(
    config: &AppConfig,
    question: &str,
    persona: &str,
    top_k: Option<usize>,
    threshold: Option<f32>,
) -> Result<()> {
    // Validate the persona before building any service.
    let persona: Persona = persona.parse()?;

    let service = RagService::from_config(config).await?;
    let response = service
        .answer_query_with_options(
            question,
            persona,
            top_k.unwrap_or(config.retrieval.top_k),
            threshold.unwrap_or(config.retrieval.threshold),
        )
        .await?;

    println!("{}", response.format());
    Ok(())
}

/// Run the HTTP API server.
pub async fn handle_serve(config: &AppConfig, host: String, port: u16, cors: bool) -> Result<()> {
    serve_api(config, host, port, cors).await
}
