//! Document ingestion orchestration
//!
//! Sequences extraction, normalization, chunking, per-chunk embedding and
//! persistence. Failures are accumulated into the returned report rather
//! than thrown: a bad chunk never aborts its siblings, and a bad file
//! never aborts the rest of a batch.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::config::IngestConfig;
use crate::embeddings::Embedder;
use crate::errors::Result;
use crate::ingest::chunker;
use crate::ingest::extract;
use crate::ingest::normalize;
use crate::ingest::MIN_CHUNK_CHARS;
use crate::ingest::MIN_EXTRACTED_CHARS;
use crate::rag::ChunkMetadata;
use crate::rag::DocumentChunk;
use crate::store::VectorStore;

/// A chunk (or whole file) that was skipped during ingestion, with the
/// reason it was skipped.
#[derive(Debug, Clone)]
pub struct SkippedChunk {
    pub source: String,
    /// `None` when the whole file was skipped before chunking.
    pub chunk_index: Option<usize>,
    pub reason: String,
}

/// Accumulated outcome of an ingestion run.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub chunks_stored: usize,
    pub skipped: Vec<SkippedChunk>,
}

impl IngestReport {
    pub fn chunks_skipped(&self) -> usize {
        self.skipped.len()
    }

    /// Fold another report into this one (used for batch ingestion).
    pub fn merge(&mut self, other: IngestReport) {
        self.chunks_stored += other.chunks_stored;
        self.skipped.extend(other.skipped);
    }
}

/// Orchestrates the document write path into the vector store.
pub struct DocumentIngestor {
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn Embedder>,
    config: IngestConfig,
}

impl DocumentIngestor {
    pub fn new(
        store: Arc<dyn VectorStore>,
        embedder: Arc<dyn Embedder>,
        config: IngestConfig,
    ) -> Self {
        Self {
            store,
            embedder,
            config,
        }
    }

    /// Ingest a single document buffer.
    ///
    /// Never fails: unsupported formats, unreadable files and per-chunk
    /// embedding/storage failures are recorded in the report and skipped.
    pub async fn ingest(&self, bytes: &[u8], filename: &str) -> IngestReport {
        let mut report = IngestReport::default();

        let raw = match extract::extract_text(bytes, filename) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Skipping {}: {}", filename, e);
                report.skipped.push(SkippedChunk {
                    source: filename.to_string(),
                    chunk_index: None,
                    reason: e.to_string(),
                });
                return report;
            }
        };

        if raw.chars().count() < MIN_EXTRACTED_CHARS {
            warn!(
                "Skipping {}: extracted only {} characters, treating as extraction failure",
                filename,
                raw.chars().count()
            );
            report.skipped.push(SkippedChunk {
                source: filename.to_string(),
                chunk_index: None,
                reason: format!(
                    "extracted text below {MIN_EXTRACTED_CHARS} characters"
                ),
            });
            return report;
        }

        let normalized = normalize::normalize(&raw);
        let chunks = chunker::chunk(
            &normalized,
            self.config.chunk_size,
            self.config.chunk_overlap,
        );
        let total_chunks = chunks.len();
        debug!("{}: {} chunks from {} chars", filename, total_chunks, normalized.len());

        for (chunk_index, content) in chunks.into_iter().enumerate() {
            if content.len() < MIN_CHUNK_CHARS {
                debug!(
                    "Skipping chunk {} of {}: {} chars below minimum",
                    chunk_index,
                    filename,
                    content.len()
                );
                report.skipped.push(SkippedChunk {
                    source: filename.to_string(),
                    chunk_index: Some(chunk_index),
                    reason: format!("chunk below {MIN_CHUNK_CHARS} characters"),
                });
                continue;
            }

            let embedding = match self.embedder.embed(&content).await {
                Ok(embedding) => embedding,
                Err(e) => {
                    warn!(
                        "Failed to embed chunk {} of {}: {}",
                        chunk_index, filename, e
                    );
                    report.skipped.push(SkippedChunk {
                        source: filename.to_string(),
                        chunk_index: Some(chunk_index),
                        reason: format!("embedding failed: {e}"),
                    });
                    continue;
                }
            };

            let chunk = DocumentChunk {
                metadata: ChunkMetadata {
                    source: filename.to_string(),
                    chunk_index,
                    total_chunks,
                    char_length: content.len(),
                },
                content,
                embedding,
            };

            match self.store.insert(&chunk).await {
                Ok(_) => report.chunks_stored += 1,
                Err(e) => {
                    warn!(
                        "Failed to store chunk {} of {}: {}",
                        chunk_index, filename, e
                    );
                    report.skipped.push(SkippedChunk {
                        source: filename.to_string(),
                        chunk_index: Some(chunk_index),
                        reason: format!("storage failed: {e}"),
                    });
                }
            }
        }

        info!(
            "Ingested {}: {} chunks stored, {} skipped",
            filename,
            report.chunks_stored,
            report.chunks_skipped()
        );
        report
    }

    /// Ingest a file from disk.
    pub async fn ingest_file(&self, path: &Path) -> IngestReport {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match tokio::fs::read(path).await {
            Ok(bytes) => self.ingest(&bytes, &filename).await,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                IngestReport {
                    chunks_stored: 0,
                    skipped: vec![SkippedChunk {
                        source: filename,
                        chunk_index: None,
                        reason: format!("read failed: {e}"),
                    }],
                }
            }
        }
    }

    /// Ingest a file or every regular file in a directory.
    ///
    /// Only listing the directory itself can fail; each entry is ingested
    /// with skip-not-abort semantics.
    pub async fn ingest_path(&self, path: &Path) -> Result<IngestReport> {
        if path.is_file() {
            return Ok(self.ingest_file(path).await);
        }

        let mut report = IngestReport::default();
        let mut entries = tokio::fs::read_dir(path).await?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                files.push(entry.path());
            }
        }
        // Deterministic batch order regardless of directory iteration order.
        files.sort();

        for file in files {
            report.merge(self.ingest_file(&file).await);
        }
        Ok(report)
    }
}
