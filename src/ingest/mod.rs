//! Document ingestion pipeline
//!
//! This module implements the write path of the RAG system:
//! - Text extraction by format (PDF / plain text / markdown)
//! - Normalization of noisy extracted text
//! - Splitting into overlapping chunks
//! - Per-chunk embedding and persistence into the vector store
//!
//! The key resilience property is partial-failure isolation: one bad chunk
//! or one bad file in a batch never aborts its siblings. Every skip is
//! recorded in the [`IngestReport`] returned to the caller.

pub mod chunker;
pub mod extract;
pub mod ingestor;
pub mod normalize;

pub use chunker::chunk;
pub use extract::extract_text;
pub use extract::DocumentFormat;
pub use ingestor::DocumentIngestor;
pub use ingestor::IngestReport;
pub use ingestor::SkippedChunk;
pub use normalize::normalize;

/// Extracted text shorter than this is treated as an extraction failure,
/// not a valid empty document.
pub const MIN_EXTRACTED_CHARS: usize = 10;

/// Normalized chunks shorter than this are discarded as noise and never
/// stored.
pub const MIN_CHUNK_CHARS: usize = 50;
