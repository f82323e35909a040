//! docrag - a document RAG (Retrieval-Augmented Generation) pipeline
//!
//! The write path ingests documents (PDF / plain text / markdown), splits
//! them into overlapping chunks, embeds each chunk and persists it into a
//! pgvector-backed store. The read path embeds a query, retrieves the
//! nearest chunks, gates on a similarity threshold and synthesizes a
//! persona-styled, source-cited answer from an LLM.
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
//!         .answer_query("What does chapter 3 cover?", Persona::Teacher)
//!         .await?;
//!     println!("Answer: {}", response.answer);
//!     println!("Mode: {:?}, {} sources", response.mode, response.cited.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod embeddings;
pub mod errors;
pub mod ingest;
pub mod llm;
pub mod logging;
pub mod persona;
pub mod rag;
pub mod store;

pub use config::AppConfig;
pub use errors::*;
