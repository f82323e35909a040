//! Embeddings generation module
//!
//! Maps text to fixed-length vectors via an HTTP embedding backend
//! (OpenAI-compatible or Ollama). The underlying client is expensive to
//! set up, so [`EmbeddingService`] initializes it lazily exactly once per
//! instance: concurrent first calls converge on a single initialization,
//! and a failed initialization is not cached.
//!
//! # Examples
//!
//! ```rust,no_run
//! use docrag::config::AppConfig;
//! use docrag::embeddings::{Embedder, EmbeddingService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let service = EmbeddingService::new(&config);
//!
//!     let embedding = service.embed("Hello, world!").await?;
//!     println!("Generated embedding with {} dimensions", embedding.len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;

pub use client::EmbeddingClient;
pub use client::EmbeddingProvider;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::errors::Result;

/// Anything that can turn text into a fixed-dimension vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Dimensionality of the vectors this embedder produces.
    fn dimension(&self) -> usize;
}

/// Configuration for embedding generation
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProvider,
    pub model: String,
    pub dimension: usize,
    pub endpoint: String,
    pub api_key: Option<String>,
}

impl EmbeddingConfig {
    pub fn from_app_config(config: &crate::config::AppConfig) -> Self {
        // Determine provider from the configured key/endpoint.
        // Priority: api key sentinel > endpoint domain.
        let embeddings = &config.embeddings;
        let provider = if embeddings.api_key.as_deref() == Some("ollama")
            || embeddings.api_key.is_none()
        {
            EmbeddingProvider::Ollama
        } else if embeddings.endpoint.contains("api.openai.com") {
            EmbeddingProvider::OpenAI
        } else if embeddings.endpoint.contains("localhost") {
            EmbeddingProvider::Ollama
        } else {
            EmbeddingProvider::OpenAI
        };

        Self {
            provider,
            model: embeddings.model.clone(),
            dimension: embeddings.dimension,
            endpoint: embeddings.endpoint.clone(),
            api_key: if provider == EmbeddingProvider::OpenAI {
                embeddings.api_key.clone()
            } else {
                None
            },
        }
    }
}

type ClientFactory = Box<dyn Fn() -> Result<EmbeddingClient> + Send + Sync>;

/// Shared embedding service with guarded one-time client initialization.
///
/// Construction is cheap; the HTTP client is built on the first `embed`
/// call. `OnceCell::get_or_try_init` guarantees concurrent first calls do
/// not race into duplicate initializations, and an error leaves the cell
/// empty so the next call retries instead of caching a broken instance.
pub struct EmbeddingService {
    config: EmbeddingConfig,
    factory: ClientFactory,
    client: OnceCell<EmbeddingClient>,
}

impl EmbeddingService {
    pub fn new(config: &crate::config::AppConfig) -> Self {
        Self::from_config(EmbeddingConfig::from_app_config(config))
    }

    pub fn from_config(config: EmbeddingConfig) -> Self {
        let client_config = config.clone();
        Self::with_factory(
            config,
            Box::new(move || {
                EmbeddingClient::new(
                    client_config.provider,
                    client_config.model.clone(),
                    client_config.endpoint.clone(),
                    client_config.api_key.clone(),
                )
            }),
        )
    }

    fn with_factory(config: EmbeddingConfig, factory: ClientFactory) -> Self {
        Self {
            config,
            factory,
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> Result<&EmbeddingClient> {
        self.client
            .get_or_try_init(|| async {
                debug!(
                    "Initializing embedding client: {:?} model {}",
                    self.config.provider, self.config.model
                );
                (self.factory)()
            })
            .await
    }
}

#[async_trait]
impl Embedder for EmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let client = self.client().await?;
        client.generate(text).await
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }
}
