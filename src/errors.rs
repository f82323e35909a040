use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocRagError {
    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("Retrieval error: {0}")]
    Retrieval(String),

    #[error("Synthesis error: {0}")]
    Synthesis(String),

    #[error("Unknown persona: {0}")]
    UnknownPersona(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DocRagError>;
