//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "docrag")]
#[command(about = "Ingest documents and ask persona-styled questions over them")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the vector store schema and indexes
    Init,
    /// Ingest a document file or a directory of documents
    Ingest {
        /// Path to a .pdf/.txt/.md file or a directory containing them
        path: PathBuf,
    },
    /// Ask a question over the ingested documents
    Ask {
        /// The question to answer
        question: String,
        /// Answer persona (teacher, student, expert, casual, mentor, austinite)
        #[arg(short, long, default_value = "casual")]
        persona: String,
        /// Number of chunks to retrieve
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
        /// Minimum top-result similarity for grounded mode
        #[arg(short, long)]
        threshold: Option<f32>,
    },
    /// Start the HTTP API server
    Serve {
        /// Host to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to bind
        #[arg(long, default_value = "3000")]
        port: u16,
        /// Enable permissive CORS headers
        #[arg(long)]
        cors: bool,
    },
}
