use clap::Parser;
use docrag::cli::commands::Cli;
use docrag::cli::commands::Commands;
use docrag::cli::handlers;
use docrag::config::AppConfig;
use docrag::logging;
use docrag::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load()?;
    if cli.verbose {
        logging::init_logging_with_level("debug")?;
    } else {
        logging::init_logging_with_config(&config)?;
    }

    match cli.command {
        Commands::Init => handlers::handle_init(&config).await,
        Commands::Ingest { path } => handlers::handle_ingest(&config, &path).await,
        Commands::Ask {
            question,
            persona,
            top_k,
            threshold,
        } => handlers::handle_ask(&config, &question, &persona, top_k, threshold).await,
        Commands::Serve { host, port, cors } => {
            handlers::handle_serve(&config, host, port, cors).await
        }
    }
}
