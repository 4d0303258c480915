use anyhow::Result;
use clap::{Parser, Subcommand};
use google_search_mcp::config::{self, Config};
use google_search_mcp::mcp::{self, McpSearchServer};
use google_search_mcp::search::GoogleSearchClient;
use google_search_mcp::usage::{FileUsageStore, QuotaTracker};
use std::process::ExitCode;
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "google-search-mcp")]
#[command(about = "MCP server for Google Custom Search with a local daily quota estimate")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve MCP over stdio (default)
    Serve,
    /// Print today's local usage estimate and exit
    Usage,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Fatal error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env();
    let tracker = QuotaTracker::new(FileUsageStore::resolve(config.usage_dir.as_deref()));

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            if config.credentials().is_none() {
                tracing::warn!(
                    "{} or {} not set; search calls will fail until they are",
                    config::API_KEY_VAR,
                    config::SEARCH_ENGINE_ID_VAR
                );
            }

            let client = GoogleSearchClient::new(config.endpoint.clone(), config.timeout);
            let server = McpSearchServer::new(client, tracker, config.credentials());
            tracing::info!("Google Search MCP server running on stdio");
            server.run_stdio()
        }
        Command::Usage => {
            println!("{}", mcp::tools::format_usage_report(tracker.get_usage()));
            Ok(())
        }
    }
}

/// Logs go to stderr; stdout is reserved for protocol messages.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .init();
}
