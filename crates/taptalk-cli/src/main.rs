//! Terminal entry point - parses flags, wires the board, runs the loop.

mod bootstrap;
mod parser;
mod repl;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interleave with the board output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = parser::Cli::parse();
    let board = bootstrap::bootstrap(&cli)?;
    repl::run(board).await
}
