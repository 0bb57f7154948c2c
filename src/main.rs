use std::process;

use clap::Parser;
use repo_owners::Cli;

#[tokio::main]
async fn main() {
    // Diagnostics go to stderr, filtered by RUST_LOG and defaulting to "warn",
    // so they never mix with the owner listing on stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = cli.execute().await {
        eprintln!("Error: {e}");

        for cause in e.chain().skip(1) {
            eprintln!("  Caused by: {cause}");
        }

        process::exit(1);
    }
}
