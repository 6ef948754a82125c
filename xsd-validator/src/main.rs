use anyhow::Result;
use clap::{Parser, Subcommand};
use xsd_validator::{check, server};

#[derive(Debug, Parser)]
#[command(name = "xsd-validator")]
#[command(about = "XSD Validator - HTTP function validating XML documents against XSD schemas", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// [Server] Start the HTTP validation function
    #[command(alias = "server")]
    #[command(display_order = 1)]
    Serve(server::ServerArgs),

    /// [CLI] Validate local files without a server
    #[command(display_order = 10)]
    Check(check::Check),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            tracing::info!("Starting xsd-validator server");
            server::run(args).await
        }
        Commands::Check(cmd) => check::handle(cmd),
    }
}
