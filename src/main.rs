//! Sitepulse CLI entry point.

use clap::Parser;

use sitepulse::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Audit(args) => sitepulse::cli::commands::audit::execute(args, cli.json).await,
        Commands::Providers(args) => {
            sitepulse::cli::commands::providers::execute(args, cli.json).await
        }
    };

    if let Err(err) = result {
        sitepulse::cli::handle_error(err, cli.json);
    }
}
