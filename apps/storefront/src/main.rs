//! # Atelier Storefront Entry Point
//!
//! ```text
//! atelier [--config <path>]
//! ```
//!
//! Without `--config`, `atelier.toml` is looked up in the platform config
//! directory. The actual setup is in lib.rs.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "atelier",
    version,
    about = "Atelier storefront: cart and exchange-rate shell"
)]
struct Cli {
    /// Config file (default: atelier.toml in the platform config directory)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match atelier_storefront::run(cli.config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("atelier: {}", e);
            ExitCode::FAILURE
        }
    }
}
