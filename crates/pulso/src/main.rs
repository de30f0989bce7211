// SPDX-FileCopyrightText: 2026 Pulso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pulso - social interaction analytics service.
//!
//! This is the binary entry point for the Pulso service.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod serve;
mod stats;

/// Pulso - social interaction analytics service.
#[derive(Parser, Debug)]
#[command(name = "pulso", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the webhook server.
    Serve,
    /// Print dashboard aggregates for the stored interactions.
    Stats,
    /// Print the externally visible webhook address.
    WebhookUrl,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match pulso_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            pulso_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Stats) => stats::run_stats(&config).await,
        Some(Commands::WebhookUrl) => {
            println!("{}", serve::webhook_url(&config));
            Ok(())
        }
        None => {
            println!("pulso: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
