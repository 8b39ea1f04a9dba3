mod commands;
mod console;
mod editor;
mod media;
mod notify;
mod render;
mod reviews;
mod search;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use flowadmin_client::AdminClient;
use flowadmin_core::SessionStore;
use tracing_subscriber::EnvFilter;

use crate::commands::{MediaCommands, ProductsCommands, ReviewsCommands};
use crate::console::Console;
use crate::notify::{Confirm, FixedAnswer, StdinConfirm, TerminalNotifier};

#[derive(Debug, Parser)]
#[command(name = "flowadmin")]
#[command(about = "Flow Hydration catalog admin console")]
struct Cli {
    /// Answer yes to every confirmation prompt
    #[arg(long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Store an admin token and verify it against the server
    Login {
        #[arg(long, env = "FLOWADMIN_TOKEN", hide_env_values = true)]
        token: String,
    },
    /// Forget the stored token
    Logout,
    /// Show the signed-in admin
    Whoami,
    /// Catalog counters
    Stats,
    /// Load sample products into the database
    Seed,
    /// Product catalog
    Products {
        #[command(subcommand)]
        command: ProductsCommands,
    },
    /// Product media (max 3 per product)
    Media {
        #[command(subcommand)]
        command: MediaCommands,
    },
    /// Product reviews
    Reviews {
        #[command(subcommand)]
        command: ReviewsCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = flowadmin_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, host = %config.host, api = %config.endpoints.api_base, "configuration loaded");

    let client = AdminClient::new(config.endpoints.clone(), &config.user_agent)?;
    let confirm: Box<dyn Confirm> = if cli.yes {
        Box::new(FixedAnswer(true))
    } else {
        Box::new(StdinConfirm)
    };
    let mut console = Console::new(
        client,
        SessionStore::new(config.session_path.clone()),
        Arc::new(TerminalNotifier),
        confirm,
    );

    match cli.command {
        Commands::Login { token } => commands::run_login(&mut console, &token).await,
        Commands::Logout => {
            console.logout();
            println!("signed out");
            Ok(())
        }
        Commands::Whoami => commands::run_whoami(&mut console).await,
        Commands::Stats => commands::run_stats(&mut console).await,
        Commands::Seed => commands::run_seed(&mut console).await,
        Commands::Products { command } => commands::run_products(&mut console, command).await,
        Commands::Media { command } => commands::run_media(&mut console, command).await,
        Commands::Reviews { command } => commands::run_reviews(&mut console, command).await,
    }
}
