//! NepaliStar CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! ns-cli migrate
//!
//! # Create the first super admin
//! ns-cli admin create -u dipesh -e super@nepalistar.com -p 'Str0ngPass' -r super_admin
//!
//! # Deactivate an account
//! ns-cli admin deactivate -u dipesh
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `admin create` - Create admin users
//! - `admin deactivate` - Deactivate an admin account

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ns-cli")]
#[command(author, version, about = "NepaliStar CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin user
    Create {
        /// Admin username
        #[arg(short, long)]
        username: String,

        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin password (hashed before storage)
        #[arg(short, long)]
        password: String,

        /// Admin role (`super_admin`, `admin`, `editor`)
        #[arg(short, long, default_value = "admin")]
        role: String,
    },
    /// Deactivate an admin account (it will no longer authenticate)
    Deactivate {
        /// Admin username
        #[arg(short, long)]
        username: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                username,
                email,
                password,
                role,
            } => {
                commands::admin::create_user(&username, &email, &password, &role).await?;
            }
            AdminAction::Deactivate { username } => {
                commands::admin::deactivate_user(&username).await?;
            }
        },
    }
    Ok(())
}
