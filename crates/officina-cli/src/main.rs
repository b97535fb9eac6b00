mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "officina", version, about = "Industrial AI assistant for PLC and automation work")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage chat sessions
    Sessions {
        #[command(subcommand)]
        command: commands::sessions::SessionsCommand,
    },
    /// Manage chat groups
    Groups {
        #[command(subcommand)]
        command: commands::groups::GroupsCommand,
    },
    /// Send a prompt to the assistant and print the reply
    Chat(commands::chat::ChatArgs),
    /// Show curated and installed models
    Models,
    /// Version-control panel against the backend repository
    Git {
        #[command(subcommand)]
        command: commands::git::GitCommand,
    },
    /// Identity against the authenticated backend
    User {
        #[command(subcommand)]
        command: commands::user::UserCommand,
    },
    /// Backup, restore, or wipe local chat data
    Data {
        #[command(subcommand)]
        command: commands::data::DataCommand,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Sessions { command } => commands::sessions::run(command).await,
        Commands::Groups { command } => commands::groups::run(command).await,
        Commands::Chat(args) => commands::chat::run(args).await,
        Commands::Models => commands::models::run().await,
        Commands::Git { command } => commands::git::run(command).await,
        Commands::User { command } => commands::user::run(command).await,
        Commands::Data { command } => commands::data::run(command).await,
    }
}
