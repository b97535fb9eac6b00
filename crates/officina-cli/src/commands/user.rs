//! Identity commands against the authenticated backend.

use super::{app_context, backend_client};
use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use officina_infrastructure::auth::AuthClient;

#[derive(Subcommand)]
pub enum UserCommand {
    /// Show the authenticated principal
    Whoami,
    /// Terminate the server-side session
    Logout,
}

pub async fn run(command: UserCommand) -> Result<()> {
    let ctx = app_context().await?;
    let auth = AuthClient::new(backend_client()?, &ctx.config.api_url);

    match command {
        UserCommand::Whoami => match auth.current_user().await? {
            Some(principal) => {
                println!("{} ({})", principal.name.bold(), principal.username);
            }
            None => println!(
                "{} Not authenticated. Log in through the web UI first.",
                "!".yellow()
            ),
        },
        UserCommand::Logout => {
            auth.logout().await?;
            println!("Logged out");
        }
    }
    Ok(())
}
