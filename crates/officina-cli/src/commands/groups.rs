//! Group management commands.

use super::app_context;
use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use officina_core::chat::GroupPatch;

#[derive(Subcommand)]
pub enum GroupsCommand {
    /// List all groups with session counts
    List,
    /// Create a group
    New {
        name: String,
        /// Display color (CSS hex)
        #[arg(long, default_value = "#3b82f6")]
        color: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Rename a group
    Rename { id: String, name: String },
    /// Delete a group (fails while sessions still use it)
    Delete { id: String },
}

pub async fn run(command: GroupsCommand) -> Result<()> {
    let ctx = app_context().await?;

    match command {
        GroupsCommand::List => {
            let sessions = ctx.manager.sessions().await;
            for group in ctx.manager.groups().await {
                let used_by = sessions.iter().filter(|s| s.group_id == group.id).count();
                println!(
                    "{}  {} {}  {} session(s){}",
                    group.id.bold(),
                    group.color,
                    group.name,
                    used_by,
                    group
                        .description
                        .as_deref()
                        .map(|d| format!("  - {}", d))
                        .unwrap_or_default()
                );
            }
        }
        GroupsCommand::New {
            name,
            color,
            description,
        } => {
            let group = ctx.manager.create_group(&name, &color, description).await?;
            println!("Created {} ({})", group.id.bold(), group.name);
        }
        GroupsCommand::Rename { id, name } => {
            let group = ctx
                .manager
                .update_group(
                    &id,
                    GroupPatch {
                        name: Some(name),
                        ..Default::default()
                    },
                )
                .await?;
            println!("Renamed {} to '{}'", group.id.bold(), group.name);
        }
        GroupsCommand::Delete { id } => {
            ctx.manager.delete_group(&id).await?;
            println!("Deleted {}", id.bold());
        }
    }
    Ok(())
}
