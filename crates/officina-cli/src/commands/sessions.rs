//! Session management commands.

use super::app_context;
use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use officina_core::chat::group::GROUP_GENERAL;
use officina_core::chat::{Language, NewSession, SessionPatch};
use std::str::FromStr;

#[derive(Subcommand)]
pub enum SessionsCommand {
    /// List all sessions
    List,
    /// Create a session and select it
    New {
        title: String,
        /// Model tag (defaults to the configured model)
        #[arg(long)]
        model: Option<String>,
        /// Interface language: it or en (defaults to the configured one)
        #[arg(long)]
        language: Option<String>,
        /// Owning group id
        #[arg(long, default_value = GROUP_GENERAL)]
        group: String,
    },
    /// Delete a session
    Delete { id: String },
    /// Rename a session
    Rename { id: String, title: String },
    /// Select the current session
    Switch { id: String },
}

pub async fn run(command: SessionsCommand) -> Result<()> {
    let ctx = app_context().await?;

    match command {
        SessionsCommand::List => {
            let current_id = ctx.manager.current_session().await.map(|s| s.id);
            let sessions = ctx.manager.sessions().await;
            if sessions.is_empty() {
                println!("No sessions yet. Create one with `officina sessions new <title>`.");
                return Ok(());
            }
            for session in sessions {
                let marker = if current_id.as_deref() == Some(&session.id) {
                    "*".green().to_string()
                } else {
                    " ".to_string()
                };
                println!(
                    "{} {}  {}  [{} | {}]  {} message(s)  updated {}",
                    marker,
                    session.id.bold(),
                    session.title,
                    session.model,
                    session.language,
                    session.messages.len(),
                    session.updated_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        SessionsCommand::New {
            title,
            model,
            language,
            group,
        } => {
            let language = match language {
                Some(tag) => Language::from_str(&tag)
                    .with_context(|| format!("unknown language '{}', expected it or en", tag))?,
                None => ctx.config.language,
            };
            let session = ctx
                .manager
                .create_session(NewSession {
                    title,
                    model: model.unwrap_or_else(|| ctx.config.default_model.clone()),
                    language,
                    group_id: group,
                })
                .await?;
            ctx.manager.switch_session(&session.id).await;
            println!("Created {} ({})", session.id.bold(), session.title);
        }
        SessionsCommand::Delete { id } => {
            ctx.manager.delete_session(&id).await?;
            println!("Deleted {}", id.bold());
        }
        SessionsCommand::Rename { id, title } => {
            let session = ctx
                .manager
                .update_session(
                    &id,
                    SessionPatch {
                        title: Some(title),
                        ..Default::default()
                    },
                )
                .await?;
            println!("Renamed {} to '{}'", session.id.bold(), session.title);
        }
        SessionsCommand::Switch { id } => {
            ctx.manager.switch_session(&id).await;
            match ctx.manager.current_session().await {
                Some(session) if session.id == id => {
                    println!("Now on {} ({})", session.id.bold(), session.title)
                }
                _ => println!("{} No session with id '{}'", "!".yellow(), id),
            }
        }
    }
    Ok(())
}
