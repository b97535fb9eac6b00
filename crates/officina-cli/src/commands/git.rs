//! Version-control panel commands.
//!
//! All of these go through the authenticated backend; run
//! `officina user whoami` first to check the session.

use super::{app_context, backend_client};
use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use officina_infrastructure::vcs::VcsClient;

#[derive(Subcommand)]
pub enum GitCommand {
    /// Working-tree status of the backend repository
    Status,
    /// Recent commits
    Log {
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Stage everything and commit
    Commit { message: String },
    /// Push the current branch to origin
    Push,
    /// Pull from origin
    Pull,
    /// List branches
    Branches,
}

fn print_files(label: &str, files: &[String]) {
    if files.is_empty() {
        return;
    }
    println!("  {}:", label);
    for file in files {
        println!("    {}", file);
    }
}

pub async fn run(command: GitCommand) -> Result<()> {
    let ctx = app_context().await?;
    let vcs = VcsClient::new(backend_client()?, &ctx.config.api_url);

    match command {
        GitCommand::Status => {
            let status = vcs.status().await?;
            println!(
                "On branch {} (tracking {}, ahead {}, behind {})",
                status.current.as_deref().unwrap_or("<detached>").bold(),
                status.tracking.as_deref().unwrap_or("-"),
                status.ahead,
                status.behind
            );
            if !status.is_dirty() {
                println!("Working tree clean");
                return Ok(());
            }
            print_files("staged", &status.staged);
            print_files("modified", &status.modified);
            print_files("untracked", &status.not_added);
            print_files("created", &status.created);
            print_files("deleted", &status.deleted);
            print_files("conflicted", &status.conflicted);
        }
        GitCommand::Log { limit } => {
            for commit in vcs.commits(limit).await? {
                println!(
                    "{} {} ({}, {})",
                    commit.hash.chars().take(8).collect::<String>().yellow(),
                    commit.message,
                    commit.author_name,
                    commit.date
                );
            }
        }
        GitCommand::Commit { message } => {
            let outcome = vcs.commit(&message).await?;
            println!("Committed {}", outcome.commit.bold());
        }
        GitCommand::Push => {
            vcs.push().await?;
            println!("Pushed");
        }
        GitCommand::Pull => {
            vcs.pull().await?;
            println!("Pulled");
        }
        GitCommand::Branches => {
            let branches = vcs.branches().await?;
            for name in &branches.all {
                let marker = if name == &branches.current { "*" } else { " " };
                println!("{} {}", marker, name);
            }
        }
    }
    Ok(())
}
