//! Backup, restore, and wipe of the local chat store.

use super::app_context;
use anyhow::{Context, Result, bail};
use clap::Subcommand;
use officina_core::chat::ChatExport;
use std::fs;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum DataCommand {
    /// Write the whole store as JSON to a file (or stdout)
    Export {
        /// Destination file; stdout when omitted
        file: Option<PathBuf>,
    },
    /// Load a previously exported JSON file into the store
    Import { file: PathBuf },
    /// Remove all sessions, groups, and the current-session pointer
    Clear {
        /// Required confirmation
        #[arg(long)]
        yes: bool,
    },
}

pub async fn run(command: DataCommand) -> Result<()> {
    let ctx = app_context().await?;

    match command {
        DataCommand::Export { file } => {
            let export = ctx.store.export_data().await?;
            let json = serde_json::to_string_pretty(&export)?;
            match file {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("failed to write {:?}", path))?;
                    println!(
                        "Exported {} session(s) and {} group(s) to {:?}",
                        export.sessions.len(),
                        export.groups.len(),
                        path
                    );
                }
                None => println!("{}", json),
            }
        }
        DataCommand::Import { file } => {
            let json = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {:?}", file))?;
            let export: ChatExport =
                serde_json::from_str(&json).context("invalid export file")?;
            let (sessions, groups) = (export.sessions.len(), export.groups.len());
            ctx.store.import_data(export).await?;
            println!("Imported {} session(s) and {} group(s)", sessions, groups);
        }
        DataCommand::Clear { yes } => {
            if !yes {
                bail!("refusing to clear chat data without --yes");
            }
            ctx.store.clear_all().await?;
            println!("Cleared all chat data");
        }
    }
    Ok(())
}
