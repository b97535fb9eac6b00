//! Model catalog and availability.

use super::app_context;
use anyhow::Result;
use colored::Colorize;
use officina_core::models::CURATED_MODELS;
use officina_core::provider::CompletionProvider;
use officina_infrastructure::OllamaClient;
use std::time::Duration;

/// The tags probe only needs a short timeout.
const LIST_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn run() -> Result<()> {
    let ctx = app_context().await?;
    let provider = OllamaClient::new(&ctx.config.ollama_url, LIST_TIMEOUT)?;

    let installed = if provider.check_health().await {
        provider.available_models().await?
    } else {
        println!(
            "{} Ollama is not reachable at {}. Start it with: ollama serve",
            "!".yellow(),
            ctx.config.ollama_url
        );
        Vec::new()
    };

    println!("{}", "Curated models".bold());
    for model in CURATED_MODELS {
        let state = if installed.iter().any(|m| m == model.ollama_name) {
            "installed".green()
        } else {
            "not installed".dimmed()
        };
        let star = if model.recommended { "*" } else { " " };
        println!(
            "{} {:<16} {:<22} {:>6}  {}  {}",
            star,
            model.name.bold(),
            model.ollama_name,
            model.size,
            state,
            model.description
        );
    }

    let extra: Vec<&String> = installed
        .iter()
        .filter(|name| CURATED_MODELS.iter().all(|m| m.ollama_name != name.as_str()))
        .collect();
    if !extra.is_empty() {
        println!("\n{}", "Other installed models".bold());
        for name in extra {
            println!("  {}", name);
        }
    }
    Ok(())
}
