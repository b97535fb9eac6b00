//! One-shot chat against the completion provider.

use super::{AppContext, app_context};
use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use officina_core::chat::group::GROUP_GENERAL;
use officina_core::chat::{ChatMessage, ChatSession, MessageRole, NewSession};
use officina_core::provider::CompletionProvider;
use officina_infrastructure::OllamaClient;
use std::time::Duration;

/// Session titles derived from the first prompt are cut at this length.
const TITLE_LEN: usize = 40;

#[derive(Args)]
pub struct ChatArgs {
    /// Prompt text
    prompt: String,
    /// Session to continue (defaults to the current session; a new one is
    /// created when there is none)
    #[arg(long)]
    session: Option<String>,
    /// Override the session's model for this exchange
    #[arg(long)]
    model: Option<String>,
}

fn title_from_prompt(prompt: &str) -> String {
    let line = prompt.lines().next().unwrap_or(prompt).trim();
    let mut title: String = line.chars().take(TITLE_LEN).collect();
    if line.chars().count() > TITLE_LEN {
        title.push('…');
    }
    title
}

async fn resolve_session(ctx: &AppContext, args: &ChatArgs) -> Result<ChatSession> {
    if let Some(id) = &args.session {
        ctx.manager.switch_session(id).await;
        return match ctx.manager.current_session().await {
            Some(session) if &session.id == id => Ok(session),
            _ => bail!("no session with id '{}'", id),
        };
    }
    if let Some(session) = ctx.manager.current_session().await {
        return Ok(session);
    }

    let session = ctx
        .manager
        .create_session(NewSession {
            title: title_from_prompt(&args.prompt),
            model: ctx.config.default_model.clone(),
            language: ctx.config.language,
            group_id: GROUP_GENERAL.to_string(),
        })
        .await?;
    ctx.manager.switch_session(&session.id).await;
    println!("{}", format!("Started session {}", session.id).dimmed());
    Ok(session)
}

pub async fn run(args: ChatArgs) -> Result<()> {
    let ctx = app_context().await?;
    let session = resolve_session(&ctx, &args).await?;
    let model = args.model.clone().unwrap_or_else(|| session.model.clone());

    let user_message =
        ChatMessage::new(MessageRole::User, &args.prompt).with_language(session.language);
    ctx.manager.add_message(&session.id, user_message).await;

    let history = ctx
        .manager
        .current_session()
        .await
        .context("current session disappeared")?
        .messages;

    let provider = OllamaClient::new(
        &ctx.config.ollama_url,
        Duration::from_secs(ctx.config.request_timeout_secs),
    )?;
    let completion = provider
        .send_message(&model, &history, session.language)
        .await?;

    let reply = ChatMessage::new(MessageRole::Assistant, &completion.message.content)
        .with_model(&model)
        .with_language(session.language);
    ctx.manager.add_message(&session.id, reply).await;

    println!("{}", completion.message.content);
    if let Some(nanos) = completion.total_duration {
        let tokens = completion.eval_count.unwrap_or(0);
        println!(
            "{}",
            format!(
                "[{} | {:.1}s | {} token(s)]",
                model,
                nanos as f64 / 1e9,
                tokens
            )
            .dimmed()
        );
    }
    Ok(())
}
