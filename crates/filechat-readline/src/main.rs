mod command;
mod helper;
mod presenter;

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tracing_subscriber::EnvFilter;

use filechat_application::{ChatError, ChatService, SessionCache};
use filechat_core::ApiError;
use filechat_core::secret::SecretService;
use filechat_infrastructure::SecretServiceImpl;
use filechat_interaction::GeminiApiClient;

use crate::command::{ReplCommand, parse_input};
use crate::helper::CliHelper;
use crate::presenter::Presenter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Renders a failed submission. Gemini error bodies get a one-line summary.
fn report_chat_error(presenter: &mut Presenter<std::io::Stdout>, err: &ChatError) -> Result<()> {
    presenter.error(&err.to_string())?;
    if let ChatError::Api(api @ ApiError::Http { body, .. }) = err {
        if let Some(detail) = api.detail().filter(|d| d != body) {
            presenter.note(&detail)?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    // ===== Configuration =====
    // A missing key is the only fatal error.
    let config = match SecretServiceImpl::new() {
        Ok(service) => service.load_config().await,
        Err(e) => Err(e),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format!("Configuration error: {e}").red());
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "configuration loaded");

    // ===== Backend Initialization =====
    let client = GeminiApiClient::from_config(&config);
    let service = ChatService::new(Arc::new(client));
    let sessions = SessionCache::new();
    let (session_id, session) = sessions.create().await;

    // ===== REPL Setup =====
    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    let mut presenter = Presenter::stdout();
    presenter.banner(service.model())?;

    // ===== Main REPL Loop =====
    loop {
        let line = match rl.readline(">> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        };

        let command = parse_input(&line);
        if command != ReplCommand::Empty {
            let _ = rl.add_history_entry(line.trim());
        }

        let mut session = session.lock().await;
        match command {
            ReplCommand::Empty => {}
            ReplCommand::Quit => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            ReplCommand::Help => presenter.help()?,
            ReplCommand::Clear => {
                service.clear_conversation(&mut session);
                presenter.success("Conversation cleared.")?;
            }
            ReplCommand::Context => presenter.context(&session.context)?,
            ReplCommand::History => presenter.transcript(session.log.all())?,
            ReplCommand::Upload(paths) if paths.is_empty() => {
                presenter.error("Usage: /upload <path> [<path>...]")?;
            }
            ReplCommand::Upload(paths) => match service.upload_paths(&mut session, &paths).await {
                Ok(summary) => presenter.success(&summary.to_string())?,
                Err(e) => presenter.error(&format!("Error reading files: {e}"))?,
            },
            ReplCommand::Prompt(prompt) => {
                presenter.busy()?;
                match service.submit_prompt(&mut session, &prompt).await {
                    Ok(_) => {
                        if let Some(reply) = session.log.last() {
                            presenter.message(reply)?;
                        }
                    }
                    Err(e) => report_chat_error(&mut presenter, &e)?,
                }
            }
            ReplCommand::Unknown(name) => {
                presenter.note(&format!("Unknown command: {name} (try /help)"))?;
            }
        }
    }

    sessions.remove(&session_id).await;
    Ok(())
}
