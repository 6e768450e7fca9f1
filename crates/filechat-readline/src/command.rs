//! Parsing of REPL input lines.

use std::path::PathBuf;

/// Slash commands offered for completion.
pub const COMMANDS: &[&str] = &["/upload", "/clear", "/context", "/history", "/help"];

/// What a single input line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Blank line.
    Empty,
    Quit,
    Help,
    /// Clear the conversation (context stays).
    Clear,
    /// Show the loaded files.
    Context,
    /// Re-render the transcript.
    History,
    /// Replace the context with these files.
    Upload(Vec<PathBuf>),
    /// Anything not starting with `/` goes to the model.
    Prompt(String),
    Unknown(String),
}

pub fn parse_input(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ReplCommand::Empty;
    }
    if trimmed == "quit" || trimmed == "exit" {
        return ReplCommand::Quit;
    }
    // Prompts are sent as typed; trimming only decides what the line is.
    if !trimmed.starts_with('/') {
        return ReplCommand::Prompt(line.to_string());
    }

    let (name, rest) = trimmed
        .split_once(char::is_whitespace)
        .map(|(name, rest)| (name, rest.trim()))
        .unwrap_or((trimmed, ""));

    match name {
        "/quit" | "/exit" => ReplCommand::Quit,
        "/help" => ReplCommand::Help,
        "/clear" => ReplCommand::Clear,
        "/context" => ReplCommand::Context,
        "/history" => ReplCommand::History,
        "/upload" => ReplCommand::Upload(split_paths(rest).into_iter().map(PathBuf::from).collect()),
        _ => ReplCommand::Unknown(name.to_string()),
    }
}

/// Splits on whitespace; double quotes keep paths with spaces together.
fn split_paths(args: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in args.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    paths.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        paths.push(current);
    }
    paths
}
