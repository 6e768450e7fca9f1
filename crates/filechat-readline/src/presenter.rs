//! Terminal rendering of the transcript and status feedback.

use std::io::{self, Write};

use colored::Colorize;
use filechat_core::{ContextStore, ConversationMessage, MessageRole};

/// Writes colored output for the REPL.
///
/// Generic over the writer so tests can render into a buffer.
pub struct Presenter<W: Write> {
    out: W,
}

impl Presenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Presenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn banner(&mut self, model: &str) -> io::Result<()> {
        writeln!(self.out, "{}", "=== filechat ===".bright_magenta().bold())?;
        writeln!(self.out, "{}", format!("Model: {model}").bright_black())?;
        writeln!(
            self.out,
            "{}",
            "Upload PDF or TXT files with '/upload <path>...', then ask about them. '/help' lists commands."
                .bright_black()
        )?;
        writeln!(self.out)
    }

    pub fn help(&mut self) -> io::Result<()> {
        let lines = [
            ("/upload <path>...", "replace the file context with these PDF/TXT files"),
            ("/context", "show the files currently used as context"),
            ("/history", "show the conversation so far"),
            ("/clear", "clear the conversation (files stay loaded)"),
            ("quit", "exit"),
        ];
        for (command, description) in lines {
            writeln!(self.out, "  {:<20} {}", command.bright_cyan(), description.bright_black())?;
        }
        Ok(())
    }

    pub fn message(&mut self, message: &ConversationMessage) -> io::Result<()> {
        match message.role {
            MessageRole::User => {
                writeln!(self.out, "{}", format!("> {}", message.content).green())?;
            }
            MessageRole::Assistant => {
                for line in message.content.lines() {
                    writeln!(self.out, "{}", line.bright_blue())?;
                }
                writeln!(self.out)?;
            }
        }
        Ok(())
    }

    /// Redraws every message in order.
    pub fn transcript(&mut self, messages: &[ConversationMessage]) -> io::Result<()> {
        if messages.is_empty() {
            return self.note("No messages yet.");
        }
        for message in messages {
            self.message(message)?;
        }
        Ok(())
    }

    pub fn context(&mut self, context: &ContextStore) -> io::Result<()> {
        if context.is_empty() {
            return self.note("No files loaded.");
        }
        writeln!(
            self.out,
            "{}",
            format!(
                "{} file(s), {} characters of context:",
                context.file_names().len(),
                context.char_count()
            )
            .bright_yellow()
        )?;
        for name in context.file_names() {
            writeln!(self.out, "  {}", format!("- {name}").yellow())?;
        }
        Ok(())
    }

    /// Shown while a request is in flight.
    pub fn busy(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "Generating response...".bright_black())?;
        self.out.flush()
    }

    pub fn success(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text.bright_green())
    }

    pub fn note(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text.bright_black())
    }

    pub fn error(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text.red())
    }
}
