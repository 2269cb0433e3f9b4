//! Prompt line for the coach chat.
//!
//! Reads one line at a time from `rustyline_async` and reduces it to what
//! the chat loop acts on: a turn to submit, a blank line to ignore, Ctrl+C,
//! or the end of the conversation.

use console::style;
use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

/// What the chat loop should do with the last read.
#[derive(Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Trimmed, non-empty text for the session or a local control.
    Line(String),
    /// Whitespace only.
    Blank,
    /// Ctrl+C. The chat keeps going.
    Interrupted,
    /// Ctrl+D or a broken terminal.
    Quit,
}

fn interpret(event: Result<ReadlineEvent, ReadlineError>) -> InputEvent {
    match event {
        Ok(ReadlineEvent::Line(line)) => {
            let text = line.trim();
            if text.is_empty() {
                InputEvent::Blank
            } else {
                InputEvent::Line(text.to_string())
            }
        }
        Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
        Ok(ReadlineEvent::Eof) | Err(_) => InputEvent::Quit,
    }
}

/// The "You >" prompt.
pub struct ChatInput {
    rl: Readline,
    last_entry: Option<String>,
}

impl ChatInput {
    /// Open the prompt. The `SharedWriter` prints above it without
    /// garbling a half-typed line.
    pub fn open() -> Result<(Self, SharedWriter), ReadlineError> {
        let prompt = format!("  {} ", style("You >").green().bold());
        let (rl, writer) = Readline::new(prompt)?;
        Ok((
            Self {
                rl,
                last_entry: None,
            },
            writer,
        ))
    }

    /// Wait for the next line. Submitted lines go into the up-arrow
    /// history, skipping an immediate repeat.
    pub async fn read_line(&mut self) -> InputEvent {
        let event = interpret(self.rl.readline().await);
        if let InputEvent::Line(text) = &event {
            if self.last_entry.as_deref() != Some(text.as_str()) {
                self.rl.add_history_entry(text.clone());
                self.last_entry = Some(text.clone());
            }
        }
        event
    }

    /// Wipe the screen after `/clear`.
    pub fn clear(&mut self) {
        let _ = self.rl.clear();
    }

    /// Restore the terminal before exit.
    pub fn flush(&mut self) {
        let _ = self.rl.flush();
    }
}
