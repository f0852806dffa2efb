//! Runs parsed commands against the local store.

use super::command::Command;
use super::display::{HELP_TEXT, format_task_list};
use super::parser::split_words;
use super::store::{LocalStoreError, LocalTaskStore};

/// What the shell should do after a line has been handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print the text and read the next line.
    Print(String),
    /// Nothing to print.
    Silent,
    /// Stop reading input.
    Exit,
}

/// Owns the store for the lifetime of a shell session.
#[derive(Debug, Default)]
pub struct Dispatcher {
    store: LocalTaskStore,
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn store(&self) -> &LocalTaskStore {
        &self.store
    }

    /// Handles one raw input line. Blank lines are ignored.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        let line = line.trim();
        if line.is_empty() {
            return Reply::Silent;
        }

        match Command::parse(&split_words(line)) {
            Ok(Some(command)) => self.execute(command),
            Ok(None) => Reply::Silent,
            Err(error) => error_reply(&error),
        }
    }

    /// Executes a parsed command.
    pub fn execute(&mut self, command: Command) -> Reply {
        tracing::debug!(?command, "Executing command");

        let result = match command {
            Command::Add { title, description } => self
                .store
                .add(&title, &description)
                .map(|task| format!("Task {} created: {}", task.id, task.title)),
            Command::List => Ok(format_task_list(self.store.list())),
            Command::Done(id) => self
                .store
                .mark_complete(id)
                .map(|_| format!("Task {id} marked complete")),
            Command::Undone(id) => self
                .store
                .mark_incomplete(id)
                .map(|_| format!("Task {id} marked incomplete")),
            Command::Update {
                id,
                title,
                description,
            } => self
                .store
                .update(id, &title, description.as_deref())
                .map(|_| format!("Task {id} updated")),
            Command::Delete(id) => {
                if self.store.delete(id) {
                    Ok(format!("Task {id} deleted"))
                } else {
                    Err(LocalStoreError::NotFound(id))
                }
            }
            Command::Help => Ok(HELP_TEXT.to_string()),
            Command::Exit => return Reply::Exit,
        };

        result.map_or_else(|error| error_reply(&error), Reply::Print)
    }
}

fn error_reply(error: &dyn std::error::Error) -> Reply {
    Reply::Print(format!("Error: {error}"))
}
