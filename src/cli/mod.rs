//! Single-user interactive shell.
//!
//! Tasks live in a [`LocalTaskStore`] for the lifetime of the process. Each
//! input line is split into words ([`parser`]), parsed into a [`Command`],
//! executed by the [`Dispatcher`] and printed by the [`Repl`].

pub mod command;
pub mod dispatcher;
pub mod display;
pub mod parser;
pub mod repl;
pub mod store;

pub use command::{Command, CommandError};
pub use dispatcher::{Dispatcher, Reply};
pub use parser::{TokenizeError, split_words, tokenize};
pub use repl::Repl;
pub use store::{LocalStoreError, LocalTask, LocalTaskStore};
