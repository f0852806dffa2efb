//! Shell commands and their argument validation.

use thiserror::Error;

/// Errors raised while turning words into a [`Command`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The task ID argument is missing or not a positive integer.
    #[error("Invalid task ID. Please enter a positive number.")]
    InvalidTaskId,

    /// The title argument is missing or blank.
    #[error("Title cannot be empty")]
    EmptyTitle,

    /// The command word is not recognised.
    #[error("Unknown command '{0}'. Type 'help' for available commands.")]
    Unknown(String),
}

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `add <title> [description]`
    Add {
        title: String,
        description: String,
    },
    /// `list`
    List,
    /// `done <id>`
    Done(u64),
    /// `undone <id>`
    Undone(u64),
    /// `update <id> <title> [description]`
    ///
    /// An omitted description leaves the stored one unchanged.
    Update {
        id: u64,
        title: String,
        description: Option<String>,
    },
    /// `delete <id>`
    Delete(u64),
    /// `help`
    Help,
    /// `exit` or `quit`
    Exit,
}

impl Command {
    /// Parses a command from its words.
    ///
    /// The command word is matched case-insensitively; extra arguments are
    /// ignored. Returns `Ok(None)` for an empty word list.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` when the command is unknown or an argument
    /// fails validation. For `update` the ID is checked before the title.
    pub fn parse(words: &[String]) -> Result<Option<Self>, CommandError> {
        let Some((name, arguments)) = words.split_first() else {
            return Ok(None);
        };

        let command = match name.to_lowercase().as_str() {
            "add" => {
                let title = arguments.first().ok_or(CommandError::EmptyTitle)?;
                Self::Add {
                    title: title.clone(),
                    description: arguments.get(1).cloned().unwrap_or_default(),
                }
            }
            "list" => Self::List,
            "done" => Self::Done(task_id_argument(arguments)?),
            "undone" => Self::Undone(task_id_argument(arguments)?),
            "update" => {
                let id = task_id_argument(arguments)?;
                let title = arguments
                    .get(1)
                    .filter(|title| !title.trim().is_empty())
                    .ok_or(CommandError::EmptyTitle)?;
                Self::Update {
                    id,
                    title: title.clone(),
                    description: arguments.get(2).cloned(),
                }
            }
            "delete" => Self::Delete(task_id_argument(arguments)?),
            "help" => Self::Help,
            "exit" | "quit" => Self::Exit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn task_id_argument(arguments: &[String]) -> Result<u64, CommandError> {
    arguments
        .first()
        .and_then(|argument| parse_task_id(argument))
        .ok_or(CommandError::InvalidTaskId)
}

/// Parses a positive task ID, ignoring surrounding whitespace.
#[must_use]
pub fn parse_task_id(argument: &str) -> Option<u64> {
    argument.trim().parse::<u64>().ok().filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(items: &[&str]) -> Result<Option<Command>, CommandError> {
        let words: Vec<String> = items.iter().map(|item| (*item).to_string()).collect();
        Command::parse(&words)
    }

    // =========================================================================
    // Recognised commands
    // =========================================================================

    #[rstest]
    #[case(&["list"], Command::List)]
    #[case(&["LIST"], Command::List)]
    #[case(&["help"], Command::Help)]
    #[case(&["exit"], Command::Exit)]
    #[case(&["Quit", "now"], Command::Exit)]
    #[case(&["done", "3"], Command::Done(3))]
    #[case(&["undone", "12"], Command::Undone(12))]
    #[case(&["delete", "+7"], Command::Delete(7))]
    fn test_parse_simple_commands(#[case] items: &[&str], #[case] expected: Command) {
        assert_eq!(parse(items).unwrap(), Some(expected));
    }

    #[rstest]
    fn test_parse_add_with_description() {
        assert_eq!(
            parse(&["add", "Buy milk", "Semi-skimmed", "ignored"]).unwrap(),
            Some(Command::Add {
                title: "Buy milk".to_string(),
                description: "Semi-skimmed".to_string(),
            })
        );
    }

    #[rstest]
    fn test_parse_add_defaults_description_to_empty() {
        assert_eq!(
            parse(&["add", "Buy milk"]).unwrap(),
            Some(Command::Add {
                title: "Buy milk".to_string(),
                description: String::new(),
            })
        );
    }

    #[rstest]
    #[case(&["update", "1", "New"], None)]
    #[case(&["update", "1", "New", ""], Some(""))]
    #[case(&["update", "1", "New", "Details"], Some("Details"))]
    fn test_parse_update(#[case] items: &[&str], #[case] description: Option<&str>) {
        assert_eq!(
            parse(items).unwrap(),
            Some(Command::Update {
                id: 1,
                title: "New".to_string(),
                description: description.map(str::to_string),
            })
        );
    }

    #[rstest]
    fn test_parse_empty_words() {
        assert_eq!(parse(&[]).unwrap(), None);
    }

    // =========================================================================
    // Argument errors
    // =========================================================================

    #[rstest]
    #[case(&["add"], CommandError::EmptyTitle)]
    #[case(&["done"], CommandError::InvalidTaskId)]
    #[case(&["done", "0"], CommandError::InvalidTaskId)]
    #[case(&["undone", "-1"], CommandError::InvalidTaskId)]
    #[case(&["delete", "abc"], CommandError::InvalidTaskId)]
    #[case(&["update"], CommandError::InvalidTaskId)]
    #[case(&["update", "x", "Title"], CommandError::InvalidTaskId)]
    #[case(&["update", "1"], CommandError::EmptyTitle)]
    #[case(&["update", "1", "   "], CommandError::EmptyTitle)]
    #[case(&["Frobnicate"], CommandError::Unknown("frobnicate".to_string()))]
    fn test_parse_errors(#[case] items: &[&str], #[case] expected: CommandError) {
        assert_eq!(parse(items).unwrap_err(), expected);
    }

    #[rstest]
    fn test_unknown_command_message() {
        assert_eq!(
            CommandError::Unknown("foo".to_string()).to_string(),
            "Unknown command 'foo'. Type 'help' for available commands."
        );
    }

    #[rstest]
    #[case("1", Some(1))]
    #[case(" 42 ", Some(42))]
    #[case("0", None)]
    #[case("-3", None)]
    #[case("1.5", None)]
    #[case("99999999999999999999999", None)]
    fn test_parse_task_id(#[case] argument: &str, #[case] expected: Option<u64>) {
        assert_eq!(parse_task_id(argument), expected);
    }
}
