//! Text rendering for shell output.

use super::store::LocalTask;

pub const WELCOME_BANNER: &str = "Welcome to Todo Application!\nType 'help' for available commands.\n";

pub const EMPTY_LIST_MESSAGE: &str = "No tasks yet. Add one to get started!";

pub const HELP_TEXT: &str = "\
Todo Application Commands:
  add <title> [description]  - Add a new task
  list                       - Show all tasks
  done <id>                  - Mark task complete
  undone <id>                - Mark task incomplete
  update <id> <title> [desc] - Update task
  delete <id>                - Delete task
  help                       - Show this help
  exit / quit                - Exit application";

/// Renders one row of the task table.
#[must_use]
pub fn format_task(task: &LocalTask) -> String {
    let status = if task.completed { 'x' } else { ' ' };
    format!("  {:>3}  [{status}]     {}", task.id, task.title)
}

/// Renders the task table, or a hint when there are no tasks.
#[must_use]
pub fn format_task_list<'a>(tasks: impl IntoIterator<Item = &'a LocalTask>) -> String {
    let mut lines = vec![
        "Tasks:".to_string(),
        "  ID  Status  Title".to_string(),
        "  --  ------  -----".to_string(),
    ];
    let header_length = lines.len();
    lines.extend(tasks.into_iter().map(format_task));

    if lines.len() == header_length {
        EMPTY_LIST_MESSAGE.to_string()
    } else {
        lines.join("\n")
    }
}
