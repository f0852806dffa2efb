//! Scripted sessions against the interactive shell.

use proptest::prelude::*;
use rstest::rstest;

use taskdesk::cli::Repl;

fn run_quiet(script: &str) -> Vec<String> {
    let mut output = Vec::new();
    Repl::new(script.as_bytes(), &mut output)
        .quiet(true)
        .run()
        .unwrap();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Transcripts
// =============================================================================

#[rstest]
fn test_ids_are_never_reused() {
    let output = run_quiet("add A\nadd B\ndelete 1\nadd C\nlist\n");

    assert_eq!(
        output,
        vec![
            "Task 1 created: A",
            "Task 2 created: B",
            "Task 1 deleted",
            "Task 3 created: C",
            "Tasks:",
            "  ID  Status  Title",
            "  --  ------  -----",
            "    2  [ ]     B",
            "    3  [ ]     C",
            "Goodbye!",
        ]
    );
}

#[rstest]
fn test_list_is_ordered_by_id_not_title() {
    let output = run_quiet("add B\nadd A\nlist\nexit\n");

    assert_eq!(output[5], "    1  [ ]     B");
    assert_eq!(output[6], "    2  [ ]     A");
}

#[rstest]
fn test_blank_add_does_not_consume_an_id() {
    let output = run_quiet("add \"   \"\nadd Real\n");

    assert_eq!(
        output,
        vec!["Error: Title cannot be empty", "Task 1 created: Real", "Goodbye!"]
    );
}

#[rstest]
fn test_missing_task_leaves_store_unchanged() {
    let output = run_quiet("add Only\ndone 5\nlist\n");

    assert_eq!(output[1], "Error: Task 5 not found");
    assert_eq!(output[5], "    1  [ ]     Only");
}

#[rstest]
#[case::omitted("update 1 Final\n", "first notes")]
#[case::empty("update 1 Final ''\n", "")]
#[case::replaced("update 1 Final 'second notes'\n", "second notes")]
fn test_update_keeps_description_unless_given(
    #[case] update: &str,
    #[case] expected: &str,
) {
    let script = format!("add Draft 'first notes'\n{update}");
    let mut output = Vec::new();
    let mut repl = Repl::new(script.as_bytes(), &mut output).quiet(true);

    repl.run().unwrap();

    let task = repl.dispatcher().store().get(1).unwrap();
    assert_eq!(task.title, "Final");
    assert_eq!(task.description, expected);
}

#[rstest]
#[case("help\nquit\n")]
#[case("HELP\nQUIT\n")]
fn test_help_then_quit(#[case] script: &str) {
    let output = run_quiet(script);

    assert_eq!(output.first().unwrap(), "Todo Application Commands:");
    assert_eq!(output.last().unwrap(), "Goodbye!");
}

#[rstest]
fn test_interactive_session_shows_banner_and_prompts() {
    let mut output = Vec::new();
    Repl::new("add Tea\n".as_bytes(), &mut output).run().unwrap();

    assert_eq!(
        String::from_utf8(output).unwrap(),
        "Welcome to Todo Application!\nType 'help' for available commands.\n\n\
         > Task 1 created: Tea\n> \nGoodbye!\n"
    );
}

// =============================================================================
// Properties
// =============================================================================

fn script_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,6}".prop_map(|title| format!("add {title}")),
        (0u64..6).prop_map(|id| format!("done {id}")),
        (0u64..6).prop_map(|id| format!("undone {id}")),
        (0u64..6).prop_map(|id| format!("delete {id}")),
        Just("list".to_string()),
        "[ -~]{0,12}",
    ]
}

proptest! {
    #[test]
    fn test_every_session_ends_with_goodbye(lines in prop::collection::vec(script_line(), 0..30)) {
        let script = lines.join("\n");
        let output = run_quiet(&script);

        prop_assert_eq!(output.last().map(String::as_str), Some("Goodbye!"));
    }

    #[test]
    fn test_created_ids_strictly_increase(titles in prop::collection::vec("[a-z]{1,6}", 1..20)) {
        let script: String = titles.iter().map(|title| format!("add {title}\ndelete 1\n")).collect();
        let output = run_quiet(&script);

        let ids: Vec<u64> = output
            .iter()
            .filter_map(|line| line.strip_prefix("Task "))
            .filter_map(|rest| rest.split_once(" created: "))
            .map(|(id, _)| id.parse().unwrap())
            .collect();

        prop_assert_eq!(ids, (1..=titles.len() as u64).collect::<Vec<_>>());
    }
}
