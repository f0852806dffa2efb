//! The read-eval-print loop.

use std::io::{self, BufRead, Write};

use super::dispatcher::{Dispatcher, Reply};
use super::display::WELCOME_BANNER;

const PROMPT: &str = "> ";
const FAREWELL: &str = "Goodbye!";

/// Line-oriented shell over arbitrary input and output streams.
pub struct Repl<R, W> {
    input: R,
    output: W,
    dispatcher: Dispatcher,
    quiet: bool,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            dispatcher: Dispatcher::new(),
            quiet: false,
        }
    }

    /// Suppresses the banner and prompt.
    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Reads and executes lines until `exit`, `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying streams.
    pub fn run(&mut self) -> io::Result<()> {
        if !self.quiet {
            writeln!(self.output, "{WELCOME_BANNER}")?;
        }

        let mut line = String::new();
        loop {
            if !self.quiet {
                write!(self.output, "{PROMPT}")?;
                self.output.flush()?;
            }

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                if self.quiet {
                    writeln!(self.output, "{FAREWELL}")?;
                } else {
                    writeln!(self.output, "\n{FAREWELL}")?;
                }
                break;
            }

            match self.dispatcher.handle_line(&line) {
                Reply::Print(text) => writeln!(self.output, "{text}")?,
                Reply::Silent => {}
                Reply::Exit => {
                    writeln!(self.output, "{FAREWELL}")?;
                    break;
                }
            }
        }

        self.output.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn run(script: &str, quiet: bool) -> String {
        let mut output = Vec::new();
        Repl::new(script.as_bytes(), &mut output)
            .quiet(quiet)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[rstest]
    fn test_banner_prompt_and_exit() {
        assert_eq!(
            run("exit\n", false),
            "Welcome to Todo Application!\nType 'help' for available commands.\n\n> Goodbye!\n"
        );
    }

    #[rstest]
    fn test_end_of_input_says_goodbye_on_new_line() {
        assert_eq!(
            run("", false),
            "Welcome to Todo Application!\nType 'help' for available commands.\n\n> \nGoodbye!\n"
        );
    }

    #[rstest]
    fn test_quiet_session() {
        assert_eq!(
            run("add A\n\nadd B\ndone 1\nlist\n", true),
            "Task 1 created: A\nTask 2 created: B\nTask 1 marked complete\n\
             Tasks:\n  ID  Status  Title\n  --  ------  -----\n    1  [x]     A\n    2  [ ]     B\n\
             Goodbye!\n"
        );
    }

    #[rstest]
    fn test_lines_after_exit_are_not_read() {
        assert_eq!(run("quit\nadd Never\n", true), "Goodbye!\n");
    }

    #[rstest]
    fn test_last_line_without_newline_is_handled() {
        assert_eq!(run("add Last", true), "Task 1 created: Last\nGoodbye!\n");
    }
}
