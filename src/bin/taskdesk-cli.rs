//! Interactive task shell.
//!
//! Tasks are kept in memory and discarded on exit. Set `RUST_LOG` to write
//! diagnostics to stderr.

use std::io;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use taskdesk::cli::Repl;

#[derive(Debug, Parser)]
#[command(name = "taskdesk-cli", version, about = "Manage tasks from an interactive shell")]
struct Args {
    /// Suppress the banner and prompt, for piping scripts.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    Repl::new(stdin.lock(), stdout.lock())
        .quiet(args.quiet)
        .run()
        .context("shell I/O failed")
}
