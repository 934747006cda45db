pub mod commands;
pub mod output;
mod shell;
pub mod table;

use thiserror::Error;

use crate::errors::LedgerError;
use crate::store::LedgerStore;

pub use shell::{run_args, run_cli};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

impl CliError {
    fn usage(text: &str) -> Self {
        CliError::Usage(format!("usage: {}", text))
    }
}

/// Whether the shell loop should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Dispatches one parsed command line against the store.
pub fn run_command(
    store: &LedgerStore,
    name: &str,
    args: &[String],
) -> Result<LoopControl, CliError> {
    match name {
        "add-week" => commands::add_week(store, args)?,
        "add-session" => commands::add_session(store, args)?,
        "set-payment" => commands::set_payment(store, args)?,
        "weeks" => commands::weeks(store, args)?,
        "dashboard" => commands::dashboard(store, args)?,
        "current" => commands::current(store, args)?,
        "summary" => commands::summary(store, args)?,
        "help" => print_help(),
        "exit" | "quit" => return Ok(LoopControl::Exit),
        other => {
            return Err(CliError::Usage(format!(
                "unknown command `{}` (try `help`)",
                other
            )))
        }
    }
    Ok(LoopControl::Continue)
}

pub fn print_help() {
    output::section("Commands");
    output::info("add-week <start-date>                                  create the next week");
    output::info("add-session <week> <date> <number> <paid|not-paid> [notes...]");
    output::info("set-payment <week> <number> <paid|not-paid>            flip a session's payment");
    output::info("weeks                                                  all weeks and sessions");
    output::info("dashboard                                              statistics and breakdowns");
    output::info("current                                                current week details");
    output::info("summary                                                ledger totals");
    output::info("help, exit");
    output::info("Dates are YYYY-MM-DD, or `today`.");
}
