use std::io::{self, BufRead};

use rustyline::{error::ReadlineError, DefaultEditor};
use shell_words::split;

use crate::store::LedgerStore;

use super::output;
use super::{print_help, run_command, CliError, LoopControl};

const SCRIPT_ENV: &str = "SESSION_LEDGER_CLI_SCRIPT";

/// Runs the shell: interactive with line editing by default, or reading
/// commands from stdin when `SESSION_LEDGER_CLI_SCRIPT` is set.
pub fn run_cli(store: &LedgerStore) -> Result<(), CliError> {
    if std::env::var_os(SCRIPT_ENV).is_some() {
        run_script(store)
    } else {
        run_interactive(store)
    }
}

fn run_interactive(store: &LedgerStore) -> Result<(), CliError> {
    output::info("Session Ledger shell. Type `help` for commands.");
    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("ledger> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                match handle_line(store, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => output::error(err),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn run_script(store: &LedgerStore) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.map_err(CliError::from_io)?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match handle_line(store, trimmed) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => output::error(err),
        }
    }
    Ok(())
}

fn handle_line(store: &LedgerStore, line: &str) -> Result<LoopControl, CliError> {
    let words = split(line).map_err(|err| CliError::Usage(err.to_string()))?;
    let Some((name, args)) = words.split_first() else {
        return Ok(LoopControl::Continue);
    };
    run_command(store, name, args)
}

/// Dispatches argv-style invocation: `session_ledger_cli <command> [args...]`.
pub fn run_args(store: &LedgerStore, args: &[String]) -> Result<(), CliError> {
    match args.split_first() {
        Some((name, rest)) => {
            run_command(store, name, rest)?;
            Ok(())
        }
        None => {
            print_help();
            Ok(())
        }
    }
}

impl CliError {
    fn from_io(err: io::Error) -> Self {
        CliError::Ledger(crate::errors::LedgerError::Io(err))
    }
}
