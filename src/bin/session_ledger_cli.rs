use std::process::ExitCode;

use session_ledger::{
    cli::{self, output},
    config::ConfigManager,
    ledger::WeekDefaults,
    storage::{paths, JsonStorage},
    store::LedgerStore,
};

fn main() -> ExitCode {
    session_ledger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), cli::CliError> {
    let store = open_store()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        cli::run_cli(&store)
    } else {
        cli::run_args(&store, &args)
    }
}

fn open_store() -> Result<LedgerStore, cli::CliError> {
    let config_manager = ConfigManager::new()?;
    let config = config_manager.load().unwrap_or_else(|err| {
        output::warning(format!(
            "Could not read {}: {}. Using defaults.",
            config_manager.path().display(),
            err
        ));
        Default::default()
    });
    let data_file = config
        .data_file
        .clone()
        .unwrap_or_else(|| paths::data_file_in(&paths::app_data_dir()));
    let storage = JsonStorage::new(data_file)?;
    let defaults: WeekDefaults = config.week;
    Ok(LedgerStore::new(Box::new(storage), defaults))
}
