use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".session_ledger";
const DATA_FILE: &str = "ledger.json";
const CONFIG_FILE: &str = "config.json";

/// Environment variable that overrides the application data directory.
pub const HOME_ENV: &str = "SESSION_LEDGER_HOME";

/// Returns the application data directory, defaulting to `~/.session_ledger`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Path to the ledger document inside `base`.
pub fn data_file_in(base: &std::path::Path) -> PathBuf {
    base.join(DATA_FILE)
}

/// Path to the configuration file inside `base`.
pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_FILE)
}
