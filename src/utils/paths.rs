use dirs::home_dir;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".wallet_core";
const STATE_DIR: &str = "state";
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the application directory.
pub const HOME_ENV: &str = "WALLET_CORE_HOME";

/// Returns the application-specific data directory, defaulting to `~/.wallet_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Directory holding the persisted ledger records below `base`.
pub fn state_dir_in(base: &Path) -> PathBuf {
    base.join(STATE_DIR)
}

/// Location of the configuration file below `base`.
pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
