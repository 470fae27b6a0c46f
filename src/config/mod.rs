use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    errors::{StorageError, StorageResult},
    ledger::DEFAULT_BALANCE,
    utils::paths::{app_data_dir, config_file_in, ensure_dir, state_dir_in},
};

const TMP_SUFFIX: &str = "tmp";

/// User preferences for the wallet and its terminal front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Expenses shown per page of the transaction list.
    pub page_size: usize,
    /// Categories listed by the top spending summary.
    pub top_categories: usize,
    /// Opening balance of a fresh ledger.
    pub default_balance: f64,
    pub currency_symbol: String,
    pub ui_color_enabled: bool,
    /// Overrides where ledger records are stored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: 3,
            top_categories: 3,
            default_balance: DEFAULT_BALANCE,
            currency_symbol: "$".into(),
            ui_color_enabled: true,
            data_dir: None,
        }
    }
}

impl Config {
    fn validate(&self) -> StorageResult<()> {
        if self.page_size == 0 {
            return Err(StorageError::Config("page_size must be at least 1".into()));
        }
        if !self.default_balance.is_finite() || self.default_balance < 0.0 {
            return Err(StorageError::Config(format!(
                "default_balance must be a non-negative number, got {}",
                self.default_balance
            )));
        }
        Ok(())
    }
}

/// Loads and saves [`Config`] as JSON inside the application directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    /// Uses `$WALLET_CORE_HOME`, falling back to `~/.wallet_core`.
    pub fn new() -> StorageResult<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> StorageResult<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> StorageResult<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            let config: Config = serde_json::from_str(&data)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> StorageResult<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory for ledger records: the configured override or `<base>/state`.
    pub fn state_dir(&self, config: &Config) -> PathBuf {
        config
            .data_dir
            .clone()
            .unwrap_or_else(|| state_dir_in(&self.base))
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> StorageResult<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
