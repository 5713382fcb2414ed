use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

const HOME_ENV: &str = "HOUSEHOLD_BUDGET_HOME";
const DEFAULT_DIR_NAME: &str = ".household_budget";
const BUDGET_FILE: &str = "budget.json";
const CONFIG_FILE: &str = "config.json";

/// Returns the application data directory, defaulting to `~/.household_budget`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn budget_file_in(base: &Path) -> PathBuf {
    base.join(BUDGET_FILE)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
