use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::{BudgetError, Result},
    ledger::ExpansionPolicy,
    utils::{
        paths::{self, ensure_dir},
        persistence::replace_file,
    },
};

/// User preferences stored next to the budget document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    pub skip_duplicate_occurrences: bool,
    pub color_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            skip_duplicate_occurrences: true,
            color_output: true,
        }
    }
}

impl Config {
    /// Location of the budget document: the configured file (relative paths
    /// resolve against `base`) or `budget.json` inside `base`.
    pub fn budget_path(&self, base: &Path) -> PathBuf {
        match &self.data_file {
            Some(file) if file.is_absolute() => file.clone(),
            Some(file) => base.join(file),
            None => paths::budget_file_in(base),
        }
    }

    pub fn expansion_policy(&self) -> ExpansionPolicy {
        if self.skip_duplicate_occurrences {
            ExpansionPolicy::SkipExisting
        } else {
            ExpansionPolicy::Literal
        }
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            BudgetError::Config(format!("`{}` is not valid: {err}", self.path.display()))
        })
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        replace_file(&self.path, &json)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
