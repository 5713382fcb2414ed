use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{info, warn};

use super::BudgetStorage;
use crate::{
    errors::Result,
    ledger::Budget,
    utils::{
        paths::{self, ensure_dir},
        persistence::replace_file,
    },
};

/// Stores the budget as a pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage backed by `budget.json` inside `dir`, creating `dir` if needed.
    pub fn in_dir(dir: &Path) -> Result<Self> {
        ensure_dir(dir)?;
        Ok(Self::new(paths::budget_file_in(dir)))
    }

    fn read(&self) -> Result<Budget> {
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn discard_corrupt(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => info!(path = %self.path.display(), "deleted unreadable budget file"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => warn!(
                path = %self.path.display(),
                error = %err,
                "failed to delete unreadable budget file"
            ),
        }
    }
}

impl BudgetStorage for JsonStorage {
    fn load(&self) -> Budget {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no saved budget found, starting fresh");
            return Budget::new();
        }
        match self.read() {
            Ok(budget) => {
                for warning in budget_warnings(&budget) {
                    warn!("{warning}");
                }
                info!(
                    path = %self.path.display(),
                    month = %budget.current_month(),
                    transactions = budget.transactions().len(),
                    "loaded budget"
                );
                budget
            }
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "budget file is unreadable, starting fresh"
                );
                self.discard_corrupt();
                Budget::new()
            }
        }
    }

    fn save(&self, budget: &Budget) -> Result<()> {
        let json = serde_json::to_string_pretty(budget)?;
        replace_file(&self.path, &json)?;
        info!(
            path = %self.path.display(),
            transactions = budget.transactions().len(),
            "saved budget"
        );
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// Human-readable notes about references that point nowhere.
pub fn budget_warnings(budget: &Budget) -> Vec<String> {
    budget
        .dangling_references()
        .into_iter()
        .map(|txn| {
            format!(
                "transaction on {} references missing category `{}`",
                txn.date, txn.category_name
            )
        })
        .collect()
}
