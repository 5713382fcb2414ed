pub mod json_backend;

use std::path::Path;

use crate::{errors::Result, ledger::Budget};

/// Persistence gateway for the single budget document.
pub trait BudgetStorage {
    /// Loads the stored budget. A missing or unreadable document yields a
    /// freshly seeded budget instead of an error.
    fn load(&self) -> Budget;
    fn save(&self, budget: &Budget) -> Result<()>;
    fn path(&self) -> &Path;
}

pub use json_backend::JsonStorage;
