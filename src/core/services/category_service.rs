use crate::ledger::{Budget, Category};

use super::{ServiceError, ServiceResult};

pub struct CategoryService;

impl CategoryService {
    /// Creates the category or replaces the budgeted amount of an existing
    /// one. Spend recorded so far is kept.
    pub fn upsert(budget: &mut Budget, name: &str, budgeted_amount: f64) -> ServiceResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Invalid("Category name cannot be empty".into()));
        }
        if !budgeted_amount.is_finite() || budgeted_amount < 0.0 {
            return Err(ServiceError::Invalid(format!(
                "Budgeted amount must be a non-negative number, got {budgeted_amount}"
            )));
        }
        let category = match budget.category(name) {
            Some(existing) => {
                let mut updated = existing.clone();
                updated.budgeted_amount = budgeted_amount;
                updated
            }
            None => Category::new(name, budgeted_amount),
        };
        budget.add_category(category);
        Ok(())
    }

    pub fn list(budget: &Budget) -> Vec<&Category> {
        budget.categories().values().collect()
    }
}
