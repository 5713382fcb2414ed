use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use super::month::BudgetMonth;

/// Income, expense and balance for the current month, plus the running
/// spend total of every category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub month: BudgetMonth,
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
    pub category_spent: BTreeMap<String, f64>,
}

impl MonthlySummary {
    pub fn new(
        month: BudgetMonth,
        income: f64,
        expense: f64,
        category_spent: BTreeMap<String, f64>,
    ) -> Self {
        Self {
            month,
            income,
            expense,
            balance: income - expense,
            category_spent,
        }
    }
}

impl fmt::Display for MonthlySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary for {}", self.month)?;
        writeln!(f, "  Income:  ${:.2}", self.income)?;
        writeln!(f, "  Expense: ${:.2}", self.expense)?;
        write!(f, "  Balance: ${:.2}", self.balance)?;
        for (name, spent) in &self.category_spent {
            write!(f, "\n    {name}: ${spent:.2}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_is_income_minus_expense() {
        let summary = MonthlySummary::new(BudgetMonth::new(2025, 3).unwrap(), 100.1, 50.2, BTreeMap::new());
        assert_eq!(summary.balance, 100.1 - 50.2);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut spent = BTreeMap::new();
        spent.insert("Groceries".to_string(), 50.0);
        let summary = MonthlySummary::new(BudgetMonth::new(2025, 3).unwrap(), 0.0, 50.0, spent);
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["month"], "2025-03");
        assert_eq!(value["balance"], -50.0);
        assert_eq!(value["categorySpent"]["Groceries"], 50.0);
    }
}
