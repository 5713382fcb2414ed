use std::fmt;

use serde::{Deserialize, Serialize};

/// A named budget envelope: how much is planned and how much has gone out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub budgeted_amount: f64,
    #[serde(default)]
    spent_this_month: f64,
}

impl Category {
    pub fn new(name: impl Into<String>, budgeted_amount: f64) -> Self {
        Self {
            name: name.into(),
            budgeted_amount,
            spent_this_month: 0.0,
        }
    }

    pub fn spent_this_month(&self) -> f64 {
        self.spent_this_month
    }

    /// Accumulates spend. Zero and negative amounts are ignored, so refunds
    /// recorded as negative expenses never lower the running total.
    pub fn add_spent(&mut self, amount: f64) {
        if amount > 0.0 {
            self.spent_this_month += amount;
        }
    }

    pub fn remaining(&self) -> f64 {
        self.budgeted_amount - self.spent_this_month
    }

    pub fn reset_monthly(&mut self) {
        self.spent_this_month = 0.0;
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: budgeted ${:.2}, spent ${:.2}, remaining ${:.2}",
            self.name,
            self.budgeted_amount,
            self.spent_this_month,
            self.remaining()
        )
    }
}

/// Envelopes every fresh budget starts with.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("Groceries", 800.0),
        Category::new("Rent/Mortgage", 1500.0),
        Category::new("Utilities", 300.0),
        Category::new("Salary", 5000.0),
        Category::new("Entertainment", 200.0),
        Category::new("Transportation", 400.0),
    ]
}
