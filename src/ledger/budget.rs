use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    category::{default_categories, Category},
    month::BudgetMonth,
    recurring::{self, ExpansionPolicy},
    summary::MonthlySummary,
    transaction::{Transaction, TransactionType},
};

/// Aggregate root: the current accounting month, the category envelopes and
/// the full transaction history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "StoredBudget")]
pub struct Budget {
    current_month: BudgetMonth,
    categories: BTreeMap<String, Category>,
    transactions: Vec<Transaction>,
    #[serde(skip)]
    expansion: ExpansionPolicy,
}

impl Budget {
    /// A budget for the current month seeded with the default categories.
    pub fn new() -> Self {
        let mut budget = Self {
            current_month: BudgetMonth::now(),
            categories: BTreeMap::new(),
            transactions: Vec::new(),
            expansion: ExpansionPolicy::default(),
        };
        for category in default_categories() {
            budget.add_category(category);
        }
        budget
    }

    pub fn with_expansion_policy(mut self, policy: ExpansionPolicy) -> Self {
        self.expansion = policy;
        self
    }

    pub fn expansion_policy(&self) -> ExpansionPolicy {
        self.expansion
    }

    pub fn current_month(&self) -> BudgetMonth {
        self.current_month
    }

    /// `None` falls back to the month containing today.
    pub fn set_current_month(&mut self, month: Option<BudgetMonth>) {
        self.current_month = month.unwrap_or_else(BudgetMonth::now);
    }

    /// Inserts or replaces the category keyed by its name. Nameless
    /// categories are ignored.
    pub fn add_category(&mut self, category: Category) {
        if category.name.is_empty() {
            return;
        }
        self.categories.insert(category.name.clone(), category);
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    pub fn categories(&self) -> &BTreeMap<String, Category> {
        &self.categories
    }

    /// Appends the transaction. Expenses also count toward their category's
    /// spend when that category exists.
    pub fn add_transaction(&mut self, txn: Transaction) {
        if txn.transaction_type == Some(TransactionType::Expense) {
            if let Some(category) = self.categories.get_mut(&txn.category_name) {
                category.add_spent(txn.amount);
            }
        }
        self.transactions.push(txn);
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transactions_in(&self, month: BudgetMonth) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(move |txn| month.contains(txn.date))
    }

    /// Transactions whose category name matches no known category.
    pub fn dangling_references(&self) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|txn| !self.categories.contains_key(&txn.category_name))
            .collect()
    }

    /// Materializes the occurrences of every recurring series that falls in
    /// `month` and returns how many transactions were appended.
    ///
    /// Templates are taken from a snapshot of the list, so occurrences added
    /// here are not expanded again in the same pass. They do act as templates
    /// on later passes.
    pub fn apply_recurring_for_month(&mut self, month: BudgetMonth) -> usize {
        let templates: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|txn| recurring::is_eligible(txn, month))
            .cloned()
            .collect();

        let mut appended = 0;
        let mut skipped = 0;
        for template in &templates {
            for occurrence in recurring::materialize(template, month) {
                if self.expansion == ExpansionPolicy::SkipExisting
                    && self
                        .transactions
                        .iter()
                        .any(|existing| recurring::is_same_occurrence(existing, &occurrence))
                {
                    skipped += 1;
                    continue;
                }
                self.add_transaction(occurrence);
                appended += 1;
            }
        }

        debug!(
            month = %month,
            templates = templates.len(),
            appended,
            skipped,
            "expanded recurring transactions"
        );
        appended
    }

    /// Expands recurrences for the current month, then totals it.
    /// `category_spent` holds each category's running spend, which is not
    /// limited to the current month.
    pub fn monthly_summary(&mut self) -> MonthlySummary {
        let month = self.current_month;
        self.apply_recurring_for_month(month);

        let (income, expense) =
            self.transactions_in(month)
                .fold((0.0, 0.0), |(income, expense), txn| match txn.transaction_type {
                    Some(TransactionType::Income) => (income + txn.amount, expense),
                    Some(TransactionType::Expense) => (income, expense + txn.amount),
                    None => (income, expense),
                });

        let category_spent = self
            .categories
            .iter()
            .map(|(name, category)| (name.clone(), category.spent_this_month()))
            .collect();

        MonthlySummary::new(month, income, expense, category_spent)
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self::new()
    }
}

/// On-disk shape of a budget. Missing pieces fall back to a fresh budget,
/// stored categories are layered over the default set and recurring
/// transactions without a series id are given one.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredBudget {
    #[serde(default)]
    current_month: Option<BudgetMonth>,
    #[serde(default)]
    categories: Option<BTreeMap<String, Category>>,
    #[serde(default)]
    transactions: Option<Vec<Transaction>>,
}

impl From<StoredBudget> for Budget {
    fn from(stored: StoredBudget) -> Self {
        let mut budget = Budget::new();
        budget.set_current_month(stored.current_month);
        budget
            .categories
            .extend(stored.categories.unwrap_or_default());
        budget.transactions = stored.transactions.unwrap_or_default();
        recurring::assign_series_ids(&mut budget.transactions);
        budget
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::ledger::transaction::RecurrenceType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn budget_for(y: i32, m: u32) -> Budget {
        let mut budget = Budget::new();
        budget.set_current_month(BudgetMonth::new(y, m));
        budget
    }

    fn expense(amount: f64, on: NaiveDate, category: &str) -> Transaction {
        Transaction::new(amount, Some(on), None, TransactionType::Expense, category)
    }

    fn gym_template() -> Transaction {
        Transaction::new(
            20.0,
            Some(date(2025, 1, 15)),
            Some("Gym".into()),
            TransactionType::Expense,
            "Entertainment",
        )
        .with_recurrence(RecurrenceType::Monthly)
    }

    #[test]
    fn new_budget_has_default_categories_and_no_history() {
        let budget = Budget::new();
        assert_eq!(budget.categories().len(), 6);
        assert!(budget.transactions().is_empty());
        assert_eq!(budget.current_month(), BudgetMonth::now());
        assert_eq!(budget.expansion_policy(), ExpansionPolicy::Literal);
    }

    #[test]
    fn add_category_upserts_and_ignores_nameless() {
        let mut budget = Budget::new();
        budget.add_category(Category::new("Groceries", 650.0));
        budget.add_category(Category::new("", 10.0));
        budget.add_category(Category::new("Pets", 75.0));
        assert_eq!(budget.categories().len(), 7);
        assert_eq!(budget.category("Groceries").unwrap().budgeted_amount, 650.0);
        assert!(budget.category("").is_none());
    }

    #[test]
    fn expenses_update_known_categories_only() {
        let mut budget = budget_for(2025, 3);
        budget.add_transaction(expense(50.0, date(2025, 3, 2), "Groceries"));
        budget.add_transaction(expense(12.0, date(2025, 3, 2), "Nowhere"));
        budget.add_transaction(Transaction::new(
            100.0,
            Some(date(2025, 3, 2)),
            None,
            TransactionType::Income,
            "Groceries",
        ));
        assert_eq!(budget.transactions().len(), 3);
        assert_eq!(budget.category("Groceries").unwrap().spent_this_month(), 50.0);
        assert_eq!(budget.dangling_references().len(), 1);
    }

    #[test]
    fn summary_filters_totals_by_month_but_not_category_spend() {
        let mut budget = budget_for(2025, 3);
        budget.add_transaction(expense(40.0, date(2025, 2, 27), "Groceries"));
        budget.add_transaction(expense(60.0, date(2025, 3, 3), "Groceries"));
        budget.add_transaction(Transaction::new(
            5000.0,
            Some(date(2025, 3, 1)),
            None,
            TransactionType::Income,
            "Salary",
        ));

        let summary = budget.monthly_summary();
        assert_eq!(summary.month, BudgetMonth::new(2025, 3).unwrap());
        assert_eq!(summary.income, 5000.0);
        assert_eq!(summary.expense, 60.0);
        assert_eq!(summary.balance, summary.income - summary.expense);
        assert_eq!(summary.category_spent["Groceries"], 100.0);
        assert_eq!(summary.category_spent["Salary"], 0.0);
    }

    #[test]
    fn summary_expands_recurring_series() {
        let mut budget = budget_for(2025, 3);
        budget.add_transaction(gym_template());

        let summary = budget.monthly_summary();
        assert_eq!(summary.expense, 20.0);
        let generated: Vec<_> = budget.transactions_in(BudgetMonth::new(2025, 3).unwrap()).collect();
        assert_eq!(generated.len(), 1);
        assert_eq!(generated[0].date, date(2025, 3, 15));
        assert_eq!(generated[0].description.as_deref(), Some("Gym (recurring)"));
        assert_eq!(summary.category_spent["Entertainment"], 40.0);
    }

    #[test]
    fn literal_policy_grows_on_every_summary() {
        let mut budget = budget_for(2025, 3);
        budget.add_transaction(gym_template());
        assert_eq!(budget.apply_recurring_for_month(BudgetMonth::new(2025, 3).unwrap()), 1);
        // The template and its first copy both expand on the second pass.
        assert_eq!(budget.apply_recurring_for_month(BudgetMonth::new(2025, 3).unwrap()), 2);
        assert_eq!(budget.transactions().len(), 4);
    }

    #[test]
    fn skip_existing_policy_is_stable() {
        let mut budget = budget_for(2025, 3).with_expansion_policy(ExpansionPolicy::SkipExisting);
        budget.add_transaction(gym_template());
        let first = budget.monthly_summary();
        let second = budget.monthly_summary();
        assert_eq!(first, second);
        assert_eq!(budget.transactions().len(), 2);
    }

    #[test]
    fn skip_existing_keeps_look_alike_series() {
        let mut budget = budget_for(2025, 3).with_expansion_policy(ExpansionPolicy::SkipExisting);
        budget.add_transaction(gym_template());
        let mut second_gym = gym_template();
        second_gym.series_id = None;
        second_gym.date = date(2025, 2, 15);
        budget.add_transaction(second_gym.with_recurrence(RecurrenceType::Monthly));

        assert_eq!(budget.monthly_summary().expense, 40.0);
        assert_eq!(budget.monthly_summary().expense, 40.0);
        assert_eq!(budget.transactions().len(), 4);
    }

    #[test]
    fn untyped_transactions_count_nowhere() {
        let mut budget = budget_for(2025, 3);
        let mut untyped = expense(30.0, date(2025, 3, 4), "Groceries");
        untyped.transaction_type = None;
        budget.add_transaction(untyped);

        let summary = budget.monthly_summary();
        assert_eq!(budget.transactions().len(), 1);
        assert_eq!(summary.income, 0.0);
        assert_eq!(summary.expense, 0.0);
        assert_eq!(summary.category_spent["Groceries"], 0.0);
    }

    #[test]
    fn set_current_month_none_means_now() {
        let mut budget = budget_for(2020, 1);
        budget.set_current_month(None);
        assert_eq!(budget.current_month(), BudgetMonth::now());
    }

    #[test]
    fn stored_categories_merge_over_defaults() {
        let json = r#"{
            "currentMonth": null,
            "categories": { "Groceries": { "name": "Groceries", "budgetedAmount": 900.0, "spentThisMonth": 25.0 },
                            "Pets": { "name": "Pets", "budgetedAmount": 60.0 } },
            "monthlyIncome": 12
        }"#;
        let budget: Budget = serde_json::from_str(json).unwrap();
        assert_eq!(budget.current_month(), BudgetMonth::now());
        assert_eq!(budget.categories().len(), 7);
        assert_eq!(budget.category("Groceries").unwrap().spent_this_month(), 25.0);
        assert_eq!(budget.category("Rent/Mortgage").unwrap().budgeted_amount, 1500.0);
        assert!(budget.transactions().is_empty());
    }

    #[test]
    fn serializes_document_shape() {
        let mut budget = budget_for(2025, 3);
        budget.add_transaction(gym_template());
        let value = serde_json::to_value(&budget).unwrap();
        assert_eq!(value["currentMonth"], "2025-03");
        assert_eq!(value["categories"]["Utilities"]["budgetedAmount"], 300.0);
        assert_eq!(value["transactions"][0]["type"], "EXPENSE");
        assert!(value.get("expansion").is_none());
    }
}
