//! Validation and parsing in front of `Budget::add_transaction`.

use chrono::NaiveDate;

use crate::core::services::{ServiceError, ServiceResult};
use crate::ledger::{Budget, BudgetMonth, RecurrenceType, Transaction, TransactionType};

/// Unvalidated input for a new transaction.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub recurrence: Option<RecurrenceType>,
    pub until: Option<NaiveDate>,
}

impl TransactionDraft {
    pub fn new(transaction_type: TransactionType, amount: f64, category: impl Into<String>) -> Self {
        Self {
            transaction_type,
            amount,
            category: category.into(),
            description: None,
            date: None,
            recurrence: None,
            until: None,
        }
    }
}

pub struct TransactionService;

impl TransactionService {
    /// Validates the draft, records it and returns the stored transaction.
    pub fn add(budget: &mut Budget, draft: TransactionDraft) -> ServiceResult<Transaction> {
        if !draft.amount.is_finite() || draft.amount <= 0.0 {
            return Err(ServiceError::Invalid(format!(
                "Amount must be a positive number, got {}",
                draft.amount
            )));
        }
        let category = draft.category.trim();
        if category.is_empty() {
            return Err(ServiceError::Invalid("Category cannot be empty".into()));
        }
        if draft.until.is_some() && draft.recurrence.is_none() {
            return Err(ServiceError::Invalid(
                "An end date requires a recurrence".into(),
            ));
        }

        let description = draft
            .description
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        let mut txn = Transaction::new(
            draft.amount,
            draft.date,
            description,
            draft.transaction_type,
            category,
        );
        if let Some(recurrence) = draft.recurrence {
            if let Some(until) = draft.until.filter(|until| *until < txn.date) {
                return Err(ServiceError::Invalid(format!(
                    "End date {until} is before the start date {}",
                    txn.date
                )));
            }
            txn = txn.with_recurrence(recurrence).with_end_date(draft.until);
        }

        budget.add_transaction(txn.clone());
        Ok(txn)
    }

    /// Transactions in insertion order, optionally limited to one month.
    pub fn list(budget: &Budget, month: Option<BudgetMonth>) -> Vec<&Transaction> {
        match month {
            Some(month) => budget.transactions_in(month).collect(),
            None => budget.transactions().iter().collect(),
        }
    }

    pub fn parse_amount(raw: &str) -> ServiceResult<f64> {
        let cleaned = raw.trim().trim_start_matches('$').replace(',', "");
        cleaned
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| ServiceError::Invalid(format!("`{raw}` is not a valid amount")))
    }

    pub fn parse_date(raw: &str) -> ServiceResult<NaiveDate> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
            ServiceError::Invalid(format!("`{raw}` is not a valid date (expected YYYY-MM-DD)"))
        })
    }
}
