#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::NaiveDate;
use household_budget::{
    config::ConfigManager,
    ledger::{BudgetMonth, RecurrenceType, Transaction, TransactionType},
    storage::JsonStorage,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Storage and config managers backed by an isolated directory.
pub fn setup_test_env() -> (JsonStorage, ConfigManager) {
    let base = temp_base();
    let storage = JsonStorage::in_dir(&base).expect("create json storage backend");
    let config_manager =
        ConfigManager::with_base_dir(base).expect("create config manager for temp dir");
    (storage, config_manager)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn month(year: i32, month: u32) -> BudgetMonth {
    BudgetMonth::new(year, month).expect("valid month")
}

pub fn expense(amount: f64, on: NaiveDate, category: &str) -> Transaction {
    Transaction::new(amount, Some(on), None, TransactionType::Expense, category)
}

pub fn income(amount: f64, on: NaiveDate, category: &str) -> Transaction {
    Transaction::new(amount, Some(on), None, TransactionType::Income, category)
}

pub fn recurring_expense(
    amount: f64,
    start: NaiveDate,
    description: &str,
    category: &str,
    recurrence: RecurrenceType,
) -> Transaction {
    Transaction::new(
        amount,
        Some(start),
        Some(description.to_string()),
        TransactionType::Expense,
        category,
    )
    .with_recurrence(recurrence)
}
