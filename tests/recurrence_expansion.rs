mod common;

use common::{date, month, recurring_expense};
use household_budget::ledger::{
    recurring, Budget, BudgetMonth, RecurrenceType, Transaction, TransactionType,
};

fn dates_in(budget: &Budget, target: BudgetMonth) -> Vec<chrono::NaiveDate> {
    let mut dates: Vec<_> = budget.transactions_in(target).map(|txn| txn.date).collect();
    dates.sort();
    dates
}

#[test]
fn expansion_matches_stepped_dates_regardless_of_order() {
    let templates = vec![
        recurring_expense(15.0, date(2024, 11, 30), "Phone", "Utilities", RecurrenceType::Monthly),
        recurring_expense(9.0, date(2025, 1, 7), "Lunch", "Groceries", RecurrenceType::Weekly),
        recurring_expense(120.0, date(2023, 2, 20), "Insurance", "Transportation", RecurrenceType::Yearly),
    ];

    let expand = |order: &[Transaction]| {
        let mut budget = Budget::new();
        budget.set_current_month(Some(month(2025, 2)));
        for txn in order {
            budget.add_transaction(txn.clone());
        }
        let appended = budget.apply_recurring_for_month(month(2025, 2));
        (appended, dates_in(&budget, month(2025, 2)))
    };

    let forward = expand(&templates);
    let mut reversed = templates.clone();
    reversed.reverse();
    assert_eq!(forward, expand(&reversed));

    let (appended, dates) = forward;
    assert_eq!(appended, 1 + 4 + 1);
    assert_eq!(
        dates,
        vec![
            date(2025, 2, 4),
            date(2025, 2, 11),
            date(2025, 2, 18),
            date(2025, 2, 20),
            date(2025, 2, 25),
            date(2025, 2, 28),
        ]
    );
}

#[test]
fn series_ending_before_month_end_are_skipped() {
    let mut budget = Budget::new();
    let ended = recurring_expense(40.0, date(2025, 1, 10), "Course", "Entertainment", RecurrenceType::Weekly)
        .with_end_date(Some(date(2025, 3, 30)));
    budget.add_transaction(ended.clone());

    assert_eq!(budget.apply_recurring_for_month(month(2025, 4)), 0);
    // Ending before the last day of March drops the whole month.
    let march = recurring::materialize(&ended, month(2025, 3));
    assert!(march.is_empty());

    let open_until_month_end = ended.with_end_date(Some(date(2025, 3, 31)));
    let march = recurring::materialize(&open_until_month_end, month(2025, 3));
    let dates: Vec<_> = march.iter().map(|txn| txn.date).collect();
    assert_eq!(
        dates,
        vec![date(2025, 3, 7), date(2025, 3, 14), date(2025, 3, 21), date(2025, 3, 28)]
    );
}

#[test]
fn occurrences_count_toward_category_spend() {
    let mut budget = Budget::new();
    budget.add_transaction(recurring_expense(
        1500.0,
        date(2025, 1, 3),
        "Rent",
        "Rent/Mortgage",
        RecurrenceType::Monthly,
    ));
    budget.apply_recurring_for_month(month(2025, 2));
    assert_eq!(budget.category("Rent/Mortgage").unwrap().spent_this_month(), 3000.0);
}

#[test]
fn income_series_expand_without_touching_categories() {
    let mut budget = Budget::new();
    budget.add_transaction(
        Transaction::new(
            2500.0,
            Some(date(2025, 1, 2)),
            Some("Paycheck".into()),
            TransactionType::Income,
            "Salary",
        )
        .with_recurrence(RecurrenceType::Monthly),
    );
    budget.set_current_month(Some(month(2025, 3)));
    let summary = budget.monthly_summary();
    assert_eq!(summary.income, 2500.0);
    assert_eq!(summary.category_spent["Salary"], 0.0);
}

#[test]
fn later_passes_compound_occurrence_descriptions() {
    let mut budget = Budget::new();
    budget.add_transaction(recurring_expense(
        20.0,
        date(2025, 1, 15),
        "Gym",
        "Entertainment",
        RecurrenceType::Monthly,
    ));
    budget.apply_recurring_for_month(month(2025, 2));
    budget.apply_recurring_for_month(month(2025, 3));

    let march: Vec<_> = budget
        .transactions_in(month(2025, 3))
        .filter_map(|txn| txn.description.as_deref())
        .collect();
    assert_eq!(march, vec!["Gym (recurring)", "Gym (recurring) (recurring)"]);
}

#[test]
fn upcoming_projection_leaves_budget_untouched() {
    let mut budget = Budget::new();
    budget.add_transaction(recurring_expense(
        60.0,
        date(2025, 1, 31),
        "Internet",
        "Utilities",
        RecurrenceType::Monthly,
    ));
    let before = budget.clone();

    let upcoming = recurring::upcoming(budget.transactions(), date(2025, 2, 1), 3);
    let dates: Vec<_> = upcoming.iter().map(|o| o.date).collect();
    assert_eq!(dates, vec![date(2025, 2, 28), date(2025, 3, 28), date(2025, 4, 28)]);
    assert_eq!(budget, before);
    budget.apply_recurring_for_month(month(2025, 2));
    assert_ne!(budget, before);
}
