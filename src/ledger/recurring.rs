use std::collections::BTreeMap;

use chrono::NaiveDate;
use uuid::Uuid;

use super::{
    month::BudgetMonth,
    transaction::{RecurrenceType, Transaction, TransactionType},
};

/// Suffix appended to the description of every materialized occurrence.
pub const OCCURRENCE_MARKER: &str = " (recurring)";

/// How `Budget::apply_recurring_for_month` treats occurrences already present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExpansionPolicy {
    /// Every expansion appends a fresh copy, even when one already exists.
    #[default]
    Literal,
    /// Occurrences already recorded for the same series and date are skipped.
    SkipExisting,
}

/// A projected, not yet materialized, occurrence of a recurring series.
#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingOccurrence {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub category_name: String,
    pub recurrence_type: RecurrenceType,
}

/// A template takes part in the expansion of `month` when it is recurring,
/// carries a rule and has not ended before the month's last day.
pub fn is_eligible(txn: &Transaction, month: BudgetMonth) -> bool {
    txn.is_recurring && txn.recurrence_type.is_some() && txn.is_active_on(month.last_day())
}

/// Dates produced for `month` by a series starting on `start`.
///
/// The cursor is stepped until it lies strictly after the first of the month,
/// so a series dated exactly on the 1st is not repeated on that day.
pub fn occurrence_dates(
    start: NaiveDate,
    recurrence: RecurrenceType,
    month: BudgetMonth,
) -> Vec<NaiveDate> {
    let month_start = month.first_day();
    let month_end = month.last_day();

    let mut next = start;
    while next <= month_start {
        match recurrence.next_date(next) {
            Some(date) => next = date,
            None => return Vec::new(),
        }
    }

    let mut dates = Vec::new();
    while next <= month_end {
        dates.push(next);
        match recurrence.next_date(next) {
            Some(date) => next = date,
            None => break,
        }
    }
    dates
}

/// Description of an occurrence of `base`. A template without a description
/// yields the bare marker rather than a `null` prefix.
pub fn occurrence_description(base: &Transaction) -> String {
    match base.description.as_deref() {
        Some(description) => format!("{description}{OCCURRENCE_MARKER}"),
        None => OCCURRENCE_MARKER.trim_start().to_string(),
    }
}

/// Copies of `base` for every occurrence date in `month`, each carrying the
/// template's series id. Ineligible templates produce nothing.
pub fn materialize(base: &Transaction, month: BudgetMonth) -> Vec<Transaction> {
    let Some(recurrence) = base.recurrence_type.filter(|_| is_eligible(base, month)) else {
        return Vec::new();
    };

    let description = occurrence_description(base);
    occurrence_dates(base.date, recurrence, month)
        .into_iter()
        .map(|date| Transaction {
            date,
            description: Some(description.clone()),
            ..base.clone()
        })
        .collect()
}

/// Description with every trailing occurrence marker removed.
pub fn series_description(description: Option<&str>) -> &str {
    let mut text = description.unwrap_or("");
    while let Some(stripped) = text.strip_suffix(OCCURRENCE_MARKER) {
        text = stripped;
    }
    if text == OCCURRENCE_MARKER.trim_start() {
        return "";
    }
    text
}

/// Two transactions belong to the same series when both carry the same
/// series id. Look-alike templates started separately stay distinct.
pub fn same_series(a: &Transaction, b: &Transaction) -> bool {
    matches!((a.series_id, b.series_id), (Some(left), Some(right)) if left == right)
}

pub fn is_same_occurrence(existing: &Transaction, candidate: &Transaction) -> bool {
    existing.date == candidate.date && same_series(existing, candidate)
}

/// Gives every recurring transaction without a series id one.
///
/// Documents written before series ids existed hold templates and their
/// generated copies side by side. A copy (its description ends with the
/// occurrence marker) joins an earlier recurring transaction that matches it
/// field for field and whose schedule lands on the copy's date. Anything else
/// starts a series of its own.
pub fn assign_series_ids(transactions: &mut [Transaction]) {
    for index in 0..transactions.len() {
        let txn = &transactions[index];
        if !txn.is_recurring || txn.series_id.is_some() {
            continue;
        }
        let inherited = transactions[..index]
            .iter()
            .find(|earlier| generated_from(earlier, txn))
            .and_then(|earlier| earlier.series_id);
        transactions[index].series_id = Some(inherited.unwrap_or_else(Uuid::new_v4));
    }
}

fn generated_from(template: &Transaction, copy: &Transaction) -> bool {
    let Some(recurrence) = template.recurrence_type else {
        return false;
    };
    template.is_recurring
        && copy
            .description
            .as_deref()
            .is_some_and(|text| text.ends_with(OCCURRENCE_MARKER.trim_start()))
        && template.amount == copy.amount
        && template.transaction_type == copy.transaction_type
        && template.category_name == copy.category_name
        && template.recurrence_type == copy.recurrence_type
        && template.recurring_end_date == copy.recurring_end_date
        && series_description(template.description.as_deref())
            == series_description(copy.description.as_deref())
        && on_schedule(template.date, recurrence, copy.date)
}

/// Whether stepping from `start` reaches `date` exactly.
fn on_schedule(start: NaiveDate, recurrence: RecurrenceType, date: NaiveDate) -> bool {
    let mut next = Some(start);
    while let Some(current) = next.filter(|current| *current < date) {
        next = recurrence.next_date(current);
    }
    next == Some(date)
}

/// Projects the next `limit` dates strictly after `reference` for every
/// distinct recurring series, honoring end dates. Untyped series are left
/// out. Nothing is mutated.
pub fn upcoming(
    transactions: &[Transaction],
    reference: NaiveDate,
    limit: usize,
) -> Vec<UpcomingOccurrence> {
    if limit == 0 {
        return Vec::new();
    }

    // Earliest member of each series acts as its template.
    let mut templates: Vec<&Transaction> = Vec::new();
    for txn in transactions
        .iter()
        .filter(|txn| txn.is_recurring && txn.recurrence_type.is_some())
    {
        match templates.iter_mut().find(|seen| same_series(seen, txn)) {
            Some(seen) if txn.date < seen.date => *seen = txn,
            Some(_) => {}
            None => templates.push(txn),
        }
    }

    let mut projected = Vec::new();
    for template in templates {
        let (Some(recurrence), Some(transaction_type)) =
            (template.recurrence_type, template.transaction_type)
        else {
            continue;
        };
        let mut next = Some(template.date);
        while let Some(date) = next.filter(|date| *date <= reference) {
            next = recurrence.next_date(date);
        }

        let description = series_description(template.description.as_deref()).to_string();
        let mut emitted = 0;
        while let Some(date) = next {
            if emitted == limit || !template.is_active_on(date) {
                break;
            }
            projected.push(UpcomingOccurrence {
                date,
                description: description.clone(),
                amount: template.amount,
                transaction_type,
                category_name: template.category_name.clone(),
                recurrence_type: recurrence,
            });
            emitted += 1;
            next = recurrence.next_date(date);
        }
    }

    projected.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.category_name.cmp(&b.category_name))
    });
    projected
}

/// Totals of projected occurrences per category, used by the upcoming listing.
pub fn upcoming_totals(occurrences: &[UpcomingOccurrence]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for occurrence in occurrences {
        *totals.entry(occurrence.category_name.clone()).or_insert(0.0) += occurrence.amount;
    }
    totals
}
