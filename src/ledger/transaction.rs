use std::{fmt, str::FromStr};

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::month::today;

/// Direction of a money movement. Amounts are sign-free; the type decides.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(format!("unknown transaction type `{other}`")),
        }
    }
}

/// Closed set of recurrence rules, each with its own calendar step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecurrenceType {
    Weekly,
    Monthly,
    Yearly,
}

impl RecurrenceType {
    /// Advances `from` by one period. Month and year steps clamp to the last
    /// day of a shorter target month (Jan 31 -> Feb 28, Feb 29 -> Feb 28).
    /// Returns `None` once the step would leave the representable calendar.
    pub fn next_date(&self, from: NaiveDate) -> Option<NaiveDate> {
        match self {
            RecurrenceType::Weekly => from.checked_add_signed(Duration::weeks(1)),
            RecurrenceType::Monthly => from.checked_add_months(Months::new(1)),
            RecurrenceType::Yearly => from.checked_add_months(Months::new(12)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecurrenceType::Weekly => "Weekly",
            RecurrenceType::Monthly => "Monthly",
            RecurrenceType::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for RecurrenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RecurrenceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(RecurrenceType::Weekly),
            "monthly" => Ok(RecurrenceType::Monthly),
            "yearly" => Ok(RecurrenceType::Yearly),
            other => Err(format!("unknown recurrence `{other}`")),
        }
    }
}

/// One recorded money movement, optionally acting as a recurring template.
///
/// A stored record without a type is kept but counts toward neither income
/// nor expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default)]
    pub amount: f64,
    #[serde(default = "today", deserialize_with = "date_or_today")]
    pub date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub transaction_type: Option<TransactionType>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub category_name: String,
    #[serde(rename = "recurring", alias = "isRecurring", default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub recurrence_type: Option<RecurrenceType>,
    #[serde(default)]
    pub recurring_end_date: Option<NaiveDate>,
    /// Shared by a recurring template and every occurrence generated from it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_id: Option<Uuid>,
}

impl Transaction {
    /// Creates a one-off transaction. A missing date means today.
    pub fn new(
        amount: f64,
        date: Option<NaiveDate>,
        description: Option<String>,
        transaction_type: TransactionType,
        category_name: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            date: date.unwrap_or_else(today),
            description,
            transaction_type: Some(transaction_type),
            category_name: category_name.into(),
            is_recurring: false,
            recurrence_type: None,
            recurring_end_date: None,
            series_id: None,
        }
    }

    /// Marks the transaction as a recurring template, starting a new series
    /// unless it already belongs to one.
    pub fn with_recurrence(mut self, recurrence: RecurrenceType) -> Self {
        self.is_recurring = true;
        self.recurrence_type = Some(recurrence);
        self.series_id.get_or_insert_with(Uuid::new_v4);
        self
    }

    pub fn with_end_date(mut self, end: Option<NaiveDate>) -> Self {
        self.recurring_end_date = end;
        self
    }

    /// Whether a recurring transaction still applies on `date`. Non-recurring
    /// transactions are never active; the end date itself is still active.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        if !self.is_recurring {
            return false;
        }
        match self.recurring_end_date {
            Some(end) => date <= end,
            None => true,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:<7} ${:>9.2}  {}",
            self.date,
            self.transaction_type.map_or("-", |kind| kind.label()),
            self.amount,
            self.category_name
        )?;
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            write!(f, " - {description}")?;
        }
        match (self.is_recurring, self.recurrence_type) {
            (true, Some(kind)) => write!(f, " [{kind}")?,
            _ => return Ok(()),
        }
        if let Some(end) = self.recurring_end_date {
            write!(f, " until {end}")?;
        }
        f.write_str("]")
    }
}

fn date_or_today<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<NaiveDate>::deserialize(deserializer)?.unwrap_or_else(today))
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
