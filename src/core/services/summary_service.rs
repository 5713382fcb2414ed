use chrono::NaiveDate;

use crate::errors::BudgetError;
use crate::ledger::{recurring, Budget, BudgetMonth, MonthlySummary, UpcomingOccurrence};

use super::{ServiceError, ServiceResult};

/// A summary together with the number of occurrences it materialized.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyReport {
    pub summary: MonthlySummary,
    pub generated: usize,
}

pub struct SummaryService;

impl SummaryService {
    pub fn monthly(budget: &mut Budget) -> MonthlyReport {
        let before = budget.transactions().len();
        let summary = budget.monthly_summary();
        MonthlyReport {
            generated: budget.transactions().len() - before,
            summary,
        }
    }

    /// Accepts `YYYY-MM` or `now`.
    pub fn parse_month(raw: &str) -> ServiceResult<BudgetMonth> {
        if raw.trim().eq_ignore_ascii_case("now") {
            return Ok(BudgetMonth::now());
        }
        raw.parse::<BudgetMonth>()
            .map_err(|err| ServiceError::from(BudgetError::InvalidInput(err.to_string())))
    }

    pub fn set_month(budget: &mut Budget, raw: &str) -> ServiceResult<BudgetMonth> {
        let month = Self::parse_month(raw)?;
        budget.set_current_month(Some(month));
        Ok(month)
    }

    pub fn upcoming(
        budget: &Budget,
        reference: NaiveDate,
        per_series: usize,
    ) -> Vec<UpcomingOccurrence> {
        recurring::upcoming(budget.transactions(), reference, per_series)
    }
}
