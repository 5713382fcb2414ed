//! Budget domain models, recurrence expansion, and monthly summaries.

pub mod budget;
pub mod category;
pub mod month;
pub mod recurring;
pub mod summary;
pub mod transaction;

pub use budget::Budget;
pub use category::{default_categories, Category};
pub use month::{BudgetMonth, ParseMonthError};
pub use recurring::{ExpansionPolicy, UpcomingOccurrence};
pub use summary::MonthlySummary;
pub use transaction::{RecurrenceType, Transaction, TransactionType};
