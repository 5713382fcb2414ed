use std::slice::Iter;

use crate::cli::commands::{usage, CommandDefinition};
use crate::cli::{output, CliContext, CommandError, CommandResult};
use crate::core::services::{SummaryService, TransactionDraft, TransactionService};
use crate::ledger::{RecurrenceType, TransactionType};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "add",
            "Record an income or expense",
            "add <income|expense> <amount> <category> [description...] [--date YYYY-MM-DD] [--repeat weekly|monthly|yearly] [--until YYYY-MM-DD]",
            cmd_add,
        ),
        CommandDefinition::new(
            "transactions",
            "List recorded transactions",
            "transactions [YYYY-MM]",
            cmd_transactions,
        ),
    ]
}

fn cmd_add(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let mut positional = Vec::new();
    let mut date = None;
    let mut recurrence = None;
    let mut until = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match *arg {
            "--date" => date = Some(TransactionService::parse_date(flag_value(&mut iter, arg)?)?),
            "--until" => until = Some(TransactionService::parse_date(flag_value(&mut iter, arg)?)?),
            "--repeat" => {
                let raw = flag_value(&mut iter, arg)?;
                recurrence = Some(
                    raw.parse::<RecurrenceType>()
                        .map_err(CommandError::InvalidArguments)?,
                );
            }
            other if other.starts_with("--") => {
                return Err(CommandError::InvalidArguments(format!(
                    "Unknown option `{other}`"
                )))
            }
            other => positional.push(other),
        }
    }

    let [kind, amount, category, description @ ..] = positional.as_slice() else {
        return Err(usage(context, "add"));
    };
    let transaction_type = kind
        .parse::<TransactionType>()
        .map_err(CommandError::InvalidArguments)?;
    let amount = TransactionService::parse_amount(amount)?;

    let mut draft = TransactionDraft::new(transaction_type, amount, *category);
    draft.description = Some(description.join(" "));
    draft.date = date;
    draft.recurrence = recurrence;
    draft.until = until;

    let budget = context.budget();
    let txn = TransactionService::add(budget, draft)?;
    let unknown_category = budget.category(&txn.category_name).is_none();

    context.persist()?;
    output::success(format!("Recorded {txn}"));
    if unknown_category {
        output::warning(format!(
            "Category `{}` does not exist; the amount is not tracked against any budget",
            txn.category_name
        ));
    }
    Ok(())
}

fn flag_value<'a>(iter: &mut Iter<'_, &'a str>, flag: &str) -> Result<&'a str, CommandError> {
    iter.next()
        .copied()
        .ok_or_else(|| CommandError::InvalidArguments(format!("`{flag}` needs a value")))
}

fn cmd_transactions(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let month = match args {
        [] => None,
        [raw] => Some(SummaryService::parse_month(raw)?),
        _ => return Err(usage(context, "transactions")),
    };

    let transactions = TransactionService::list(context.budget(), month);
    match month {
        Some(month) => output::section(format!("Transactions in {month}")),
        None => output::section("Transactions"),
    }
    if transactions.is_empty() {
        output::info("  No transactions recorded.");
    }
    for txn in transactions {
        output::info(format!("  {txn}"));
    }
    Ok(())
}
