use crate::cli::commands::{usage, CommandDefinition};
use crate::cli::{output, CliContext, CommandError, CommandResult};
use crate::core::services::SummaryService;
use crate::ledger::{month::today, recurring};

const DEFAULT_UPCOMING_PER_SERIES: usize = 3;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "summary",
            "Show income, expense and balance for the current month",
            "summary",
            cmd_summary,
        ),
        CommandDefinition::new(
            "month",
            "Show or change the current month",
            "month [YYYY-MM|now]",
            cmd_month,
        ),
        CommandDefinition::new(
            "upcoming",
            "List the next occurrences of recurring transactions",
            "upcoming [count]",
            cmd_upcoming,
        ),
    ]
}

fn cmd_summary(context: &mut CliContext, _args: &[&str]) -> CommandResult {
    let report = SummaryService::monthly(context.budget());
    if report.generated > 0 {
        context.persist()?;
    }

    let summary = report.summary;
    output::section(format!("Summary for {}", summary.month));
    output::info(format!("  Income : {}", output::money(summary.income)));
    output::info(format!("  Expense: {}", output::money(summary.expense)));
    output::info(format!("  Balance: {}", output::money(summary.balance)));
    output::info("  Spent by category:");
    for (name, spent) in &summary.category_spent {
        output::info(format!("    {name}: {}", output::money(*spent)));
    }
    if report.generated > 0 {
        output::info(format!(
            "  Added {} recurring occurrence(s) for {}.",
            report.generated, summary.month
        ));
    }
    Ok(())
}

fn cmd_month(context: &mut CliContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            let month = context.budget().current_month();
            output::info(format!("Current month: {month}"));
            Ok(())
        }
        [raw] => {
            let month = SummaryService::set_month(context.budget(), raw)?;
            context.persist()?;
            output::success(format!("Current month set to {month}"));
            Ok(())
        }
        _ => Err(usage(context, "month")),
    }
}

fn cmd_upcoming(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let per_series = match args {
        [] => DEFAULT_UPCOMING_PER_SERIES,
        [raw] => raw
            .parse::<usize>()
            .ok()
            .filter(|count| *count > 0)
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!("`{raw}` is not a positive count"))
            })?,
        _ => return Err(usage(context, "upcoming")),
    };

    let upcoming = SummaryService::upcoming(context.budget(), today(), per_series);
    output::section("Upcoming recurring transactions");
    if upcoming.is_empty() {
        output::info("  Nothing scheduled.");
        return Ok(());
    }
    for occurrence in &upcoming {
        let description = if occurrence.description.is_empty() {
            String::new()
        } else {
            format!(" - {}", occurrence.description)
        };
        output::info(format!(
            "  {} {:<7} {:>10}  {}{} [{}]",
            occurrence.date,
            occurrence.transaction_type,
            output::money(occurrence.amount),
            occurrence.category_name,
            description,
            occurrence.recurrence_type
        ));
    }
    output::info("  Projected by category:");
    for (category, total) in recurring::upcoming_totals(&upcoming) {
        output::info(format!("    {category}: {}", output::money(total)));
    }
    Ok(())
}
