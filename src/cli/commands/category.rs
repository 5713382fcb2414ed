use crate::cli::commands::{usage, CommandDefinition};
use crate::cli::{output, CliContext, CommandResult};
use crate::core::services::{CategoryService, TransactionService};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "categories",
            "List categories with budgeted, spent and remaining amounts",
            "categories",
            cmd_categories,
        ),
        CommandDefinition::new(
            "category",
            "Create a category or change its budgeted amount",
            "category <name> <budgeted>",
            cmd_category,
        ),
    ]
}

fn cmd_categories(context: &mut CliContext, _args: &[&str]) -> CommandResult {
    let budget = context.budget();
    output::section("Categories");
    for category in CategoryService::list(budget) {
        output::info(format!("  {category}"));
    }
    Ok(())
}

/// The last argument is the amount; everything before it is the name, so
/// names with spaces need no quoting.
fn cmd_category(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let Some((amount, name_parts)) = args.split_last().filter(|(_, name)| !name.is_empty()) else {
        return Err(usage(context, "category"));
    };
    let budgeted = TransactionService::parse_amount(amount)?;
    let name = name_parts.join(" ");

    CategoryService::upsert(context.budget(), &name, budgeted)?;
    context.persist()?;
    output::success(format!(
        "Category `{}` budgeted at {}",
        name.trim(),
        output::money(budgeted)
    ));
    Ok(())
}
