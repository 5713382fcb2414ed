use crate::cli::commands::CommandDefinition;
use crate::cli::{help, output, CliContext, CommandError, CommandResult};
use crate::storage::BudgetStorage;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("path", "Show where the budget is stored", "path", cmd_path),
        CommandDefinition::new("version", "Show build metadata", "version", cmd_version),
        CommandDefinition::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
    ]
}

fn cmd_path(context: &mut CliContext, _args: &[&str]) -> CommandResult {
    output::info(context.storage().path().display());
    Ok(())
}

fn cmd_version(_context: &mut CliContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(meta.short_description());
    output::info(format!("  Version      : {}", meta.version));
    output::info(format!(
        "  Build hash   : {} ({})",
        meta.git_hash, meta.git_status
    ));
    output::info(format!("  Built at     : {}", meta.timestamp));
    output::info(format!("  Target       : {}", meta.target));
    output::info(format!("  Profile      : {}", meta.profile));
    output::info(format!("  Rustc        : {}", meta.rustc));
    Ok(())
}

fn cmd_help(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let Some(name) = args.first() else {
        help::print_overview(context.registry());
        return Ok(());
    };
    match context.command(name) {
        Some(command) => {
            help::print_command(command);
            Ok(())
        }
        None => Err(CommandError::UnknownCommand(name.to_string())),
    }
}
