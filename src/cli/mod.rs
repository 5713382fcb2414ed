//! One-shot command line front end: each invocation runs a single command
//! against the stored budget.

pub mod commands;
pub mod context;
pub mod help;
pub mod output;

pub use context::CliContext;

use crate::{core::services::ServiceError, errors::BudgetError};

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("Unknown command `{0}`. Run `household_budget help` to list commands.")]
    UnknownCommand(String),
    #[error(transparent)]
    Core(#[from] BudgetError),
}

impl From<ServiceError> for CommandError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Budget(BudgetError::InvalidInput(message)) => {
                CommandError::InvalidArguments(message)
            }
            ServiceError::Budget(err) => CommandError::Core(err),
            ServiceError::Invalid(message) => CommandError::InvalidArguments(message),
        }
    }
}

/// Runs the command named by the first argument using the default data
/// directory.
pub fn run<S: AsRef<str>>(args: &[S]) -> CommandResult {
    let mut context = CliContext::load()?;
    let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
    let Some((command, rest)) = args.split_first() else {
        help::print_overview(context.registry());
        return Err(CommandError::InvalidArguments("missing command".into()));
    };
    context.dispatch(command, rest)
}
