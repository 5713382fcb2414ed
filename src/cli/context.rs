use std::path::PathBuf;

use strsim::levenshtein;

use crate::{
    cli::{
        commands::{self, CommandDefinition, CommandRegistry},
        output::{self, OutputPreferences},
        CommandError, CommandResult,
    },
    config::{Config, ConfigManager},
    ledger::Budget,
    storage::{BudgetStorage, JsonStorage},
    utils::paths,
};

/// State shared by command handlers during one invocation. The budget is
/// read from storage the first time a handler asks for it.
pub struct CliContext {
    registry: CommandRegistry,
    config: Config,
    storage: JsonStorage,
    budget: Option<Budget>,
}

impl CliContext {
    pub fn load() -> Result<Self, CommandError> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, CommandError> {
        let manager = ConfigManager::with_base_dir(base)?;
        let config = manager.load()?;
        output::set_preferences(OutputPreferences {
            color: config.color_output,
        });
        let storage = JsonStorage::new(config.budget_path(manager.base_dir()));
        Ok(Self {
            registry: CommandRegistry::new(commands::all_definitions()),
            config,
            storage,
            budget: None,
        })
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn storage(&self) -> &JsonStorage {
        &self.storage
    }

    pub fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(&name.to_ascii_lowercase())
    }

    pub fn budget(&mut self) -> &mut Budget {
        let policy = self.config.expansion_policy();
        let storage = &self.storage;
        self.budget
            .get_or_insert_with(|| storage.load().with_expansion_policy(policy))
    }

    /// Writes the budget back if this invocation loaded it.
    pub fn persist(&self) -> CommandResult {
        if let Some(budget) = &self.budget {
            self.storage.save(budget)?;
        }
        Ok(())
    }

    pub fn dispatch(&mut self, name: &str, args: &[&str]) -> CommandResult {
        let Some(handler) = self.command(name).map(|definition| definition.handler) else {
            if let Some(best) = self.suggest_command(name) {
                output::info(format!("Suggestion: `{best}`?"));
            }
            return Err(CommandError::UnknownCommand(name.to_string()));
        };
        handler(self, args)
    }

    /// Closest registered command name within three edits of `input`.
    pub fn suggest_command(&self, input: &str) -> Option<&'static str> {
        let input = input.to_ascii_lowercase();
        self.registry
            .names()
            .map(|key| (levenshtein(key, &input), key))
            .filter(|(distance, _)| *distance <= 3)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, key)| key)
    }
}
