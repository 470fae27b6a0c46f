use strsim::levenshtein;

use crate::{
    config::{Config, ConfigManager},
    core::ledger_manager::{LedgerManager, ManagerOptions},
    currency::format_currency,
    errors::{CliError, LedgerError},
    storage::JsonFileStore,
};

use super::{
    commands::{CommandError, CommandRegistry, LoopControl},
    output::{self, OutputPreferences, TerminalSink},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// State shared by every command of one shell session.
pub struct ShellContext {
    pub mode: CliMode,
    pub manager: LedgerManager,
    pub config: Config,
    pub registry: CommandRegistry,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Loads configuration and the persisted ledger from the application directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let store = JsonFileStore::new(config_manager.state_dir(&config))?;
        let manager = LedgerManager::with_options(
            Box::new(store),
            Box::new(TerminalSink),
            ManagerOptions::from_config(&config),
        );
        Ok(Self::with_manager(mode, manager, config))
    }

    pub fn with_manager(mode: CliMode, manager: LedgerManager, config: Config) -> Self {
        output::set_preferences(OutputPreferences {
            color_enabled: config.ui_color_enabled && mode == CliMode::Interactive,
        });
        for warning in manager.load_warnings() {
            output::warning(warning);
        }
        Self {
            mode,
            manager,
            config,
            registry: CommandRegistry::default(),
            last_command: None,
            running: true,
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        format!("wallet [{}]> ", self.money(self.manager.wallet_balance()))
    }

    pub fn money(&self, amount: f64) -> String {
        format_currency(amount, &self.config.currency_symbol)
    }

    pub fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<LoopControl, CommandError> {
        let handler = match self.registry.get(command) {
            Some(definition) => definition.handler,
            None => return Err(CommandError::UnknownCommand(command.to_string())),
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::UnknownCommand(name) => {
                output::error(format!("Unknown command `{name}`."));
                self.suggest_command(&name);
            }
            CommandError::Ledger(LedgerError::NotFound(id)) => {
                output::error(format!("No expense with id #{id}."));
            }
            other => output::error(other),
        }
    }

    pub fn suggest_command(&self, input: &str) {
        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);
        match best {
            Some((distance, name)) if distance <= 3 => {
                output::info(format!("Did you mean `{name}`?"));
            }
            _ => output::info("Type `help` to list commands."),
        }
    }
}
