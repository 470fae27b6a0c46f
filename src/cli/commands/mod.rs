use std::collections::HashMap;

use thiserror::Error;

pub mod expense;
pub mod report;
pub mod system;
pub mod wallet;

use crate::errors::LedgerError;

use super::shell_context::ShellContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Problems a command reports back to the shell loop.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unknown command `{0}`.")]
    UnknownCommand(String),
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(wallet::definitions());
    commands.extend(expense::definitions());
    commands.extend(report::definitions());
    commands.extend(system::definitions());
    commands
}

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

/// Lookup table of shell commands, iterated in registration order.
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new(all_definitions())
    }
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }
}

/// Turns a ledger rejection into a shell error unless the notification sink already told the
/// user about it.
pub(crate) fn settle<T>(result: crate::errors::Result<T>) -> Result<Option<T>, CommandError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err @ LedgerError::NotFound(_)) => Err(err.into()),
        Err(_) => Ok(None),
    }
}

pub(crate) fn parse_amount(raw: &str, field: &str) -> Result<f64, CommandError> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CommandError::InvalidArguments(format!("Invalid {field}: `{raw}`.")))
}

pub(crate) fn usage_error(definition_usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("Usage: {definition_usage}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_keeps_registration_order() {
        let registry = CommandRegistry::default();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names.first(), Some(&"balance"));
        assert_eq!(names.last(), Some(&"exit"));
        for name in ["expense", "edit", "delete", "list", "next", "prev", "breakdown", "top"] {
            assert!(registry.get(name).is_some(), "{name} registered");
        }
    }

    #[test]
    fn amounts_must_be_numbers() {
        assert_eq!(parse_amount("12.5", "price").unwrap(), 12.5);
        assert!(matches!(
            parse_amount("ten", "price"),
            Err(CommandError::InvalidArguments(message)) if message.contains("price")
        ));
        assert!(parse_amount("NaN", "amount").is_err());
    }

    #[test]
    fn only_not_found_escapes_settle() {
        assert!(matches!(
            settle::<()>(Err(LedgerError::NotFound(crate::ledger::ExpenseId(4)))),
            Err(CommandError::Ledger(_))
        ));
        assert!(matches!(
            settle::<()>(Err(LedgerError::InvalidAmount(0.0))),
            Ok(None)
        ));
        assert!(matches!(settle(Ok(3)), Ok(Some(3))));
    }
}
