use crate::cli::output::{info, section};
use crate::cli::shell_context::ShellContext;

use super::{CommandDefinition, CommandError, CommandResult};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandDefinition::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first().map(|name| name.to_lowercase()) {
        return match context.registry.get(&name) {
            Some(command) => {
                section(format!("Help: {}", command.name));
                info(format!("  Description: {}", command.description));
                info(format!("  Usage: {}", command.usage));
                Ok(())
            }
            None => Err(CommandError::UnknownCommand(name)),
        };
    }

    section("Available commands");
    for command in context.registry.iter() {
        info(format!("  {:<10} {}", command.name, command.description));
    }
    info("Use `help <command>` for details.");
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
