use crate::cli::output::{info, section, warning};
use crate::cli::shell_context::ShellContext;

use super::{parse_amount, settle, usage_error, CommandDefinition, CommandResult};

const INCOME_USAGE: &str = "income <amount>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "balance",
            "Show wallet balance and total expenses",
            "balance",
            cmd_balance,
        ),
        CommandDefinition::new("income", "Add income to the wallet", INCOME_USAGE, cmd_income),
    ]
}

fn cmd_balance(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    section("Wallet");
    info(format!(
        "  Wallet Balance : {}",
        context.money(context.manager.wallet_balance())
    ));
    info(format!(
        "  Total Expenses : {}",
        context.money(context.manager.total_expenses())
    ));
    if let Some(err) = context.manager.last_persist_error() {
        warning(format!("Changes are not being saved: {err}"));
    }
    Ok(())
}

fn cmd_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(usage_error(INCOME_USAGE));
    };
    let amount = parse_amount(raw, "amount")?;
    if let Some(balance) = settle(context.manager.add_income(amount))? {
        info(format!("Wallet Balance: {}", context.money(balance)));
    }
    Ok(())
}
