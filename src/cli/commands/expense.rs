use chrono::{Local, NaiveDate};

use crate::cli::output::{info, section};
use crate::cli::shell_context::ShellContext;
use crate::currency::format_expense_date_str;
use crate::errors::LedgerError;
use crate::ledger::{Category, Expense, ExpenseDraft, ExpenseId};

use super::{
    parse_amount, settle, usage_error, CommandDefinition, CommandError, CommandResult,
};

const EXPENSE_USAGE: &str = "expense <title> <price> <category> [YYYY-MM-DD]";
const EDIT_USAGE: &str = "edit <id> [<title> <price> <category> <YYYY-MM-DD>]";
const DELETE_USAGE: &str = "delete <id>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "expense",
            "Record an expense (date defaults to today)",
            EXPENSE_USAGE,
            cmd_expense,
        ),
        CommandDefinition::new(
            "edit",
            "Show an expense for editing, or replace its fields",
            EDIT_USAGE,
            cmd_edit,
        ),
        CommandDefinition::new("delete", "Delete an expense and refund it", DELETE_USAGE, cmd_delete),
    ]
}

fn cmd_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let draft = match args {
        [title, price, category] => parse_draft(title, price, category, None)?,
        [title, price, category, date] => parse_draft(title, price, category, Some(date))?,
        _ => return Err(usage_error(EXPENSE_USAGE)),
    };
    if let Some(id) = settle(context.manager.add_expense(draft))? {
        info(format!("Recorded as #{id}."));
    }
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (raw_id, fields) = match args {
        [raw_id] => (raw_id, None),
        [raw_id, title, price, category, date] => (raw_id, Some((title, price, category, date))),
        _ => return Err(usage_error(EDIT_USAGE)),
    };
    let id = parse_id(raw_id)?;
    let current = context
        .manager
        .start_editing(id)
        .cloned()
        .ok_or(LedgerError::NotFound(id))?;

    let Some((title, price, category, date)) = fields else {
        section(format!("Editing #{id}"));
        print_expense(context, &current);
        info(format!("Apply changes with `edit {id} <title> <price> <category> <date>`."));
        return Ok(());
    };

    let draft = match parse_draft(title, price, category, Some(date)) {
        Ok(draft) => draft,
        Err(err) => {
            context.manager.cancel_editing();
            return Err(err);
        }
    };
    let outcome = settle(context.manager.edit_expense(id, draft));
    context.manager.cancel_editing();
    outcome.map(|_| ())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw_id] = args else {
        return Err(usage_error(DELETE_USAGE));
    };
    let id = parse_id(raw_id)?;
    settle(context.manager.delete_expense(id))?;
    Ok(())
}

pub(crate) fn print_expense(context: &ShellContext, expense: &Expense) {
    info(format!(
        "  #{:<15} {:<20} {:>12}  {:<14} {}",
        expense.id,
        expense.title,
        context.money(expense.price),
        expense.category,
        format_expense_date_str(&expense.date)
    ));
}

fn parse_id(raw: &str) -> Result<ExpenseId, CommandError> {
    raw.trim_start_matches('#')
        .parse::<u64>()
        .map(ExpenseId)
        .map_err(|_| CommandError::InvalidArguments(format!("Invalid expense id: `{raw}`.")))
}

fn parse_draft(
    title: &str,
    price: &str,
    category: &str,
    date: Option<&&str>,
) -> Result<ExpenseDraft, CommandError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CommandError::InvalidArguments(
            "Expense title cannot be empty.".into(),
        ));
    }
    let price = parse_amount(price, "price")?;
    let category = category.trim();
    if category.is_empty() {
        return Err(CommandError::InvalidArguments(
            "Expense category cannot be empty.".into(),
        ));
    }
    let date = match date {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
            CommandError::InvalidArguments(format!("Invalid date `{raw}`; expected YYYY-MM-DD."))
        })?,
        None => Local::now().date_naive(),
    };
    Ok(ExpenseDraft::new(
        title,
        price,
        Category::lookup(category),
        date.format("%Y-%m-%d").to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drafts_normalise_category_and_date() {
        let draft = parse_draft("Coffee", "4.5", "food", Some(&"2024-03-01")).unwrap();
        assert_eq!(draft.category, Category::Food);
        assert_eq!(draft.date, "2024-03-01");
        assert_eq!(draft.price, 4.5);
    }

    #[test]
    fn missing_date_means_today() {
        let draft = parse_draft("Coffee", "4.5", "Food", None).unwrap();
        assert_eq!(draft.date, Local::now().date_naive().format("%Y-%m-%d").to_string());
    }

    #[test]
    fn malformed_fields_are_rejected() {
        assert!(parse_draft("  ", "4.5", "Food", None).is_err());
        assert!(parse_draft("Coffee", "cheap", "Food", None).is_err());
        assert!(parse_draft("Coffee", "4.5", "Food", Some(&"01/03/2024")).is_err());
    }

    #[test]
    fn ids_accept_hash_prefix() {
        assert_eq!(parse_id("#17").unwrap(), ExpenseId(17));
        assert!(parse_id("seventeen").is_err());
    }
}
