use crate::cli::output::{info, section};
use crate::cli::shell_context::ShellContext;
use crate::core::services::CategorySlice;

use super::{expense::print_expense, usage_error, CommandDefinition, CommandError, CommandResult};

const LIST_USAGE: &str = "list [page]";
const EMPTY_LIST: &str = "No transactions yet. Add an expense to get started.";
const NO_DATA: &str = "No Data";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("list", "Show recent transactions", LIST_USAGE, cmd_list),
        CommandDefinition::new("next", "Show the next page of transactions", "next", cmd_next),
        CommandDefinition::new(
            "prev",
            "Show the previous page of transactions",
            "prev",
            cmd_prev,
        ),
        CommandDefinition::new(
            "breakdown",
            "Show spending share per category",
            "breakdown",
            cmd_breakdown,
        ),
        CommandDefinition::new("top", "Show the top spending categories", "top", cmd_top),
    ]
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {}
        [raw] => {
            let page = raw
                .parse::<usize>()
                .ok()
                .filter(|page| *page >= 1)
                .ok_or_else(|| {
                    CommandError::InvalidArguments(format!("Invalid page number: `{raw}`."))
                })?;
            context.manager.go_to_page(page);
        }
        _ => return Err(usage_error(LIST_USAGE)),
    }
    print_recent(context);
    Ok(())
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.manager.next_page() {
        info("Already on the last page.");
    }
    print_recent(context);
    Ok(())
}

fn cmd_prev(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.manager.previous_page() {
        info("Already on the first page.");
    }
    print_recent(context);
    Ok(())
}

fn cmd_breakdown(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    section("Expenses by Category");
    print_slices(context, &context.manager.category_breakdown());
    Ok(())
}

fn cmd_top(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    section("Top Expenses");
    let limit = context.config.top_categories;
    print_slices(context, &context.manager.top_categories(limit));
    Ok(())
}

fn print_recent(context: &ShellContext) {
    section("Recent Transactions");
    let page = context.manager.recent_page();
    if page.items.is_empty() {
        info(EMPTY_LIST);
        return;
    }
    for expense in page.items {
        print_expense(context, expense);
    }
    info(page.label());
}

fn print_slices(context: &ShellContext, slices: &[CategorySlice]) {
    if slices.is_empty() {
        info(NO_DATA);
        return;
    }
    for slice in slices {
        info(format!(
            "  {:<14} {:>12}  {:>3}%",
            slice.category,
            context.money(slice.total_value),
            slice.percentage
        ));
    }
}
