//! Ledger domain models: expenses, categories, and the balance-carrying ledger state.

pub mod category;
pub mod expense;
#[allow(clippy::module_inception)]
pub mod ledger;

pub use category::Category;
pub use expense::{Expense, ExpenseDraft, ExpenseId};
pub use ledger::{LedgerState, DEFAULT_BALANCE};
