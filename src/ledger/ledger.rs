use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

use super::expense::{Expense, ExpenseDraft, ExpenseId};

/// Opening wallet balance for a fresh ledger.
pub const DEFAULT_BALANCE: f64 = 5000.0;

/// Wallet balance, expenses (newest first) and their running total.
///
/// Fields are only reachable through the transition methods below, each of which either applies
/// completely or returns an error with the state untouched. After every transition
/// `total_expenses` equals the sum of `price` over `expenses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerState {
    wallet_balance: f64,
    #[serde(default)]
    expenses: Vec<Expense>,
    #[serde(default)]
    total_expenses: f64,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self::with_balance(DEFAULT_BALANCE)
    }
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(wallet_balance: f64) -> Self {
        Self {
            wallet_balance,
            expenses: Vec::new(),
            total_expenses: 0.0,
        }
    }

    /// Rebuilds a ledger from a bare expense list, charging every expense against
    /// `opening_balance`.
    pub fn from_expenses(expenses: Vec<Expense>, opening_balance: f64) -> Self {
        let total: f64 = expenses.iter().map(|expense| expense.price).sum();
        Self {
            wallet_balance: opening_balance - total,
            expenses,
            total_expenses: total,
        }
    }

    pub fn wallet_balance(&self) -> f64 {
        self.wallet_balance
    }

    pub fn total_expenses(&self) -> f64 {
        self.total_expenses
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn expense(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Highest id currently stored, used to seed id generation after a load.
    pub fn max_id(&self) -> Option<ExpenseId> {
        self.expenses.iter().map(|expense| expense.id).max()
    }

    /// Sum of prices computed from scratch.
    pub fn recomputed_total(&self) -> f64 {
        self.expenses.iter().map(|expense| expense.price).sum()
    }

    /// Adds `amount` to the wallet and returns the new balance.
    pub fn deposit(&mut self, amount: f64) -> Result<f64> {
        ensure_positive(amount)?;
        self.wallet_balance += amount;
        Ok(self.wallet_balance)
    }

    /// Prepends `expense`, charging its price to the wallet.
    pub fn record_expense(&mut self, expense: Expense) -> Result<ExpenseId> {
        self.check_affordable(expense.price)?;
        if self.expense(expense.id).is_some() {
            return Err(LedgerError::InvalidInput(format!(
                "expense id {} already exists",
                expense.id
            )));
        }
        let id = expense.id;
        self.wallet_balance -= expense.price;
        self.total_expenses += expense.price;
        self.expenses.insert(0, expense);
        Ok(id)
    }

    /// Checks that a new expense of `price` could be recorded against the current balance.
    pub fn check_affordable(&self, price: f64) -> Result<()> {
        ensure_positive(price)?;
        if price > self.wallet_balance {
            return Err(LedgerError::InsufficientBalance {
                required: price,
                available: self.wallet_balance,
            });
        }
        Ok(())
    }

    /// Replaces the expense identified by `id` with `draft`, settling the price difference
    /// against the wallet. Returns the previous record.
    pub fn replace_expense(&mut self, id: ExpenseId, draft: ExpenseDraft) -> Result<Expense> {
        let index = self
            .position(id)
            .ok_or(LedgerError::NotFound(id))?;
        ensure_positive(draft.price)?;
        let delta = draft.price - self.expenses[index].price;
        if self.wallet_balance - delta < 0.0 {
            return Err(LedgerError::InsufficientBalance {
                required: delta,
                available: self.wallet_balance,
            });
        }
        self.wallet_balance -= delta;
        self.total_expenses += delta;
        let previous = std::mem::replace(&mut self.expenses[index], draft.into_expense(id));
        Ok(previous)
    }

    /// Removes the expense identified by `id`, refunding its price to the wallet.
    pub fn remove_expense(&mut self, id: ExpenseId) -> Result<Expense> {
        let index = self
            .position(id)
            .ok_or(LedgerError::NotFound(id))?;
        let removed = self.expenses.remove(index);
        self.wallet_balance += removed.price;
        if self.expenses.is_empty() {
            self.total_expenses = 0.0;
        } else {
            self.total_expenses -= removed.price;
        }
        Ok(removed)
    }

    /// Resets `total_expenses` to the recomputed sum when the two genuinely disagree, returning
    /// the stale value. Differences within summation rounding keep the stored total.
    pub(crate) fn reconcile_total(&mut self) -> Option<f64> {
        let recomputed = self.recomputed_total();
        let tolerance = TOTAL_TOLERANCE
            * recomputed.abs().max(1.0)
            * (self.expenses.len().max(1) as f64);
        if !self.total_expenses.is_finite()
            || (recomputed - self.total_expenses).abs() > tolerance
        {
            let stale = self.total_expenses;
            self.total_expenses = recomputed;
            Some(stale)
        } else {
            None
        }
    }

    fn position(&self, id: ExpenseId) -> Option<usize> {
        self.expenses.iter().position(|expense| expense.id == id)
    }
}

/// Relative drift per expense tolerated between a stored total and a fresh sum.
const TOTAL_TOLERANCE: f64 = 1e-9;

fn ensure_positive(amount: f64) -> Result<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(LedgerError::InvalidAmount(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Category;

    fn expense(id: u64, price: f64) -> Expense {
        ExpenseDraft::new(format!("Item {id}"), price, Category::Food, "2024-01-01")
            .into_expense(ExpenseId(id))
    }

    fn assert_total_matches(state: &LedgerState) {
        assert_eq!(state.total_expenses(), state.recomputed_total());
    }

    #[test]
    fn fresh_ledger_uses_default_balance() {
        let state = LedgerState::new();
        assert_eq!(state.wallet_balance(), 5000.0);
        assert!(state.is_empty());
        assert_eq!(state.total_expenses(), 0.0);
    }

    #[test]
    fn deposit_rejects_non_positive_amounts() {
        let mut state = LedgerState::new();
        assert_eq!(state.deposit(0.0), Err(LedgerError::InvalidAmount(0.0)));
        assert!(matches!(
            state.deposit(f64::NAN),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert_eq!(state.deposit(250.0), Ok(5250.0));
    }

    #[test]
    fn record_expense_prepends_and_charges_wallet() {
        let mut state = LedgerState::new();
        state.record_expense(expense(1, 10.0)).unwrap();
        state.record_expense(expense(2, 15.0)).unwrap();

        assert_eq!(state.expenses()[0].id, ExpenseId(2));
        assert_eq!(state.expenses()[1].id, ExpenseId(1));
        assert_eq!(state.wallet_balance(), 4975.0);
        assert_eq!(state.total_expenses(), 25.0);
        assert_total_matches(&state);
    }

    #[test]
    fn record_expense_allows_spending_the_whole_balance() {
        let mut state = LedgerState::with_balance(40.0);
        state.record_expense(expense(1, 40.0)).unwrap();
        assert_eq!(state.wallet_balance(), 0.0);
    }

    #[test]
    fn record_expense_rejects_duplicate_ids() {
        let mut state = LedgerState::new();
        state.record_expense(expense(1, 10.0)).unwrap();
        let before = state.clone();
        let err = state.record_expense(expense(1, 3.0)).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
        assert_eq!(state, before);
    }

    #[test]
    fn replace_checks_post_edit_balance() {
        let mut state = LedgerState::with_balance(30.0);
        state.record_expense(expense(1, 20.0)).unwrap();
        // balance 10: raising the price by exactly 10 empties the wallet
        state
            .replace_expense(ExpenseId(1), ExpenseDraft::new("Item", 30.0, "Food", "2024-01-02"))
            .unwrap();
        assert_eq!(state.wallet_balance(), 0.0);

        let before = state.clone();
        let err = state
            .replace_expense(ExpenseId(1), ExpenseDraft::new("Item", 30.5, "Food", "2024-01-02"))
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientBalance {
                required: 0.5,
                available: 0.0
            }
        );
        assert_eq!(state, before);
    }

    #[test]
    fn replace_with_lower_price_refunds_difference() {
        let mut state = LedgerState::with_balance(100.0);
        state.record_expense(expense(1, 60.0)).unwrap();
        let previous = state
            .replace_expense(ExpenseId(1), ExpenseDraft::new("Cheaper", 20.0, "Other", "2024-02-01"))
            .unwrap();
        assert_eq!(previous.price, 60.0);
        assert_eq!(state.wallet_balance(), 80.0);
        assert_eq!(state.total_expenses(), 20.0);
        let stored = state.expense(ExpenseId(1)).unwrap();
        assert_eq!(stored.title, "Cheaper");
        assert_eq!(stored.category, Category::Other);
        assert_total_matches(&state);
    }

    #[test]
    fn remove_unknown_id_reports_not_found() {
        let mut state = LedgerState::new();
        state.record_expense(expense(1, 10.0)).unwrap();
        let before = state.clone();
        assert_eq!(
            state.remove_expense(ExpenseId(99)),
            Err(LedgerError::NotFound(ExpenseId(99)))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn removing_last_expense_zeroes_total() {
        let mut state = LedgerState::new();
        state.record_expense(expense(1, 0.1)).unwrap();
        state.record_expense(expense(2, 0.2)).unwrap();
        state.remove_expense(ExpenseId(1)).unwrap();
        state.remove_expense(ExpenseId(2)).unwrap();
        assert_eq!(state.total_expenses(), 0.0);
    }

    #[test]
    fn from_expenses_charges_opening_balance() {
        let state = LedgerState::from_expenses(vec![expense(1, 100.0), expense(2, 50.0)], 5000.0);
        assert_eq!(state.wallet_balance(), 4850.0);
        assert_eq!(state.total_expenses(), 150.0);
        assert_eq!(state.max_id(), Some(ExpenseId(2)));
    }

    #[test]
    fn reconcile_total_keeps_rounding_noise() {
        let mut state = LedgerState::new();
        for id in 1..=60 {
            state.record_expense(expense(id, id as f64 * 0.07 + 0.01)).unwrap();
        }
        let running = state.total_expenses();
        assert_eq!(state.reconcile_total(), None);
        assert_eq!(state.total_expenses(), running);
    }

    #[test]
    fn replace_unknown_id_is_not_found_before_price_checks() {
        let mut state = LedgerState::new();
        assert_eq!(
            state.replace_expense(
                ExpenseId(42),
                ExpenseDraft::new("X", -1.0, Category::Other, "2024-01-01")
            ),
            Err(LedgerError::NotFound(ExpenseId(42)))
        );
    }

    #[test]
    fn reconcile_total_repairs_stale_value() {
        let mut state = LedgerState::from_expenses(vec![expense(1, 12.0)], 100.0);
        state.total_expenses = 99.0;
        assert_eq!(state.reconcile_total(), Some(99.0));
        assert_eq!(state.total_expenses(), 12.0);
        assert_eq!(state.reconcile_total(), None);
    }
}
