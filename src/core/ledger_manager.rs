use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::{
    config::Config,
    errors::{LedgerError, Result},
    ledger::{Expense, ExpenseDraft, ExpenseId, LedgerState},
    storage::{KeyValueStore, LedgerPersistence, LoadSource},
};

use super::{
    clock::{Clock, SystemClock},
    ids::IdGenerator,
    notifications::{Notification, NotificationSink},
    services::{paginate, total_pages, CategorySlice, Pager, RecentPage, SummaryService},
};

/// A manager shared between threads. Every operation goes through the one lock, which keeps
/// balance, total and expense list consistent with each other.
pub type SharedLedger = Arc<Mutex<LedgerManager>>;

/// Construction settings for [`LedgerManager`].
pub struct ManagerOptions {
    pub opening_balance: f64,
    pub page_size: usize,
    pub clock: Box<dyn Clock>,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl ManagerOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            opening_balance: config.default_balance,
            page_size: config.page_size,
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

/// Sole owner of the wallet ledger.
///
/// Mutations validate first and apply as one step, so a rejected call leaves the ledger exactly
/// as it was. Each accepted mutation is written through to the store before returning, and each
/// mutation reports its outcome to the notification sink.
pub struct LedgerManager {
    state: LedgerState,
    persistence: LedgerPersistence,
    notifier: Box<dyn NotificationSink>,
    ids: IdGenerator,
    pager: Pager,
    editing: Option<ExpenseId>,
    load_source: LoadSource,
    load_warnings: Vec<String>,
    last_persist_error: Option<String>,
}

impl LedgerManager {
    pub fn new(store: Box<dyn KeyValueStore>, notifier: Box<dyn NotificationSink>) -> Self {
        Self::with_options(store, notifier, ManagerOptions::default())
    }

    /// Restores the ledger from `store`, falling back to a fresh one when nothing usable is
    /// stored.
    pub fn with_options(
        store: Box<dyn KeyValueStore>,
        notifier: Box<dyn NotificationSink>,
        options: ManagerOptions,
    ) -> Self {
        let persistence = LedgerPersistence::with_opening_balance(store, options.opening_balance);
        let report = persistence.load();
        for warning in &report.warnings {
            warn!("{warning}");
        }
        info!(
            source = ?report.source,
            expenses = report.state.len(),
            balance = report.state.wallet_balance(),
            "ledger loaded"
        );

        let mut ids = IdGenerator::new(options.clock);
        if let Some(max) = report.state.max_id() {
            ids.observe(max);
        }

        Self {
            state: report.state,
            persistence,
            notifier,
            ids,
            pager: Pager::new(options.page_size),
            editing: None,
            load_source: report.source,
            load_warnings: report.warnings,
            last_persist_error: None,
        }
    }

    pub fn into_shared(self) -> SharedLedger {
        Arc::new(Mutex::new(self))
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn wallet_balance(&self) -> f64 {
        self.state.wallet_balance()
    }

    pub fn total_expenses(&self) -> f64 {
        self.state.total_expenses()
    }

    pub fn expenses(&self) -> &[Expense] {
        self.state.expenses()
    }

    pub fn expense(&self, id: ExpenseId) -> Option<&Expense> {
        self.state.expense(id)
    }

    pub fn load_source(&self) -> LoadSource {
        self.load_source
    }

    pub fn load_warnings(&self) -> &[String] {
        &self.load_warnings
    }

    /// Message of the most recent failed write, cleared by the next successful one.
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.ids.clock()
    }

    /// Adds `amount` to the wallet and returns the new balance.
    pub fn add_income(&mut self, amount: f64) -> Result<f64> {
        match self.state.deposit(amount) {
            Ok(balance) => {
                info!(amount, balance, "income added");
                self.persist();
                self.notify(Notification::success(
                    "Income Added",
                    format!("Added {amount} to your wallet balance."),
                ));
                Ok(balance)
            }
            Err(err) => self.reject("add_income", err),
        }
    }

    /// Records a new expense at the head of the list and charges it to the wallet.
    pub fn add_expense(&mut self, draft: ExpenseDraft) -> Result<ExpenseId> {
        if let Err(err) = self.state.check_affordable(draft.price) {
            return self.reject("add_expense", err);
        }
        let id = self.ids.next_id();
        let title = draft.title.clone();
        match self.state.record_expense(draft.into_expense(id)) {
            Ok(id) => {
                info!(%id, title = %title, balance = self.state.wallet_balance(), "expense added");
                self.persist();
                self.notify(Notification::success(
                    "Expense Added",
                    format!("Added {title} to your expenses."),
                ));
                Ok(id)
            }
            Err(err) => self.reject("add_expense", err),
        }
    }

    /// Replaces the expense identified by `id`, settling the price difference against the
    /// wallet. The wallet may not end up negative.
    pub fn edit_expense(&mut self, id: ExpenseId, draft: ExpenseDraft) -> Result<()> {
        let title = draft.title.clone();
        match self.state.replace_expense(id, draft) {
            Ok(previous) => {
                info!(
                    %id,
                    old_price = previous.price,
                    balance = self.state.wallet_balance(),
                    "expense updated"
                );
                self.editing = None;
                self.persist();
                self.notify(Notification::success(
                    "Expense Updated",
                    format!("Updated {title} in your expenses."),
                ));
                Ok(())
            }
            Err(err) => self.reject("edit_expense", err),
        }
    }

    /// Removes the expense identified by `id` and refunds its price.
    pub fn delete_expense(&mut self, id: ExpenseId) -> Result<Expense> {
        match self.state.remove_expense(id) {
            Ok(removed) => {
                info!(%id, balance = self.state.wallet_balance(), "expense deleted");
                if self.editing == Some(id) {
                    self.editing = None;
                }
                self.pager.clamp(self.state.len());
                self.persist();
                self.notify(Notification::success(
                    "Expense Deleted",
                    format!("Deleted {} from your expenses.", removed.title),
                ));
                Ok(removed)
            }
            Err(err) => self.reject("delete_expense", err),
        }
    }

    /// Selects the expense to be edited, returning it when it exists.
    pub fn start_editing(&mut self, id: ExpenseId) -> Option<&Expense> {
        self.state.expense(id)?;
        self.editing = Some(id);
        self.state.expense(id)
    }

    pub fn editing(&self) -> Option<&Expense> {
        self.editing.and_then(|id| self.state.expense(id))
    }

    pub fn cancel_editing(&mut self) {
        self.editing = None;
    }

    pub fn category_breakdown(&self) -> Vec<CategorySlice> {
        SummaryService::category_breakdown(self.state.expenses())
    }

    pub fn top_categories(&self, limit: usize) -> Vec<CategorySlice> {
        SummaryService::top_categories(self.state.expenses(), limit)
    }

    /// Slice of the newest-first expense list for `page_number` (1-based).
    pub fn paginate(&self, page_size: usize, page_number: usize) -> Result<&[Expense]> {
        paginate(self.state.expenses(), page_size, page_number)
    }

    pub fn total_pages(&self, page_size: usize) -> usize {
        total_pages(self.state.len(), page_size)
    }

    /// The page under the manager's own cursor.
    pub fn recent_page(&self) -> RecentPage<'_> {
        self.pager.page(self.state.expenses())
    }

    pub fn next_page(&mut self) -> bool {
        self.pager.next_page(self.state.len())
    }

    pub fn previous_page(&mut self) -> bool {
        self.pager.previous_page()
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.pager.go_to(page, self.state.len());
    }

    fn persist(&mut self) {
        match self.persistence.save(&self.state) {
            Ok(()) => self.last_persist_error = None,
            Err(err) => {
                warn!(error = %err, "failed to persist ledger; keeping in-memory state");
                self.last_persist_error = Some(err.to_string());
            }
        }
    }

    fn reject<T>(&self, operation: &str, err: LedgerError) -> Result<T> {
        warn!(operation, error = %err, "ledger operation rejected");
        if let Some(notification) = rejection_notice(operation, &err) {
            self.notify(notification);
        }
        Err(err)
    }

    fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }
}

fn rejection_notice(operation: &str, err: &LedgerError) -> Option<Notification> {
    match err {
        LedgerError::InvalidAmount(_) => Some(Notification::failure(
            "Invalid Amount",
            "Please enter a positive amount",
        )),
        LedgerError::InsufficientBalance { .. } if operation == "edit_expense" => Some(
            Notification::failure(
                "Insufficient Balance",
                "New expense amount exceeds wallet balance!",
            ),
        ),
        LedgerError::InsufficientBalance { .. } => Some(Notification::failure(
            "Insufficient Balance",
            "Expense amount exceeds wallet balance!",
        )),
        LedgerError::InvalidInput(message) => {
            Some(Notification::failure("Invalid Input", message.clone()))
        }
        LedgerError::NotFound(_) => None,
    }
}
