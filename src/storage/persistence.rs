use std::collections::HashSet;

use tracing::{debug, warn};

use crate::{
    errors::StorageResult,
    ledger::{Expense, LedgerState, DEFAULT_BALANCE},
};

use super::KeyValueStore;

/// Key of the full ledger snapshot.
pub const STATE_KEY: &str = "expenseTrackerState";
/// Key of the bare expense list kept for older readers.
pub const EXPENSES_KEY: &str = "expenses";

/// Which record a ledger was restored from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Snapshot,
    LegacyExpenses,
    Default,
}

/// Outcome of [`LedgerPersistence::load`].
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub state: LedgerState,
    pub source: LoadSource,
    pub warnings: Vec<String>,
}

/// Reads and writes [`LedgerState`] through a [`KeyValueStore`].
pub struct LedgerPersistence {
    store: Box<dyn KeyValueStore>,
    opening_balance: f64,
}

impl LedgerPersistence {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self::with_opening_balance(store, DEFAULT_BALANCE)
    }

    /// `opening_balance` seeds fresh ledgers and legacy reconstruction.
    pub fn with_opening_balance(store: Box<dyn KeyValueStore>, opening_balance: f64) -> Self {
        Self {
            store,
            opening_balance,
        }
    }

    pub fn opening_balance(&self) -> f64 {
        self.opening_balance
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Restores the ledger, preferring the snapshot record over the legacy expense list.
    /// Unreadable or malformed data is reported and replaced by a fresh ledger.
    pub fn load(&self) -> LoadReport {
        let mut warnings = Vec::new();

        match self.store.get(STATE_KEY) {
            Ok(Some(bytes)) => {
                return match serde_json::from_slice::<LedgerState>(&bytes) {
                    Ok(state) => self.audited(state, LoadSource::Snapshot, warnings),
                    Err(err) => {
                        warn!(error = %err, "discarding malformed ledger snapshot");
                        warnings.push(format!("ledger snapshot is malformed: {err}"));
                        self.fresh(warnings)
                    }
                };
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "unable to read ledger snapshot");
                warnings.push(format!("ledger snapshot unreadable: {err}"));
                return self.fresh(warnings);
            }
        }

        match self.store.get(EXPENSES_KEY) {
            Ok(Some(bytes)) => match serde_json::from_slice::<Vec<Expense>>(&bytes) {
                Ok(expenses) => {
                    let state = LedgerState::from_expenses(expenses, self.opening_balance);
                    self.audited(state, LoadSource::LegacyExpenses, warnings)
                }
                Err(err) => {
                    warn!(error = %err, "discarding malformed expense list");
                    warnings.push(format!("expense list is malformed: {err}"));
                    self.fresh(warnings)
                }
            },
            Ok(None) => self.fresh(warnings),
            Err(err) => {
                warn!(error = %err, "unable to read expense list");
                warnings.push(format!("expense list unreadable: {err}"));
                self.fresh(warnings)
            }
        }
    }

    /// Writes the snapshot and the bare expense list.
    pub fn save(&self, state: &LedgerState) -> StorageResult<()> {
        let snapshot = serde_json::to_vec(state)?;
        let expenses = serde_json::to_vec(state.expenses())?;
        self.store.put(STATE_KEY, &snapshot)?;
        self.store.put(EXPENSES_KEY, &expenses)?;
        debug!(
            expenses = state.len(),
            balance = state.wallet_balance(),
            "ledger persisted"
        );
        Ok(())
    }

    fn fresh(&self, warnings: Vec<String>) -> LoadReport {
        LoadReport {
            state: LedgerState::with_balance(self.opening_balance),
            source: LoadSource::Default,
            warnings,
        }
    }

    fn audited(
        &self,
        mut state: LedgerState,
        source: LoadSource,
        mut warnings: Vec<String>,
    ) -> LoadReport {
        if let Some(stale) = state.reconcile_total() {
            warn!(
                stored = stale,
                recomputed = state.total_expenses(),
                "stored expense total disagreed with expenses"
            );
            warnings.push(format!(
                "stored total {} did not match expenses; recomputed as {}",
                stale,
                state.total_expenses()
            ));
        }
        warnings.extend(state_warnings(&state));
        LoadReport {
            state,
            source,
            warnings,
        }
    }
}

/// Detects anomalies in a restored ledger that the transition methods would have refused.
pub fn state_warnings(state: &LedgerState) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut warnings = Vec::new();
    for expense in state.expenses() {
        if !seen.insert(expense.id) {
            warnings.push(format!("expense id {} appears more than once", expense.id));
        }
        if !(expense.price.is_finite() && expense.price > 0.0) {
            warnings.push(format!(
                "expense {} has non-positive price {}",
                expense.id, expense.price
            ));
        }
    }
    if state.wallet_balance() < 0.0 {
        warnings.push(format!(
            "wallet balance is negative ({})",
            state.wallet_balance()
        ));
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ledger::{ExpenseDraft, ExpenseId},
        storage::MemoryStore,
    };
    use std::sync::Arc;

    fn persistence() -> (LedgerPersistence, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (LedgerPersistence::new(Box::new(Arc::clone(&store))), store)
    }

    fn sample_state() -> LedgerState {
        let mut state = LedgerState::new();
        state
            .record_expense(
                ExpenseDraft::new("Coffee", 5.0, "Food", "2024-01-01").into_expense(ExpenseId(1)),
            )
            .unwrap();
        state
    }

    #[test]
    fn empty_store_loads_default_ledger() {
        let (persistence, _) = persistence();
        let report = persistence.load();
        assert_eq!(report.source, LoadSource::Default);
        assert_eq!(report.state, LedgerState::new());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn save_writes_both_records() {
        let (persistence, store) = persistence();
        persistence.save(&sample_state()).unwrap();
        assert_eq!(
            store.keys(),
            vec![STATE_KEY.to_string(), EXPENSES_KEY.to_string()]
        );
        let raw = store.get(STATE_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(json["walletBalance"], 4995.0);
        assert_eq!(json["totalExpenses"], 5.0);
        assert_eq!(json["expenses"][0]["title"], "Coffee");
    }

    #[test]
    fn malformed_snapshot_falls_back_to_defaults() {
        let (persistence, store) = persistence();
        store.put(STATE_KEY, b"{not json").unwrap();
        store
            .put(EXPENSES_KEY, br#"[{"id":1,"title":"Tea","price":3,"category":"Food","date":"2024-01-01"}]"#)
            .unwrap();
        let report = persistence.load();
        assert_eq!(report.source, LoadSource::Default);
        assert_eq!(report.state, LedgerState::new());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn stale_total_is_recomputed_on_load() {
        let (persistence, store) = persistence();
        store
            .put(
                STATE_KEY,
                br#"{"walletBalance":90,"expenses":[{"id":1,"title":"Tea","price":10,"category":"Food","date":"2024-01-01"}],"totalExpenses":3}"#,
            )
            .unwrap();
        let report = persistence.load();
        assert_eq!(report.source, LoadSource::Snapshot);
        assert_eq!(report.state.total_expenses(), 10.0);
        assert_eq!(report.state.wallet_balance(), 90.0);
        assert!(report.warnings[0].contains("recomputed"));
    }

    #[test]
    fn duplicate_ids_are_reported() {
        let (persistence, store) = persistence();
        store
            .put(
                EXPENSES_KEY,
                br#"[{"id":4,"title":"A","price":1,"category":"Food","date":"d"},{"id":4,"title":"B","price":2,"category":"Food","date":"d"}]"#,
            )
            .unwrap();
        let report = persistence.load();
        assert_eq!(report.source, LoadSource::LegacyExpenses);
        assert!(report
            .warnings
            .iter()
            .any(|warning| warning.contains("more than once")));
    }

    #[test]
    fn custom_opening_balance_applies_to_fresh_and_legacy_loads() {
        let store = Arc::new(MemoryStore::new());
        let persistence =
            LedgerPersistence::with_opening_balance(Box::new(Arc::clone(&store)), 100.0);
        assert_eq!(persistence.load().state.wallet_balance(), 100.0);

        store
            .put(EXPENSES_KEY, br#"[{"id":1,"title":"A","price":40,"category":"Travel","date":"d"}]"#)
            .unwrap();
        assert_eq!(persistence.load().state.wallet_balance(), 60.0);
    }
}
