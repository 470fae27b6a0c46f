use super::clock::Clock;
use crate::ledger::ExpenseId;

/// Issues expense ids from the clock's millisecond timestamp.
///
/// Every id is strictly greater than the previous one and than the floor set with
/// [`IdGenerator::observe`], so two expenses created within the same millisecond still get
/// distinct ids.
pub struct IdGenerator {
    clock: Box<dyn Clock>,
    last: u64,
}

impl IdGenerator {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self { clock, last: 0 }
    }

    /// Raises the floor to `id`, typically the highest id found in a restored ledger.
    pub fn observe(&mut self, id: ExpenseId) {
        self.last = self.last.max(id.0);
    }

    pub fn next_id(&mut self) -> ExpenseId {
        let candidate = self.clock.now_millis().max(self.last.saturating_add(1));
        self.last = candidate;
        ExpenseId(candidate)
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}
