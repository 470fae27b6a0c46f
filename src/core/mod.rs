//! Ledger orchestration: the state manager and the collaborators it is wired to.

pub mod clock;
pub mod ids;
pub mod ledger_manager;
pub mod notifications;
pub mod services;

pub use clock::{Clock, SystemClock};
pub use ledger_manager::{LedgerManager, ManagerOptions, SharedLedger};
pub use notifications::{Notification, NotificationSink, RecordingSink, Severity, TracingSink};
