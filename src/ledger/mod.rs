//! Ledger domain models: weeks, sessions, and the persisted document.

pub mod document;
pub mod session;
pub mod week;

pub use document::{Document, LedgerSummary};
pub use session::{PaymentStatus, Session};
pub use week::{Week, WeekDefaults, WeekStatus};
