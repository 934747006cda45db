use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use tracing::info;

use crate::{
    clock::{Clock, SystemClock},
    errors::LedgerError,
    ledger::{Document, LedgerSummary, PaymentStatus, Session, Week, WeekDefaults},
    storage::{JsonStorage, StorageBackend},
};

/// Owns access to the persisted ledger document.
///
/// Every operation is a whole-document load-mutate-save: the current file is
/// read, changed in memory, and atomically rewritten. A process-local mutex
/// serializes the sequence so two threads cannot interleave their
/// read-modify-write cycles and lose an update. Because mutations only touch
/// an in-memory copy until the save succeeds, a failed save leaves the
/// persisted document exactly as it was.
pub struct LedgerStore {
    storage: Box<dyn StorageBackend>,
    defaults: WeekDefaults,
    clock: Box<dyn Clock>,
    write_gate: Mutex<()>,
}

impl LedgerStore {
    pub fn new(storage: Box<dyn StorageBackend>, defaults: WeekDefaults) -> Self {
        Self::with_clock(storage, defaults, Box::new(SystemClock))
    }

    /// Store evaluating the time-dependent status rule against `clock`.
    pub fn with_clock(
        storage: Box<dyn StorageBackend>,
        defaults: WeekDefaults,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            storage,
            defaults,
            clock,
            write_gate: Mutex::new(()),
        }
    }

    /// Store backed by the default JSON file location.
    pub fn open_default() -> Result<Self, LedgerError> {
        Ok(Self::new(
            Box::new(JsonStorage::new_default()?),
            WeekDefaults::default(),
        ))
    }

    pub fn defaults(&self) -> &WeekDefaults {
        &self.defaults
    }

    fn gate(&self) -> MutexGuard<'_, ()> {
        self.write_gate
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates the next sequentially named week and persists the document.
    pub fn add_week(&self, start_date: NaiveDate) -> Result<Week, LedgerError> {
        let _guard = self.gate();
        let mut document = self.storage.load()?;
        let week = document.add_week(start_date, &self.defaults).clone();
        self.storage.save(&document)?;
        info!(week = %week.name, start = %week.start_date, "week added");
        Ok(week)
    }

    /// Appends a session to the named week, refreshes the week's derived
    /// fields, and persists the document.
    pub fn add_session(
        &self,
        week_name: &str,
        date: NaiveDate,
        session_number: u32,
        payment_status: PaymentStatus,
        notes: &str,
    ) -> Result<Session, LedgerError> {
        let _guard = self.gate();
        let today = self.clock.today();
        let mut document = self.storage.load()?;
        let week = document.week_mut(week_name)?;
        let session = Session::new(
            date,
            session_number,
            payment_status,
            notes,
            week.amount_per_session,
        );
        let session = week.push_session(session, today).clone();
        self.storage.save(&document)?;
        info!(
            week = week_name,
            number = session_number,
            status = session.payment_status.label(),
            "session added"
        );
        Ok(session)
    }

    /// Flips a session's payment status, swapping its amount pair and
    /// refreshing the week's totals and status. Duplicate session numbers
    /// resolve to the first match. Setting the status a session already has
    /// changes nothing but still persists the document.
    pub fn set_session_payment_status(
        &self,
        week_name: &str,
        session_number: u32,
        new_status: PaymentStatus,
    ) -> Result<Session, LedgerError> {
        let _guard = self.gate();
        let today = self.clock.today();
        let mut document = self.storage.load()?;
        let week = document.week_mut(week_name)?;
        let amount_per_session = week.amount_per_session;
        let session = week
            .session_mut(session_number)
            .ok_or_else(|| LedgerError::SessionNotFound {
                week: week_name.to_string(),
                number: session_number,
            })?;
        if session.payment_status != new_status {
            session.set_payment_status(new_status, amount_per_session);
        }
        let session = session.clone();
        week.recompute(today);
        self.storage.save(&document)?;
        info!(
            week = week_name,
            number = session_number,
            status = new_status.label(),
            "payment status set"
        );
        Ok(session)
    }

    /// The week with the latest start date, status freshly derived.
    pub fn get_current_week(&self) -> Result<Week, LedgerError> {
        let mut document = self.storage.load()?;
        document.refresh_statuses(self.clock.today());
        document.current_week().cloned()
    }

    /// Aggregate totals across every week.
    pub fn summary(&self) -> Result<LedgerSummary, LedgerError> {
        Ok(self.storage.load()?.summary())
    }

    /// Weeks still owing money, in document order.
    pub fn outstanding_weeks(&self) -> Result<Vec<Week>, LedgerError> {
        let document = self.storage.load()?;
        Ok(document
            .outstanding_weeks()
            .into_iter()
            .cloned()
            .collect())
    }

    /// Every week in document order, statuses freshly derived. Read surface
    /// for listing and rendering.
    pub fn weeks(&self) -> Result<Vec<Week>, LedgerError> {
        let mut document = self.storage.load()?;
        document.refresh_statuses(self.clock.today());
        Ok(document.weeks)
    }
}
