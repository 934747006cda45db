use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::session::{PaymentStatus, Session};

/// Number of calendar days a billing week spans past its start date.
pub const WEEK_SPAN_DAYS: u64 = 5;

/// Days that must elapse after the start date before a fully paid week
/// counts as closed.
const CLOSE_AFTER_DAYS: i64 = 6;

/// Whether a week's payment target has been met and enough time has passed.
/// Serialized with the document's historical labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeekStatus {
    Closed,
    #[serde(rename = "Not Closed")]
    Open,
}

impl WeekStatus {
    pub fn label(self) -> &'static str {
        match self {
            WeekStatus::Closed => "Closed",
            WeekStatus::Open => "Not Closed",
        }
    }
}

/// Fixed per-week billing parameters applied when a week is created.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeekDefaults {
    pub amount_per_week: f64,
    pub amount_per_session: f64,
    pub sessions_per_week: u32,
}

impl Default for WeekDefaults {
    fn default() -> Self {
        Self {
            amount_per_week: 600.0,
            amount_per_session: 120.0,
            sessions_per_week: 5,
        }
    }
}

/// A fixed billing period with a payment target and zero or more sessions.
///
/// The totals and `status` are derived values. They are refreshed through
/// [`Week::recompute`] after every mutation; `total_paid_amount` is always a
/// full fold over `sessions` rather than an incremental adjustment, so no
/// mutation path can let the aggregate drift from the session list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Week {
    #[serde(rename = "week_name")]
    pub name: String,
    #[serde(rename = "week_start_date")]
    pub start_date: NaiveDate,
    #[serde(rename = "week_end_date")]
    pub end_date: NaiveDate,
    pub amount_per_week: f64,
    pub amount_per_session: f64,
    #[serde(rename = "normal_number_of_sessions_per_week")]
    pub sessions_per_week: u32,
    #[serde(default)]
    pub sessions: Vec<Session>,
    pub total_paid_amount: f64,
    pub total_outstanding_amount: f64,
    pub status: WeekStatus,
}

impl Week {
    pub fn new(name: impl Into<String>, start_date: NaiveDate, defaults: &WeekDefaults) -> Self {
        Self {
            name: name.into(),
            start_date,
            end_date: start_date
                .checked_add_days(Days::new(WEEK_SPAN_DAYS))
                .unwrap_or(start_date),
            amount_per_week: defaults.amount_per_week,
            amount_per_session: defaults.amount_per_session,
            sessions_per_week: defaults.sessions_per_week,
            sessions: Vec::new(),
            total_paid_amount: 0.0,
            total_outstanding_amount: defaults.amount_per_week,
            status: WeekStatus::Open,
        }
    }

    /// Appends a session and refreshes the derived fields.
    pub fn push_session(&mut self, session: Session, today: NaiveDate) -> &Session {
        self.sessions.push(session);
        self.recompute(today);
        self.sessions.last().expect("session was just pushed")
    }

    /// Finds the first session carrying `session_number`. Duplicate numbers
    /// are permitted, so the first match wins.
    pub fn session_mut(&mut self, session_number: u32) -> Option<&mut Session> {
        self.sessions
            .iter_mut()
            .find(|session| session.session_number == session_number)
    }

    /// Rebuilds the paid total from the session list and re-derives the
    /// outstanding amount and status against `today`.
    pub fn recompute(&mut self, today: NaiveDate) {
        self.total_paid_amount = self
            .sessions
            .iter()
            .map(|session| session.paid_amount)
            .sum();
        self.total_outstanding_amount = self.amount_per_week - self.total_paid_amount;
        self.status = self.status_for(today);
    }

    /// Derived status: closed once the payment target is met and more than
    /// six days have elapsed since the start date. Not sticky; a week that
    /// regresses below target reopens on the next evaluation.
    pub fn status_for(&self, today: NaiveDate) -> WeekStatus {
        let elapsed = (today - self.start_date).num_days();
        if self.total_paid_amount >= self.amount_per_week && elapsed > CLOSE_AFTER_DAYS {
            WeekStatus::Closed
        } else {
            WeekStatus::Open
        }
    }

    pub fn paid_sessions(&self) -> usize {
        self.sessions
            .iter()
            .filter(|session| session.payment_status == PaymentStatus::Paid)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn week() -> Week {
        Week::new("week1", day(1), &WeekDefaults::default())
    }

    #[test]
    fn new_week_spans_five_days_and_owes_full_target() {
        let week = week();
        assert_eq!(week.end_date, day(6));
        assert_eq!(week.total_paid_amount, 0.0);
        assert_eq!(week.total_outstanding_amount, 600.0);
        assert_eq!(week.status, WeekStatus::Open);
    }

    #[test]
    fn totals_are_a_fold_over_sessions() {
        let mut week = week();
        for number in 1..=3 {
            week.push_session(
                Session::new(day(number), number, PaymentStatus::Paid, "", 120.0),
                day(3),
            );
        }
        week.push_session(
            Session::new(day(4), 4, PaymentStatus::NotPaid, "", 120.0),
            day(4),
        );
        assert_eq!(week.total_paid_amount, 360.0);
        assert_eq!(week.total_outstanding_amount, 240.0);
    }

    #[test]
    fn closes_only_when_paid_and_seven_days_elapsed() {
        let mut week = week();
        for number in 1..=5 {
            week.push_session(
                Session::new(day(number), number, PaymentStatus::Paid, "", 120.0),
                day(5),
            );
        }
        assert_eq!(week.total_paid_amount, 600.0);
        // Target met but only four days in.
        assert_eq!(week.status_for(day(5)), WeekStatus::Open);
        // Exactly six days elapsed is still open.
        assert_eq!(week.status_for(day(7)), WeekStatus::Open);
        assert_eq!(week.status_for(day(8)), WeekStatus::Closed);
    }

    #[test]
    fn status_reopens_if_paid_total_regresses() {
        let mut week = week();
        for number in 1..=5 {
            week.push_session(
                Session::new(day(number), number, PaymentStatus::Paid, "", 120.0),
                day(10),
            );
        }
        assert_eq!(week.status, WeekStatus::Closed);

        week.session_mut(3)
            .unwrap()
            .set_payment_status(PaymentStatus::NotPaid, 120.0);
        week.recompute(day(10));
        assert_eq!(week.status, WeekStatus::Open);
        assert_eq!(week.total_paid_amount, 480.0);
    }

    #[test]
    fn overpayment_drives_outstanding_negative() {
        let mut week = week();
        for number in 1..=6 {
            week.push_session(
                Session::new(day(number), number, PaymentStatus::Paid, "", 120.0),
                day(6),
            );
        }
        assert_eq!(week.total_outstanding_amount, -120.0);
    }

    #[test]
    fn duplicate_session_numbers_resolve_to_first_match() {
        let mut week = week();
        week.push_session(
            Session::new(day(1), 7, PaymentStatus::NotPaid, "first", 120.0),
            day(1),
        );
        week.push_session(
            Session::new(day(2), 7, PaymentStatus::Paid, "second", 120.0),
            day(2),
        );
        assert_eq!(week.session_mut(7).unwrap().notes, "first");
    }
}
