use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

use super::week::{Week, WeekDefaults};

/// Root container for the persisted ledger: every week in insertion order,
/// which is chronological by construction and never re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub weeks: Vec<Week>,
    /// Monotonic count of weeks ever created. Week names derive from this
    /// counter rather than the current collection size, so numbering stays
    /// collision-free even if weeks are ever removed out of band. Legacy
    /// documents without the field fall back to the week count.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub weeks_created: u32,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

/// Aggregate totals across the whole ledger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerSummary {
    pub total_sessions: usize,
    pub total_paid: f64,
    pub total_outstanding: f64,
}

impl Document {
    /// Creates the next week, named `"week"` + ordinal, and appends it.
    pub fn add_week(&mut self, start_date: NaiveDate, defaults: &WeekDefaults) -> &Week {
        let ordinal = self.next_ordinal();
        let week = Week::new(format!("week{}", ordinal), start_date, defaults);
        self.weeks_created = ordinal;
        self.weeks.push(week);
        self.weeks.last().expect("week was just pushed")
    }

    fn next_ordinal(&self) -> u32 {
        self.weeks_created.max(self.weeks.len() as u32) + 1
    }

    pub fn week(&self, name: &str) -> Option<&Week> {
        self.weeks.iter().find(|week| week.name == name)
    }

    pub fn week_mut(&mut self, name: &str) -> Result<&mut Week, LedgerError> {
        self.weeks
            .iter_mut()
            .find(|week| week.name == name)
            .ok_or_else(|| LedgerError::WeekNotFound(name.to_string()))
    }

    /// The week with the latest start date; the first match wins on ties.
    pub fn current_week(&self) -> Result<&Week, LedgerError> {
        let mut latest: Option<&Week> = None;
        for week in &self.weeks {
            match latest {
                Some(best) if week.start_date <= best.start_date => {}
                _ => latest = Some(week),
            }
        }
        latest.ok_or(LedgerError::EmptyLedger)
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            total_sessions: self.weeks.iter().map(|week| week.sessions.len()).sum(),
            total_paid: self.weeks.iter().map(|week| week.total_paid_amount).sum(),
            total_outstanding: self
                .weeks
                .iter()
                .map(|week| week.total_outstanding_amount)
                .sum(),
        }
    }

    /// Weeks still owing money, in document order.
    pub fn outstanding_weeks(&self) -> Vec<&Week> {
        self.weeks
            .iter()
            .filter(|week| week.total_outstanding_amount > 0.0)
            .collect()
    }

    /// Re-derives every week's status against `today` without touching the
    /// session lists. Used to refresh the time-dependent field on read.
    pub fn refresh_statuses(&mut self, today: NaiveDate) {
        for week in &mut self.weeks {
            week.recompute(today);
        }
    }
}
