use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether a session has been paid for. Serialized with the document's
/// historical labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    #[serde(rename = "Not Paid")]
    NotPaid,
}

impl PaymentStatus {
    pub fn label(self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::NotPaid => "Not Paid",
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "paid" => Ok(PaymentStatus::Paid),
            "not-paid" | "not paid" | "notpaid" | "unpaid" => Ok(PaymentStatus::NotPaid),
            other => Err(format!("unknown payment status `{}`", other)),
        }
    }
}

/// One billable occurrence within a week.
///
/// `paid_amount` and `outstanding_amount` are a mutually exclusive pair:
/// whichever side `payment_status` selects carries the week's per-session
/// price and the other is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "session_date")]
    pub date: NaiveDate,
    pub session_number: u32,
    pub payment_status: PaymentStatus,
    #[serde(rename = "session_paid_amount")]
    pub paid_amount: f64,
    #[serde(rename = "session_outstanding_amount")]
    pub outstanding_amount: f64,
    #[serde(default)]
    pub notes: String,
}

impl Session {
    pub fn new(
        date: NaiveDate,
        session_number: u32,
        payment_status: PaymentStatus,
        notes: impl Into<String>,
        amount_per_session: f64,
    ) -> Self {
        let mut session = Self {
            date,
            session_number,
            payment_status,
            paid_amount: 0.0,
            outstanding_amount: 0.0,
            notes: notes.into(),
        };
        session.apply_amounts(amount_per_session);
        session
    }

    /// Flips the payment status and swaps the amount pair accordingly.
    pub fn set_payment_status(&mut self, status: PaymentStatus, amount_per_session: f64) {
        self.payment_status = status;
        self.apply_amounts(amount_per_session);
    }

    fn apply_amounts(&mut self, amount_per_session: f64) {
        match self.payment_status {
            PaymentStatus::Paid => {
                self.paid_amount = amount_per_session;
                self.outstanding_amount = 0.0;
            }
            PaymentStatus::NotPaid => {
                self.paid_amount = 0.0;
                self.outstanding_amount = amount_per_session;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    #[test]
    fn amounts_follow_payment_status() {
        let session = Session::new(date(), 1, PaymentStatus::Paid, "", 120.0);
        assert_eq!(session.paid_amount, 120.0);
        assert_eq!(session.outstanding_amount, 0.0);

        let session = Session::new(date(), 2, PaymentStatus::NotPaid, "", 120.0);
        assert_eq!(session.paid_amount, 0.0);
        assert_eq!(session.outstanding_amount, 120.0);
    }

    #[test]
    fn toggling_status_swaps_amounts() {
        let mut session = Session::new(date(), 1, PaymentStatus::NotPaid, "makeup", 120.0);
        session.set_payment_status(PaymentStatus::Paid, 120.0);
        assert_eq!(session.payment_status, PaymentStatus::Paid);
        assert_eq!(session.paid_amount, 120.0);
        assert_eq!(session.outstanding_amount, 0.0);
    }

    #[test]
    fn payment_status_uses_document_labels() {
        let json = serde_json::to_string(&PaymentStatus::NotPaid).unwrap();
        assert_eq!(json, "\"Not Paid\"");
        let parsed: PaymentStatus = serde_json::from_str("\"Paid\"").unwrap();
        assert_eq!(parsed, PaymentStatus::Paid);
    }
}
