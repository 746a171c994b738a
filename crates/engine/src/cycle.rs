//! Salary cycle position, derived per employee and never stored.
//!
//! The cycle baseline is the last payment date, or the employee's start date
//! when nothing has been paid yet. The payment day itself counts as day zero,
//! so a 30-day cycle started on Jan 1 becomes due on Jan 31.

use chrono::{Duration, NaiveDate};

/// Where an employee stands inside their salary cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SalaryCycle {
    /// Day zero of the running cycle.
    pub baseline: NaiveDate,
    /// First day whose withdrawals count against the running cycle.
    pub period_start: NaiveDate,
    pub cycle_days: i32,
}

impl SalaryCycle {
    /// Derives the cycle from the employee's start date and last payment.
    ///
    /// A withdrawal dated on the payment day was settled by that payment, so
    /// after a payment the period starts the day after the baseline. Before
    /// the first payment it starts on the start date itself.
    #[must_use]
    pub fn new(start_date: NaiveDate, last_paid_date: Option<NaiveDate>, cycle_days: i32) -> Self {
        let baseline = last_paid_date.unwrap_or(start_date);
        let period_start = match last_paid_date {
            Some(paid) => paid + Duration::days(1),
            None => start_date,
        };
        Self {
            baseline,
            period_start,
            cycle_days,
        }
    }

    /// Whole days elapsed since the baseline. Negative before the baseline.
    #[must_use]
    pub fn elapsed_days(&self, on: NaiveDate) -> i64 {
        (on - self.baseline).num_days()
    }

    /// `true` once a full cycle has elapsed.
    #[must_use]
    pub fn is_due(&self, on: NaiveDate) -> bool {
        self.elapsed_days(on) >= i64::from(self.cycle_days)
    }

    /// Days until the cycle completes, floored at zero once overdue.
    #[must_use]
    pub fn days_remaining(&self, on: NaiveDate) -> i64 {
        (i64::from(self.cycle_days) - self.elapsed_days(on)).max(0)
    }

    /// The first day the running cycle counts as payable.
    #[must_use]
    pub fn next_due_date(&self) -> NaiveDate {
        self.baseline + Duration::days(i64::from(self.cycle_days))
    }
}
