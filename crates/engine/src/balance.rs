//! Derived balance figures. Computed on demand, never persisted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine, SalaryCycle};

/// Which period the available balance was computed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceSource {
    /// Cycle still running: balance accrues day by day.
    CurrentEarningPeriod,
    /// Cycle complete but unpaid: the full salary is on the table.
    UnpaidSalaryPeriod,
}

impl BalanceSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CurrentEarningPeriod => "current_earning_period",
            Self::UnpaidSalaryPeriod => "unpaid_salary_period",
        }
    }
}

/// What an employee could take out right now, and how it was derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmployeeBalance {
    /// Converted (IQD) salary per cycle.
    pub base_salary: Decimal,
    pub cycle_days: i32,
    /// `base_salary / cycle_days`.
    pub daily_rate: Decimal,
    /// Never negative.
    pub available_balance: Decimal,
    pub balance_source: BalanceSource,
}

/// Due-state summary for a scheduled payment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaymentDue {
    pub is_due: bool,
    pub elapsed_days: i64,
    pub days_remaining: i64,
    pub next_due_date: NaiveDate,
    /// Converted salary plus the net of stored adjustments.
    pub net_salary: Decimal,
    /// Withdrawals recorded in the running period.
    pub withdrawn: Decimal,
    /// `net_salary - withdrawn`; what a payment form should pre-fill.
    pub suggested_amount: Decimal,
}

/// Computes the withdrawal headroom for one employee on one day.
///
/// Before the cycle completes the employee has earned `daily_rate *
/// elapsed_days`; once due, the whole converted salary. Withdrawals already
/// taken in the period are subtracted and the result is floored at zero, so
/// over-withdrawing shows an exhausted balance rather than a debt.
///
/// Fails with `InvalidAmount` when the accrued value does not fit a
/// `Decimal`.
pub fn available_balance(
    converted_salary: Decimal,
    cycle: &SalaryCycle,
    on: NaiveDate,
    withdrawn: Decimal,
) -> ResultEngine<EmployeeBalance> {
    let daily_rate = converted_salary / Decimal::from(cycle.cycle_days);
    let (earned, source) = if cycle.is_due(on) {
        (converted_salary, BalanceSource::UnpaidSalaryPeriod)
    } else {
        let accrued = daily_rate
            .checked_mul(Decimal::from(cycle.elapsed_days(on)))
            .ok_or_else(|| EngineError::InvalidAmount("accrued amount too large".to_string()))?;
        (accrued, BalanceSource::CurrentEarningPeriod)
    };

    Ok(EmployeeBalance {
        base_salary: converted_salary,
        cycle_days: cycle.cycle_days,
        daily_rate,
        available_balance: earned
            .checked_sub(withdrawn)
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO),
        balance_source: source,
    })
}
