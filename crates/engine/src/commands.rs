//! Command structs for engine operations.
//!
//! These types group parameters for write operations (employee setup,
//! adjustments, withdrawals, payments), keeping call sites readable and
//! avoiding long argument lists.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{AdjustmentKind, Currency};

/// Create an employee.
#[derive(Clone, Debug)]
pub struct CreateEmployeeCmd {
    pub name: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub cycle_days: i32,
    pub start_date: NaiveDate,
    /// Date whose rate converts a USD salary. Defaults to `start_date`.
    pub rate_date: Option<NaiveDate>,
}

impl CreateEmployeeCmd {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        amount: Decimal,
        currency: Currency,
        cycle_days: i32,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            currency,
            cycle_days,
            start_date,
            rate_date: None,
        }
    }

    #[must_use]
    pub fn rate_date(mut self, rate_date: NaiveDate) -> Self {
        self.rate_date = Some(rate_date);
        self
    }
}

/// Update an employee. Unset fields keep their stored value.
#[derive(Clone, Debug)]
pub struct UpdateEmployeeCmd {
    pub employee_id: Uuid,

    pub name: Option<String>,
    pub amount: Option<Decimal>,
    pub currency: Option<Currency>,
    pub cycle_days: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
    /// Date whose rate re-converts the salary when amount or currency change.
    /// Defaults to the employee's (possibly updated) start date.
    pub rate_date: Option<NaiveDate>,
}

impl UpdateEmployeeCmd {
    #[must_use]
    pub fn new(employee_id: Uuid) -> Self {
        Self {
            employee_id,
            name: None,
            amount: None,
            currency: None,
            cycle_days: None,
            start_date: None,
            is_active: None,
            rate_date: None,
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    #[must_use]
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    #[must_use]
    pub fn cycle_days(mut self, cycle_days: i32) -> Self {
        self.cycle_days = Some(cycle_days);
        self
    }

    #[must_use]
    pub fn start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    #[must_use]
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    #[must_use]
    pub fn rate_date(mut self, rate_date: NaiveDate) -> Self {
        self.rate_date = Some(rate_date);
        self
    }
}

/// Record a bonus or penalty.
#[derive(Clone, Debug)]
pub struct AdjustmentCmd {
    pub employee_id: Uuid,
    pub kind: AdjustmentKind,
    pub amount: Decimal,
    pub currency: Currency,
    /// Entry date; its rate fixes the converted value.
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl AdjustmentCmd {
    #[must_use]
    pub fn new(
        employee_id: Uuid,
        kind: AdjustmentKind,
        amount: Decimal,
        currency: Currency,
        date: NaiveDate,
    ) -> Self {
        Self {
            employee_id,
            kind,
            amount,
            currency,
            date,
            description: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Edit an adjustment. Unset fields keep their stored value; the converted
/// value is always re-fixed from the resulting amount, currency and date.
#[derive(Clone, Debug)]
pub struct UpdateAdjustmentCmd {
    pub adjustment_id: Uuid,

    pub kind: Option<AdjustmentKind>,
    pub amount: Option<Decimal>,
    pub currency: Option<Currency>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl UpdateAdjustmentCmd {
    #[must_use]
    pub fn new(adjustment_id: Uuid) -> Self {
        Self {
            adjustment_id,
            kind: None,
            amount: None,
            currency: None,
            date: None,
            description: None,
        }
    }

    #[must_use]
    pub fn kind(mut self, kind: AdjustmentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    #[must_use]
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    #[must_use]
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Record a cash withdrawal against the running cycle.
#[derive(Clone, Debug)]
pub struct WithdrawalCmd {
    pub employee_id: Uuid,
    pub amount: Decimal,
    pub currency: Currency,
    pub withdrawal_date: NaiveDate,
    pub notes: Option<String>,
}

impl WithdrawalCmd {
    #[must_use]
    pub fn new(
        employee_id: Uuid,
        amount: Decimal,
        currency: Currency,
        withdrawal_date: NaiveDate,
    ) -> Self {
        Self {
            employee_id,
            amount,
            currency,
            withdrawal_date,
            notes: None,
        }
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Record a salary payment (always IQD).
#[derive(Clone, Debug)]
pub struct PaymentCmd {
    pub employee_id: Uuid,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub notes: Option<String>,
}

impl PaymentCmd {
    #[must_use]
    pub fn new(employee_id: Uuid, amount: Decimal, payment_date: NaiveDate) -> Self {
        Self {
            employee_id,
            amount,
            payment_date,
            notes: None,
        }
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
