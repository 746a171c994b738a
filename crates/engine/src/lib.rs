//! Payroll engine: salary cycles, dated dollar-rate conversion, and the
//! ledgers (payments, withdrawals, adjustments) every derived figure is
//! computed from.

pub use adjustments::{Adjustment, AdjustmentKind, net_adjustment};
pub use balance::{BalanceSource, EmployeeBalance, PaymentDue, available_balance};
pub use commands::{
    AdjustmentCmd, CreateEmployeeCmd, PaymentCmd, UpdateAdjustmentCmd, UpdateEmployeeCmd,
    WithdrawalCmd,
};
pub use currency::Currency;
pub use cycle::SalaryCycle;
pub use employees::Employee;
pub use error::EngineError;
pub use money::{ConvertedAmount, MonetaryAmount};
pub use ops::{Engine, EngineBuilder};
pub use payments::SalaryPayment;
pub use rates::{DollarRate, RateTable};
pub use withdrawals::SalaryWithdrawal;

mod adjustments;
mod balance;
mod commands;
mod currency;
mod cycle;
mod employees;
mod error;
mod money;
mod ops;
mod payments;
mod rates;
mod util;
mod withdrawals;

type ResultEngine<T> = Result<T, EngineError>;
