use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Iqd,
    Usd,
}

pub mod employee {
    use super::*;

    /// Request body for registering an employee.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct EmployeeNew {
        pub name: String,
        /// Salary per cycle, in `currency`.
        pub salary: Decimal,
        pub currency: Option<Currency>,
        pub cycle_days: i32,
        /// First day of employment. Defaults to today.
        pub start_date: Option<NaiveDate>,
        /// Rate row used to convert a USD salary. Defaults to `start_date`.
        pub rate_date: Option<NaiveDate>,
    }

    /// Request body for a partial employee update.
    ///
    /// Changing `salary` or `currency` re-converts the stored IQD salary at
    /// `rate_date` (today when omitted).
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct EmployeeUpdate {
        pub name: Option<String>,
        pub salary: Option<Decimal>,
        pub currency: Option<Currency>,
        pub cycle_days: Option<i32>,
        pub start_date: Option<NaiveDate>,
        pub is_active: Option<bool>,
        pub rate_date: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct EmployeeView {
        pub id: Uuid,
        pub name: String,
        pub salary: Decimal,
        pub currency: Currency,
        /// Salary in IQD, the settlement currency.
        pub converted_salary: Decimal,
        pub cycle_days: i32,
        pub start_date: NaiveDate,
        pub is_active: bool,
        pub last_paid_date: Option<NaiveDate>,
        pub is_paid: bool,
        pub paid_amount: Option<Decimal>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct EmployeeListResponse {
        pub employees: Vec<EmployeeView>,
    }
}

pub mod payroll {
    use super::*;

    /// `?on=` query for balance and due lookups. Defaults to today.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct AsOfQuery {
        pub on: Option<NaiveDate>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum BalanceSource {
        CurrentEarningPeriod,
        UnpaidSalaryPeriod,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BalanceResponse {
        pub base_salary: Decimal,
        pub salary_days: i32,
        pub daily_rate: Decimal,
        pub available_balance: Decimal,
        pub balance_source: BalanceSource,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DueResponse {
        pub is_due: bool,
        pub elapsed_days: i64,
        pub days_remaining: i64,
        pub next_due_date: NaiveDate,
        /// Converted salary plus the employee's net adjustment.
        pub net_salary: Decimal,
        /// Withdrawals recorded since the current period started.
        pub withdrawn: Decimal,
        pub suggested_amount: Decimal,
    }

    /// Request body for settling a salary.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PaymentNew {
        /// Settled amount in IQD. Defaults to the currently suggested amount.
        pub amount: Option<Decimal>,
        pub payment_date: Option<NaiveDate>,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PaymentView {
        pub id: Uuid,
        pub employee_id: Uuid,
        pub amount: Decimal,
        pub payment_date: NaiveDate,
        pub notes: Option<String>,
    }

    /// Response for a settled salary: the ledger row plus the employee
    /// summary it updated.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PaymentRecorded {
        pub payment: PaymentView,
        pub employee: super::employee::EmployeeView,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PaymentListResponse {
        pub payments: Vec<PaymentView>,
    }
}

pub mod withdrawal {
    use super::*;

    /// Request body for a mid-cycle advance.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct WithdrawalNew {
        pub amount: Decimal,
        pub currency: Option<Currency>,
        pub withdrawal_date: Option<NaiveDate>,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct WithdrawalView {
        pub id: Uuid,
        pub employee_id: Uuid,
        pub amount: Decimal,
        pub currency: Currency,
        pub converted_amount: Decimal,
        /// USD→IQD rate applied at recording time; absent for IQD.
        pub exchange_rate: Option<Decimal>,
        pub rate_date: Option<NaiveDate>,
        pub withdrawal_date: NaiveDate,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct WithdrawalListResponse {
        pub withdrawals: Vec<WithdrawalView>,
    }
}

pub mod adjustment {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum AdjustmentKind {
        Bonus,
        Penalty,
    }

    impl AdjustmentKind {
        /// Returns the canonical kind string used by the engine/database.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Bonus => "bonus",
                Self::Penalty => "penalty",
            }
        }
    }

    /// Request body for adding a bonus or penalty.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AdjustmentNew {
        pub kind: AdjustmentKind,
        pub amount: Decimal,
        pub currency: Option<Currency>,
        pub date: Option<NaiveDate>,
        pub description: Option<String>,
    }

    /// Request body for a partial adjustment update.
    ///
    /// Any change re-converts the stored IQD value at the resulting date.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AdjustmentUpdate {
        pub kind: Option<AdjustmentKind>,
        pub amount: Option<Decimal>,
        pub currency: Option<Currency>,
        pub date: Option<NaiveDate>,
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AdjustmentView {
        pub id: Uuid,
        pub employee_id: Uuid,
        pub kind: AdjustmentKind,
        pub amount: Decimal,
        pub currency: Currency,
        pub converted_amount: Decimal,
        pub exchange_rate: Option<Decimal>,
        pub rate_date: Option<NaiveDate>,
        pub date: NaiveDate,
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AdjustmentListResponse {
        pub adjustments: Vec<AdjustmentView>,
        /// Bonuses minus penalties over the whole ledger, in IQD.
        pub net_adjustment: Decimal,
    }
}

pub mod rate {
    use super::*;

    /// Request body for recording a day's exchange rate.
    ///
    /// One row per calendar day; posting an existing date overwrites it.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RateUpsert {
        /// Defaults to today.
        pub date: Option<NaiveDate>,
        /// IQD per one USD.
        pub rate: Decimal,
        pub entered_by: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RateView {
        pub date: NaiveDate,
        pub rate: Decimal,
        pub entered_by: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RateListResponse {
        pub rates: Vec<RateView>,
    }
}
