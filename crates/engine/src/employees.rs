//! Employee records.
//!
//! An employee carries the salary configuration (amount, currency, cycle
//! length, start date) plus a denormalized summary of the last payment. The
//! ledgers hang off this row; everything derived (balance, due state) is
//! computed from them on demand.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Currency, EngineError, MonetaryAmount, ResultEngine, SalaryCycle};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    /// Salary as configured, in the currency it was entered in.
    pub salary: MonetaryAmount,
    /// Salary per cycle in IQD, fixed when the salary was last set.
    pub converted_salary: Decimal,
    pub cycle_days: i32,
    pub start_date: NaiveDate,
    pub is_active: bool,
    /// Last-payment summary. Kept for display; the payments ledger is the
    /// record of truth.
    pub last_paid_date: Option<NaiveDate>,
    pub is_paid: bool,
    pub paid_amount: Option<Decimal>,
}

impl Employee {
    pub fn new(
        name: String,
        salary: MonetaryAmount,
        converted_salary: Decimal,
        cycle_days: i32,
        start_date: NaiveDate,
    ) -> ResultEngine<Self> {
        if !salary.is_positive() {
            return Err(EngineError::InvalidAmount(
                "salary must be > 0".to_string(),
            ));
        }
        if cycle_days <= 0 {
            return Err(EngineError::CycleMisconfigured(format!(
                "cycle_days must be > 0, got {cycle_days}"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            salary,
            converted_salary,
            cycle_days,
            start_date,
            is_active: true,
            last_paid_date: None,
            is_paid: false,
            paid_amount: None,
        })
    }

    /// Cycle position derived from the start date and the last payment.
    #[must_use]
    pub fn cycle(&self) -> SalaryCycle {
        SalaryCycle::new(self.start_date, self.last_paid_date, self.cycle_days)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub salary_amount: Decimal,
    pub salary_currency: String,
    pub converted_salary: Decimal,
    pub cycle_days: i32,
    pub start_date: Date,
    pub is_active: bool,
    pub last_paid_date: Option<Date>,
    pub is_paid: bool,
    pub paid_amount: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::adjustments::Entity")]
    Adjustments,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
    #[sea_orm(has_many = "super::withdrawals::Entity")]
    Withdrawals,
}

impl Related<super::adjustments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Adjustments.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Related<super::withdrawals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Withdrawals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Employee> for ActiveModel {
    fn from(employee: &Employee) -> Self {
        Self {
            id: ActiveValue::Set(employee.id.to_string()),
            name: ActiveValue::Set(employee.name.clone()),
            salary_amount: ActiveValue::Set(employee.salary.amount),
            salary_currency: ActiveValue::Set(employee.salary.currency.code().to_string()),
            converted_salary: ActiveValue::Set(employee.converted_salary),
            cycle_days: ActiveValue::Set(employee.cycle_days),
            start_date: ActiveValue::Set(employee.start_date),
            is_active: ActiveValue::Set(employee.is_active),
            last_paid_date: ActiveValue::Set(employee.last_paid_date),
            is_paid: ActiveValue::Set(employee.is_paid),
            paid_amount: ActiveValue::Set(employee.paid_amount),
        }
    }
}

impl TryFrom<Model> for Employee {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        // A non-positive cycle would poison every division downstream, so a
        // corrupt row is rejected here rather than at computation time.
        if model.cycle_days <= 0 {
            return Err(EngineError::CycleMisconfigured(format!(
                "stored cycle_days must be > 0, got {}",
                model.cycle_days
            )));
        }
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::EmployeeNotFound(model.id.clone()))?,
            name: model.name,
            salary: MonetaryAmount::new(
                model.salary_amount,
                Currency::try_from(model.salary_currency.as_str())?,
            ),
            converted_salary: model.converted_salary,
            cycle_days: model.cycle_days,
            start_date: model.start_date,
            is_active: model.is_active,
            last_paid_date: model.last_paid_date,
            is_paid: model.is_paid,
            paid_amount: model.paid_amount,
        })
    }
}
