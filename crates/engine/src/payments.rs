//! Salary payment records. Append-only; paying again writes a new row.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// One settled salary payment, always in IQD.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SalaryPayment {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub notes: Option<String>,
}

impl SalaryPayment {
    pub fn new(
        employee_id: Uuid,
        amount: Decimal,
        payment_date: NaiveDate,
        notes: Option<String>,
    ) -> ResultEngine<Self> {
        if amount <= Decimal::ZERO {
            return Err(EngineError::InvalidAmount(
                "payment amount must be > 0".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            employee_id,
            amount,
            payment_date,
            notes,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "salary_payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub employee_id: String,
    pub amount: Decimal,
    pub payment_date: Date,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::EmployeeId",
        to = "super::employees::Column::Id"
    )]
    Employees,
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&SalaryPayment> for ActiveModel {
    fn from(payment: &SalaryPayment) -> Self {
        Self {
            id: ActiveValue::Set(payment.id.to_string()),
            employee_id: ActiveValue::Set(payment.employee_id.to_string()),
            amount: ActiveValue::Set(payment.amount),
            payment_date: ActiveValue::Set(payment.payment_date),
            notes: ActiveValue::Set(payment.notes.clone()),
        }
    }
}

impl TryFrom<Model> for SalaryPayment {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("payment not exists".to_string()))?,
            employee_id: Uuid::parse_str(&model.employee_id)
                .map_err(|_| EngineError::EmployeeNotFound(model.employee_id.clone()))?,
            amount: model.amount,
            payment_date: model.payment_date,
            notes: model.notes,
        })
    }
}
