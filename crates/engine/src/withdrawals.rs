//! Mid-cycle cash withdrawal records. Append-only.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ConvertedAmount, Currency, EngineError, MonetaryAmount, ResultEngine};

/// Cash taken against the running cycle, converted at the withdrawal date.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SalaryWithdrawal {
    pub id: Uuid,
    pub employee_id: Uuid,
    /// Amount as entered.
    pub amount: MonetaryAmount,
    /// Dinar value fixed at recording time; this is what counts against the
    /// period.
    pub converted: ConvertedAmount,
    pub withdrawal_date: NaiveDate,
    pub notes: Option<String>,
}

impl SalaryWithdrawal {
    pub fn new(
        employee_id: Uuid,
        amount: MonetaryAmount,
        converted: ConvertedAmount,
        withdrawal_date: NaiveDate,
        notes: Option<String>,
    ) -> ResultEngine<Self> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "withdrawal amount must be > 0".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            employee_id,
            amount,
            converted,
            withdrawal_date,
            notes,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "salary_withdrawals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub employee_id: String,
    pub amount: Decimal,
    pub currency: String,
    pub converted_amount: Decimal,
    pub exchange_rate: Option<Decimal>,
    pub rate_date: Option<Date>,
    pub withdrawal_date: Date,
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

impl From<&SalaryWithdrawal> for ActiveModel {
    fn from(withdrawal: &SalaryWithdrawal) -> Self {
        Self {
            id: ActiveValue::Set(withdrawal.id.to_string()),
            employee_id: ActiveValue::Set(withdrawal.employee_id.to_string()),
            amount: ActiveValue::Set(withdrawal.amount.amount),
            currency: ActiveValue::Set(withdrawal.amount.currency.code().to_string()),
            converted_amount: ActiveValue::Set(withdrawal.converted.value),
            exchange_rate: ActiveValue::Set(withdrawal.converted.source_rate),
            rate_date: ActiveValue::Set(withdrawal.converted.rate_date),
            withdrawal_date: ActiveValue::Set(withdrawal.withdrawal_date),
            notes: ActiveValue::Set(withdrawal.notes.clone()),
        }
    }
}

impl TryFrom<Model> for SalaryWithdrawal {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("withdrawal not exists".to_string()))?,
            employee_id: Uuid::parse_str(&model.employee_id)
                .map_err(|_| EngineError::EmployeeNotFound(model.employee_id.clone()))?,
            amount: MonetaryAmount::new(
                model.amount,
                Currency::try_from(model.currency.as_str())?,
            ),
            converted: ConvertedAmount {
                value: model.converted_amount,
                source_rate: model.exchange_rate,
                rate_date: model.rate_date,
            },
            withdrawal_date: model.withdrawal_date,
            notes: model.notes,
        })
    }
}
