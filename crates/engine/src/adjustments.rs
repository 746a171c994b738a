//! Bonus and penalty entries.
//!
//! Each entry is converted to dinar at its own date's rate when it is
//! recorded, and the stored converted value is what nets into the salary.
//! Later rate rows never rewrite an existing entry.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ConvertedAmount, Currency, EngineError, MonetaryAmount, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    Bonus,
    Penalty,
}

impl AdjustmentKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bonus => "bonus",
            Self::Penalty => "penalty",
        }
    }
}

impl TryFrom<&str> for AdjustmentKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bonus" => Ok(Self::Bonus),
            "penalty" => Ok(Self::Penalty),
            other => Err(EngineError::InvalidAdjustmentType(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub kind: AdjustmentKind,
    /// Amount as entered.
    pub amount: MonetaryAmount,
    /// Dinar value fixed when the entry was recorded or last edited.
    pub converted: ConvertedAmount,
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl Adjustment {
    pub fn new(
        employee_id: Uuid,
        kind: AdjustmentKind,
        amount: MonetaryAmount,
        converted: ConvertedAmount,
        date: NaiveDate,
        description: Option<String>,
    ) -> ResultEngine<Self> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "adjustment amount must be > 0".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            employee_id,
            kind,
            amount,
            converted,
            date,
            description,
        })
    }

    /// Converted value with the kind's sign applied.
    #[must_use]
    pub fn signed_converted(&self) -> Decimal {
        match self.kind {
            AdjustmentKind::Bonus => self.converted.value,
            AdjustmentKind::Penalty => -self.converted.value,
        }
    }
}

/// Net effect of a set of entries: bonuses minus penalties, in dinar.
///
/// Fails with `InvalidAmount` when the running total leaves `Decimal` range.
pub fn net_adjustment(entries: &[Adjustment]) -> ResultEngine<Decimal> {
    entries
        .iter()
        .map(Adjustment::signed_converted)
        .try_fold(Decimal::ZERO, |net, value| {
            net.checked_add(value)
                .ok_or_else(|| EngineError::InvalidAmount("adjustment total too large".to_string()))
        })
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "adjustments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub employee_id: String,
    pub kind: String,
    pub amount: Decimal,
    pub currency: String,
    pub converted_amount: Decimal,
    pub exchange_rate: Option<Decimal>,
    pub rate_date: Option<Date>,
    pub date: Date,
    pub description: Option<String>,
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

impl From<&Adjustment> for ActiveModel {
    fn from(adjustment: &Adjustment) -> Self {
        Self {
            id: ActiveValue::Set(adjustment.id.to_string()),
            employee_id: ActiveValue::Set(adjustment.employee_id.to_string()),
            kind: ActiveValue::Set(adjustment.kind.as_str().to_string()),
            amount: ActiveValue::Set(adjustment.amount.amount),
            currency: ActiveValue::Set(adjustment.amount.currency.code().to_string()),
            converted_amount: ActiveValue::Set(adjustment.converted.value),
            exchange_rate: ActiveValue::Set(adjustment.converted.source_rate),
            rate_date: ActiveValue::Set(adjustment.converted.rate_date),
            date: ActiveValue::Set(adjustment.date),
            description: ActiveValue::Set(adjustment.description.clone()),
        }
    }
}

impl TryFrom<Model> for Adjustment {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("adjustment not exists".to_string()))?,
            employee_id: Uuid::parse_str(&model.employee_id)
                .map_err(|_| EngineError::EmployeeNotFound(model.employee_id.clone()))?,
            kind: AdjustmentKind::try_from(model.kind.as_str())?,
            amount: MonetaryAmount::new(
                model.amount,
                Currency::try_from(model.currency.as_str())?,
            ),
            converted: ConvertedAmount {
                value: model.converted_amount,
                source_rate: model.exchange_rate,
                rate_date: model.rate_date,
            },
            date: model.date,
            description: model.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(kind: AdjustmentKind, converted: i64) -> Adjustment {
        Adjustment::new(
            Uuid::new_v4(),
            kind,
            MonetaryAmount::new(Decimal::from(converted), Currency::Iqd),
            ConvertedAmount::settlement(Decimal::from(converted)),
            date(2024, 1, 5),
            None,
        )
        .unwrap()
    }

    #[test]
    fn bonuses_add_and_penalties_subtract() {
        let entries = vec![
            entry(AdjustmentKind::Bonus, 50_000),
            entry(AdjustmentKind::Penalty, 20_000),
        ];
        assert_eq!(net_adjustment(&entries).unwrap(), Decimal::from(30_000));
    }

    #[test]
    fn empty_ledger_nets_to_zero() {
        assert_eq!(net_adjustment(&[]).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn oversized_net_is_rejected() {
        let huge = Adjustment::new(
            Uuid::new_v4(),
            AdjustmentKind::Bonus,
            MonetaryAmount::new(Decimal::MAX, Currency::Iqd),
            ConvertedAmount::settlement(Decimal::MAX),
            date(2024, 1, 5),
            None,
        )
        .unwrap();
        let err = net_adjustment(&[huge.clone(), huge]).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidAmount("adjustment total too large".to_string())
        );
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!(
            AdjustmentKind::try_from("Bonus").unwrap(),
            AdjustmentKind::Bonus
        );
        let err = AdjustmentKind::try_from("raise").unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidAdjustmentType("raise".to_string())
        );
    }
}
