//! Dollar rate rows and the dated lookup table built from them.
//!
//! One rate row per calendar day. A conversion on date `d` uses the row with
//! the latest date `<= d`, so a rate stays in force until a newer one is
//! entered.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{ConvertedAmount, EngineError, MonetaryAmount, ResultEngine};

/// A USD -> IQD rate valid from `date` onwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DollarRate {
    pub date: NaiveDate,
    pub rate: Decimal,
    pub entered_by: Option<String>,
}

impl DollarRate {
    pub fn new(date: NaiveDate, rate: Decimal, entered_by: Option<String>) -> ResultEngine<Self> {
        if rate <= Decimal::ZERO {
            return Err(EngineError::InvalidAmount(
                "rate must be > 0".to_string(),
            ));
        }
        Ok(Self {
            date,
            rate,
            entered_by,
        })
    }
}

/// All known rate rows, ordered by date, ready for lookups.
///
/// The table is loaded per operation from storage. It stays small (one row
/// per day a rate was entered) and keeps the resolution logic pure.
#[derive(Clone, Debug, Default)]
pub struct RateTable {
    rates: Vec<DollarRate>,
}

impl RateTable {
    /// Builds a table from rows in any order.
    #[must_use]
    pub fn new(mut rates: Vec<DollarRate>) -> Self {
        rates.sort_by_key(|r| r.date);
        Self { rates }
    }

    /// The rate in force on `on`: the row with the latest date `<= on`.
    pub fn resolve(&self, on: NaiveDate) -> ResultEngine<&DollarRate> {
        self.rates
            .iter()
            .rev()
            .find(|r| r.date <= on)
            .ok_or_else(|| EngineError::MissingExchangeRate(on.to_string()))
    }

    /// Converts `amount` into dinar using the rate in force on `on`.
    ///
    /// Dinar amounts pass through unchanged and never fail, even with an
    /// empty table. Dollar amounts fail with `MissingExchangeRate` when no
    /// row exists on or before `on`, and with `InvalidAmount` when the
    /// converted value does not fit a `Decimal`.
    pub fn convert(&self, amount: MonetaryAmount, on: NaiveDate) -> ResultEngine<ConvertedAmount> {
        if amount.currency.is_settlement() {
            return Ok(ConvertedAmount::settlement(amount.amount));
        }
        let rate = self.resolve(on)?;
        let value = amount
            .amount
            .checked_mul(rate.rate)
            .ok_or_else(|| EngineError::InvalidAmount("converted amount too large".to_string()))?;
        Ok(ConvertedAmount::converted(value, rate.rate, rate.date))
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "dollar_rates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub date: Date,
    pub rate: Decimal,
    pub entered_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&DollarRate> for ActiveModel {
    fn from(rate: &DollarRate) -> Self {
        Self {
            date: ActiveValue::Set(rate.date),
            rate: ActiveValue::Set(rate.rate),
            entered_by: ActiveValue::Set(rate.entered_by.clone()),
        }
    }
}

impl From<Model> for DollarRate {
    fn from(model: Model) -> Self {
        Self {
            date: model.date,
            rate: model.rate,
            entered_by: model.entered_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;
    use crate::Currency;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn table() -> RateTable {
        RateTable::new(vec![
            DollarRate::new(date(2024, 1, 10), Decimal::from(1460), None).unwrap(),
            DollarRate::new(date(2024, 1, 1), Decimal::from(1450), None).unwrap(),
        ])
    }

    #[test]
    fn resolve_picks_latest_row_on_or_before() {
        let table = table();
        assert_eq!(
            table.resolve(date(2024, 1, 5)).unwrap().rate,
            Decimal::from(1450)
        );
        assert_eq!(
            table.resolve(date(2024, 1, 10)).unwrap().rate,
            Decimal::from(1460)
        );
        assert_eq!(
            table.resolve(date(2024, 1, 15)).unwrap().rate,
            Decimal::from(1460)
        );
    }

    #[test]
    fn resolve_before_first_row_fails() {
        let err = table().resolve(date(2023, 12, 31)).unwrap_err();
        assert_eq!(
            err,
            EngineError::MissingExchangeRate("2023-12-31".to_string())
        );
    }

    #[test]
    fn dinar_passes_through_without_any_rate() {
        let empty = RateTable::default();
        let converted = empty
            .convert(
                MonetaryAmount::new(Decimal::from(250_000), Currency::Iqd),
                date(2024, 1, 5),
            )
            .unwrap();
        assert_eq!(converted.value, Decimal::from(250_000));
        assert_eq!(converted.source_rate, None);
        assert_eq!(converted.rate_date, None);
    }

    #[test]
    fn dollar_converts_and_keeps_provenance() {
        let converted = table()
            .convert(
                MonetaryAmount::new(Decimal::from(500), Currency::Usd),
                date(2024, 1, 5),
            )
            .unwrap();
        assert_eq!(converted.value, Decimal::from(725_000));
        assert_eq!(converted.source_rate, Some(Decimal::from(1450)));
        assert_eq!(converted.rate_date, Some(date(2024, 1, 1)));
    }

    #[test]
    fn oversized_conversion_is_rejected() {
        let err = table()
            .convert(
                MonetaryAmount::new(Decimal::MAX, Currency::Usd),
                date(2024, 1, 5),
            )
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidAmount("converted amount too large".to_string())
        );
    }

    #[test]
    fn rate_must_be_positive() {
        let err = DollarRate::new(date(2024, 1, 1), Decimal::ZERO, None).unwrap_err();
        assert_eq!(err, EngineError::InvalidAmount("rate must be > 0".to_string()));
    }
}
