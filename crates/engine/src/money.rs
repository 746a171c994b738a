use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Currency;

/// An amount tagged with the currency it was entered in.
///
/// Use this type for **all** caller-supplied monetary values (salaries,
/// adjustments, withdrawals) so an amount can never be separated from its
/// currency.
///
/// # Examples
///
/// ```rust
/// use engine::{Currency, MonetaryAmount};
/// use rust_decimal::Decimal;
///
/// let salary = MonetaryAmount::new(Decimal::from(500), Currency::Usd);
/// assert_eq!(salary.to_string(), "500 USD");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonetaryAmount {
    pub amount: Decimal,
    pub currency: Currency,
}

impl MonetaryAmount {
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Returns `true` if the amount is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

impl fmt::Display for MonetaryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency.code())
    }
}

/// The dinar value of a recorded amount, with its conversion provenance.
///
/// Dinar entries pass through untouched and carry no rate. Dollar entries
/// carry the rate that was applied and the date of the rate row it came from,
/// so a ledger entry can always explain its own value.
///
/// ```rust
/// use engine::ConvertedAmount;
/// use rust_decimal::Decimal;
///
/// let v = ConvertedAmount::settlement(Decimal::from(250_000));
/// assert_eq!(v.value, Decimal::from(250_000));
/// assert!(v.source_rate.is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertedAmount {
    /// Value in IQD.
    pub value: Decimal,
    /// Rate applied, `None` when the source was already IQD.
    pub source_rate: Option<Decimal>,
    /// Date of the rate row used, `None` when the source was already IQD.
    pub rate_date: Option<NaiveDate>,
}

impl ConvertedAmount {
    /// An amount that was already in the settlement currency.
    #[must_use]
    pub const fn settlement(value: Decimal) -> Self {
        Self {
            value,
            source_rate: None,
            rate_date: None,
        }
    }

    /// An amount converted from USD at `rate` taken from the row of `rate_date`.
    #[must_use]
    pub const fn converted(value: Decimal, rate: Decimal, rate_date: NaiveDate) -> Self {
        Self {
            value,
            source_rate: Some(rate),
            rate_date: Some(rate_date),
        }
    }
}
