use serde::{Deserialize, Serialize};

use crate::EngineError;

/// ISO currency code accepted for salaries, adjustments and withdrawals.
///
/// Daftar settles everything in Iraqi dinar (default `IQD`); `USD` entries are
/// converted to dinar at the dated dollar rate the moment they are recorded.
/// No other currency is accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Iqd,
    Usd,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Iqd => "IQD",
            Currency::Usd => "USD",
        }
    }

    /// `true` for the settlement currency (no conversion needed).
    #[must_use]
    pub const fn is_settlement(self) -> bool {
        matches!(self, Currency::Iqd)
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "IQD" => Ok(Currency::Iqd),
            "USD" => Ok(Currency::Usd),
            other => Err(EngineError::InvalidCurrency(format!(
                "unsupported currency: {other}"
            ))),
        }
    }
}
