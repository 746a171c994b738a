//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the engine enforces consistent invariants.

use rust_decimal::Decimal;
use unicode_normalization::UnicodeNormalization;

use crate::{EngineError, ResultEngine};

/// Normalize an employee name: trim and NFC-fold so the same name entered
/// from different keyboards (Arabic script in particular) stores one way.
pub(crate) fn normalize_employee_name(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidAmount(
            "employee name must not be empty".to_string(),
        ));
    }
    Ok(trimmed.nfc().collect())
}

/// Reject non-positive caller-supplied amounts.
pub(crate) fn require_positive(amount: Decimal, label: &str) -> ResultEngine<()> {
    if amount <= Decimal::ZERO {
        return Err(EngineError::InvalidAmount(format!(
            "{label} must be > 0"
        )));
    }
    Ok(())
}

/// Trim optional free text, mapping blank to `None`.
pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}
