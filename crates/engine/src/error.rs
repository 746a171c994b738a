//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`EmployeeNotFound`] thrown when an employee id does not resolve (or the
//!   employee is inactive on a write path).
//! - [`MissingExchangeRate`] thrown when a USD conversion has no rate row on
//!   or before the requested date.
//!
//!  [`EmployeeNotFound`]: EngineError::EmployeeNotFound
//!  [`MissingExchangeRate`]: EngineError::MissingExchangeRate
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("employee \"{0}\" not found!")]
    EmployeeNotFound(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),
    #[error("Invalid adjustment type: {0}")]
    InvalidAdjustmentType(String),
    #[error("No exchange rate on or before {0}")]
    MissingExchangeRate(String),
    #[error("Misconfigured salary cycle: {0}")]
    CycleMisconfigured(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::EmployeeNotFound(a), Self::EmployeeNotFound(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidCurrency(a), Self::InvalidCurrency(b)) => a == b,
            (Self::InvalidAdjustmentType(a), Self::InvalidAdjustmentType(b)) => a == b,
            (Self::MissingExchangeRate(a), Self::MissingExchangeRate(b)) => a == b,
            (Self::CycleMisconfigured(a), Self::CycleMisconfigured(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
