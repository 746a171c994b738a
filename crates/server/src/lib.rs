use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod adjustments;
mod employees;
mod payroll;
mod rates;
mod server;

pub mod types {
    pub mod employee {
        pub use api_types::employee::{
            EmployeeListResponse, EmployeeNew, EmployeeUpdate, EmployeeView,
        };
    }

    pub mod payroll {
        pub use api_types::payroll::{
            AsOfQuery, BalanceResponse, BalanceSource, DueResponse, PaymentListResponse,
            PaymentNew, PaymentRecorded, PaymentView,
        };
    }

    pub mod withdrawal {
        pub use api_types::withdrawal::{WithdrawalListResponse, WithdrawalNew, WithdrawalView};
    }

    pub mod adjustment {
        pub use api_types::adjustment::{
            AdjustmentKind, AdjustmentListResponse, AdjustmentNew, AdjustmentUpdate,
            AdjustmentView,
        };
    }

    pub mod rate {
        pub use api_types::rate::{RateListResponse, RateUpsert, RateView};
    }
}

/// Default for date fields the client left out of a request.
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

//TODO: Find a better solution
#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::EmployeeNotFound(_) | EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidAmount(_)
        | EngineError::InvalidCurrency(_)
        | EngineError::InvalidAdjustmentType(_)
        | EngineError::MissingExchangeRate(_)
        | EngineError::CycleMisconfigured(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_employee_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::EmployeeNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_key_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        let res = ServerError::from(EngineError::InvalidAmount("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn engine_missing_rate_maps_to_422() {
        let res =
            ServerError::from(EngineError::MissingExchangeRate("2024-01-01".to_string()))
                .into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn engine_misconfigured_cycle_maps_to_422() {
        let res = ServerError::from(EngineError::CycleMisconfigured("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
