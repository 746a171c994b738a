//! Employee roster API endpoints

use api_types::employee::{EmployeeListResponse, EmployeeNew, EmployeeUpdate, EmployeeView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, today};

pub(crate) fn map_currency(currency: engine::Currency) -> api_types::Currency {
    match currency {
        engine::Currency::Iqd => api_types::Currency::Iqd,
        engine::Currency::Usd => api_types::Currency::Usd,
    }
}

pub(crate) fn engine_currency(currency: api_types::Currency) -> engine::Currency {
    match currency {
        api_types::Currency::Iqd => engine::Currency::Iqd,
        api_types::Currency::Usd => engine::Currency::Usd,
    }
}

pub(crate) fn view(employee: engine::Employee) -> EmployeeView {
    EmployeeView {
        id: employee.id,
        name: employee.name,
        salary: employee.salary.amount,
        currency: map_currency(employee.salary.currency),
        converted_salary: employee.converted_salary,
        cycle_days: employee.cycle_days,
        start_date: employee.start_date,
        is_active: employee.is_active,
        last_paid_date: employee.last_paid_date,
        is_paid: employee.is_paid,
        paid_amount: employee.paid_amount,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeNew>,
) -> Result<(StatusCode, Json<EmployeeView>), ServerError> {
    let start_date = payload.start_date.unwrap_or_else(today);
    let currency = engine_currency(payload.currency.unwrap_or_default());

    let mut cmd = engine::CreateEmployeeCmd::new(
        payload.name,
        payload.salary,
        currency,
        payload.cycle_days,
        start_date,
    );
    if let Some(rate_date) = payload.rate_date {
        cmd = cmd.rate_date(rate_date);
    }

    let employee = state.engine.create_employee(cmd).await?;

    Ok((StatusCode::CREATED, Json(view(employee))))
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<EmployeeListResponse>, ServerError> {
    let employees = state.engine.list_employees().await?;

    Ok(Json(EmployeeListResponse {
        employees: employees.into_iter().map(view).collect(),
    }))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EmployeeView>, ServerError> {
    let employee = state.engine.employee(id).await?;

    Ok(Json(view(employee)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EmployeeUpdate>,
) -> Result<Json<EmployeeView>, ServerError> {
    let mut cmd = engine::UpdateEmployeeCmd::new(id);
    if let Some(name) = payload.name {
        cmd = cmd.name(name);
    }
    if let Some(salary) = payload.salary {
        cmd = cmd.amount(salary);
    }
    if let Some(currency) = payload.currency {
        cmd = cmd.currency(engine_currency(currency));
    }
    if let Some(cycle_days) = payload.cycle_days {
        cmd = cmd.cycle_days(cycle_days);
    }
    if let Some(start_date) = payload.start_date {
        cmd = cmd.start_date(start_date);
    }
    if let Some(is_active) = payload.is_active {
        cmd = cmd.is_active(is_active);
    }
    // Salary changes are re-converted at an explicit date, today unless the
    // client picked one.
    if payload.salary.is_some() || payload.currency.is_some() {
        cmd = cmd.rate_date(payload.rate_date.unwrap_or_else(today));
    } else if let Some(rate_date) = payload.rate_date {
        cmd = cmd.rate_date(rate_date);
    }

    let employee = state.engine.update_employee(cmd).await?;

    Ok(Json(view(employee)))
}
