//! Balance, due-status, payment and withdrawal API endpoints

use api_types::payroll::{
    AsOfQuery, BalanceResponse, BalanceSource, DueResponse, PaymentListResponse, PaymentNew,
    PaymentRecorded, PaymentView,
};
use api_types::withdrawal::{WithdrawalListResponse, WithdrawalNew, WithdrawalView};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    ServerError,
    employees::{engine_currency, map_currency, view},
    server::ServerState,
    today,
};

fn map_source(source: engine::BalanceSource) -> BalanceSource {
    match source {
        engine::BalanceSource::CurrentEarningPeriod => BalanceSource::CurrentEarningPeriod,
        engine::BalanceSource::UnpaidSalaryPeriod => BalanceSource::UnpaidSalaryPeriod,
    }
}

fn payment_view(payment: engine::SalaryPayment) -> PaymentView {
    PaymentView {
        id: payment.id,
        employee_id: payment.employee_id,
        amount: payment.amount,
        payment_date: payment.payment_date,
        notes: payment.notes,
    }
}

fn withdrawal_view(withdrawal: engine::SalaryWithdrawal) -> WithdrawalView {
    WithdrawalView {
        id: withdrawal.id,
        employee_id: withdrawal.employee_id,
        amount: withdrawal.amount.amount,
        currency: map_currency(withdrawal.amount.currency),
        converted_amount: withdrawal.converted.value,
        exchange_rate: withdrawal.converted.source_rate,
        rate_date: withdrawal.converted.rate_date,
        withdrawal_date: withdrawal.withdrawal_date,
        notes: withdrawal.notes,
    }
}

pub async fn balance(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Query(query): Query<AsOfQuery>,
) -> Result<Json<BalanceResponse>, ServerError> {
    let on = query.on.unwrap_or_else(today);
    let balance = state.engine.compute_balance(id, on).await?;

    Ok(Json(BalanceResponse {
        base_salary: balance.base_salary,
        salary_days: balance.cycle_days,
        daily_rate: balance.daily_rate,
        available_balance: balance.available_balance,
        balance_source: map_source(balance.balance_source),
    }))
}

pub async fn due(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Query(query): Query<AsOfQuery>,
) -> Result<Json<DueResponse>, ServerError> {
    let on = query.on.unwrap_or_else(today);
    let due = state.engine.payment_due(id, on).await?;

    Ok(Json(DueResponse {
        is_due: due.is_due,
        elapsed_days: due.elapsed_days,
        days_remaining: due.days_remaining,
        next_due_date: due.next_due_date,
        net_salary: due.net_salary,
        withdrawn: due.withdrawn,
        suggested_amount: due.suggested_amount,
    }))
}

pub async fn pay_salary(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PaymentNew>,
) -> Result<(StatusCode, Json<PaymentRecorded>), ServerError> {
    let payment_date = payload.payment_date.unwrap_or_else(today);
    let amount = match payload.amount {
        Some(amount) => amount,
        None => {
            state
                .engine
                .payment_due(id, payment_date)
                .await?
                .suggested_amount
        }
    };

    let mut cmd = engine::PaymentCmd::new(id, amount, payment_date);
    if let Some(notes) = payload.notes {
        cmd = cmd.notes(notes);
    }

    let payment = state.engine.record_payment(cmd).await?;
    let employee = state.engine.employee(id).await?;

    Ok((
        StatusCode::CREATED,
        Json(PaymentRecorded {
            payment: payment_view(payment),
            employee: view(employee),
        }),
    ))
}

pub async fn withdrawal_new(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<WithdrawalNew>,
) -> Result<(StatusCode, Json<WithdrawalView>), ServerError> {
    let withdrawal_date = payload.withdrawal_date.unwrap_or_else(today);
    let currency = engine_currency(payload.currency.unwrap_or_default());

    let mut cmd = engine::WithdrawalCmd::new(id, payload.amount, currency, withdrawal_date);
    if let Some(notes) = payload.notes {
        cmd = cmd.notes(notes);
    }

    let withdrawal = state.engine.record_withdrawal(cmd).await?;

    Ok((StatusCode::CREATED, Json(withdrawal_view(withdrawal))))
}

pub async fn list_withdrawals(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WithdrawalListResponse>, ServerError> {
    let withdrawals = state.engine.list_withdrawals(id).await?;

    Ok(Json(WithdrawalListResponse {
        withdrawals: withdrawals.into_iter().map(withdrawal_view).collect(),
    }))
}

pub async fn list_payments(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PaymentListResponse>, ServerError> {
    let payments = state.engine.list_payments(id).await?;

    Ok(Json(PaymentListResponse {
        payments: payments.into_iter().map(payment_view).collect(),
    }))
}
