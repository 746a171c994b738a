//! Bonus and penalty API endpoints

use api_types::adjustment::{
    AdjustmentKind as ApiKind, AdjustmentListResponse, AdjustmentNew, AdjustmentUpdate,
    AdjustmentView,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    ServerError,
    employees::{engine_currency, map_currency},
    server::ServerState,
    today,
};

fn map_kind(kind: engine::AdjustmentKind) -> ApiKind {
    match kind {
        engine::AdjustmentKind::Bonus => ApiKind::Bonus,
        engine::AdjustmentKind::Penalty => ApiKind::Penalty,
    }
}

fn engine_kind(kind: ApiKind) -> engine::AdjustmentKind {
    match kind {
        ApiKind::Bonus => engine::AdjustmentKind::Bonus,
        ApiKind::Penalty => engine::AdjustmentKind::Penalty,
    }
}

fn view(adjustment: engine::Adjustment) -> AdjustmentView {
    AdjustmentView {
        id: adjustment.id,
        employee_id: adjustment.employee_id,
        kind: map_kind(adjustment.kind),
        amount: adjustment.amount.amount,
        currency: map_currency(adjustment.amount.currency),
        converted_amount: adjustment.converted.value,
        exchange_rate: adjustment.converted.source_rate,
        rate_date: adjustment.converted.rate_date,
        date: adjustment.date,
        description: adjustment.description,
    }
}

pub async fn adjustment_new(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AdjustmentNew>,
) -> Result<(StatusCode, Json<AdjustmentView>), ServerError> {
    let date = payload.date.unwrap_or_else(today);
    let currency = engine_currency(payload.currency.unwrap_or_default());

    let mut cmd = engine::AdjustmentCmd::new(
        id,
        engine_kind(payload.kind),
        payload.amount,
        currency,
        date,
    );
    if let Some(description) = payload.description {
        cmd = cmd.description(description);
    }

    let adjustment = state.engine.add_adjustment(cmd).await?;

    Ok((StatusCode::CREATED, Json(view(adjustment))))
}

pub async fn list(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AdjustmentListResponse>, ServerError> {
    let adjustments = state.engine.list_adjustments(id).await?;
    let net_adjustment = engine::net_adjustment(&adjustments)?;

    Ok(Json(AdjustmentListResponse {
        adjustments: adjustments.into_iter().map(view).collect(),
        net_adjustment,
    }))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AdjustmentUpdate>,
) -> Result<Json<AdjustmentView>, ServerError> {
    let mut cmd = engine::UpdateAdjustmentCmd::new(id);
    if let Some(kind) = payload.kind {
        cmd = cmd.kind(engine_kind(kind));
    }
    if let Some(amount) = payload.amount {
        cmd = cmd.amount(amount);
    }
    if let Some(currency) = payload.currency {
        cmd = cmd.currency(engine_currency(currency));
    }
    if let Some(date) = payload.date {
        cmd = cmd.date(date);
    }
    if let Some(description) = payload.description {
        cmd = cmd.description(description);
    }

    let adjustment = state.engine.update_adjustment(cmd).await?;

    Ok(Json(view(adjustment)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_adjustment(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
