//! Exchange rate API endpoints

use api_types::rate::{RateListResponse, RateUpsert, RateView};
use axum::{Json, extract::State, http::StatusCode};

use crate::{ServerError, server::ServerState, today};

fn view(rate: engine::DollarRate) -> RateView {
    RateView {
        date: rate.date,
        rate: rate.rate,
        entered_by: rate.entered_by,
    }
}

pub async fn upsert(
    State(state): State<ServerState>,
    Json(payload): Json<RateUpsert>,
) -> Result<(StatusCode, Json<RateView>), ServerError> {
    let date = payload.date.unwrap_or_else(today);
    let rate = state
        .engine
        .set_dollar_rate(date, payload.rate, payload.entered_by.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(view(rate))))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<RateListResponse>, ServerError> {
    let rates = state.engine.list_dollar_rates().await?;

    Ok(Json(RateListResponse {
        rates: rates.into_iter().map(view).collect(),
    }))
}
