use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use crate::{adjustments, employees, payroll, rates};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/employees", post(employees::create).get(employees::list))
        .route(
            "/employees/{id}",
            get(employees::get).patch(employees::update),
        )
        .route("/employees/{id}/balance", get(payroll::balance))
        .route("/employees/{id}/due", get(payroll::due))
        .route("/employees/{id}/pay-salary", post(payroll::pay_salary))
        .route(
            "/employees/{id}/withdrawals",
            post(payroll::withdrawal_new).get(payroll::list_withdrawals),
        )
        .route("/employees/{id}/payments", get(payroll::list_payments))
        .route(
            "/employees/{id}/adjustments",
            post(adjustments::adjustment_new).get(adjustments::list),
        )
        .route(
            "/adjustments/{id}",
            axum::routing::patch(adjustments::update).delete(adjustments::remove),
        )
        .route("/rates", post(rates::upsert).get(rates::list))
        .with_state(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
