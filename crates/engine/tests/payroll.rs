use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

use engine::{
    AdjustmentCmd, AdjustmentKind, BalanceSource, CreateEmployeeCmd, Currency, Engine, EngineError,
    PaymentCmd, UpdateAdjustmentCmd, UpdateEmployeeCmd, WithdrawalCmd,
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn engine_with_file_db() -> (Engine, DatabaseConnection, String, std::path::PathBuf) {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_dbs");
    std::fs::create_dir_all(&root).unwrap();

    let path = root.join(format!("engine_{}.db", Uuid::new_v4()));
    let url = format!("sqlite:{}?mode=rwc", path.display());

    let db = Database::connect(&url).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();

    (engine, db, url, path)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 900,000 IQD per 30-day cycle, starting 2024-01-01.
async fn standard_employee(engine: &Engine) -> engine::Employee {
    engine
        .create_employee(CreateEmployeeCmd::new(
            "Sara",
            Decimal::from(900_000),
            Currency::Iqd,
            30,
            date(2024, 1, 1),
        ))
        .await
        .unwrap()
}

#[tokio::test]
async fn salary_cycle_end_to_end() {
    let (engine, _db) = engine_with_db().await;
    let employee = standard_employee(&engine).await;
    assert_eq!(employee.converted_salary, Decimal::from(900_000));
    assert!(!employee.is_paid);

    // Ten days in: 10 * 30,000 accrued.
    let balance = engine
        .compute_balance(employee.id, date(2024, 1, 11))
        .await
        .unwrap();
    assert_eq!(balance.daily_rate, Decimal::from(30_000));
    assert_eq!(balance.available_balance, Decimal::from(300_000));
    assert_eq!(balance.balance_source, BalanceSource::CurrentEarningPeriod);

    let withdrawal = engine
        .record_withdrawal(WithdrawalCmd::new(
            employee.id,
            Decimal::from(100_000),
            Currency::Iqd,
            date(2024, 1, 11),
        ))
        .await
        .unwrap();
    assert_eq!(withdrawal.converted.value, Decimal::from(100_000));
    assert_eq!(withdrawal.converted.source_rate, None);

    let balance = engine
        .compute_balance(employee.id, date(2024, 1, 11))
        .await
        .unwrap();
    assert_eq!(balance.available_balance, Decimal::from(200_000));

    // Day 30: the full salary is on the table, less what was taken.
    let balance = engine
        .compute_balance(employee.id, date(2024, 1, 31))
        .await
        .unwrap();
    assert_eq!(balance.available_balance, Decimal::from(800_000));
    assert_eq!(balance.balance_source, BalanceSource::UnpaidSalaryPeriod);

    let due = engine
        .payment_due(employee.id, date(2024, 1, 31))
        .await
        .unwrap();
    assert!(due.is_due);
    assert_eq!(due.elapsed_days, 30);
    assert_eq!(due.days_remaining, 0);
    assert_eq!(due.next_due_date, date(2024, 1, 31));
    assert_eq!(due.net_salary, Decimal::from(900_000));
    assert_eq!(due.withdrawn, Decimal::from(100_000));
    assert_eq!(due.suggested_amount, Decimal::from(800_000));

    engine
        .record_payment(PaymentCmd::new(
            employee.id,
            due.suggested_amount,
            date(2024, 1, 31),
        ))
        .await
        .unwrap();

    let employee = engine.employee(employee.id).await.unwrap();
    assert!(employee.is_paid);
    assert_eq!(employee.last_paid_date, Some(date(2024, 1, 31)));
    assert_eq!(employee.paid_amount, Some(Decimal::from(800_000)));

    // The payment resets the cycle; the old withdrawal stays behind.
    let due = engine
        .payment_due(employee.id, date(2024, 2, 1))
        .await
        .unwrap();
    assert!(!due.is_due);
    assert_eq!(due.elapsed_days, 1);
    assert_eq!(due.days_remaining, 29);
    assert_eq!(due.next_due_date, date(2024, 3, 1));
    assert_eq!(due.withdrawn, Decimal::ZERO);

    let balance = engine
        .compute_balance(employee.id, date(2024, 2, 1))
        .await
        .unwrap();
    assert_eq!(balance.available_balance, Decimal::from(30_000));
    assert_eq!(balance.balance_source, BalanceSource::CurrentEarningPeriod);

    // Payment day itself starts over at zero.
    let balance = engine
        .compute_balance(employee.id, date(2024, 1, 31))
        .await
        .unwrap();
    assert_eq!(balance.available_balance, Decimal::ZERO);
}

#[tokio::test]
async fn compute_balance_writes_nothing() {
    let (engine, _db) = engine_with_db().await;
    let employee = standard_employee(&engine).await;

    let first = engine
        .compute_balance(employee.id, date(2024, 1, 20))
        .await
        .unwrap();
    let second = engine
        .compute_balance(employee.id, date(2024, 1, 20))
        .await
        .unwrap();
    assert_eq!(first, second);

    assert!(engine.list_payments(employee.id).await.unwrap().is_empty());
    assert!(
        engine
            .list_withdrawals(employee.id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn payments_append_to_the_ledger_newest_first() {
    let (engine, _db) = engine_with_db().await;
    let employee = standard_employee(&engine).await;

    engine
        .record_payment(
            PaymentCmd::new(employee.id, Decimal::from(900_000), date(2024, 1, 31))
                .notes("January"),
        )
        .await
        .unwrap();
    engine
        .record_payment(PaymentCmd::new(
            employee.id,
            Decimal::from(900_000),
            date(2024, 3, 2),
        ))
        .await
        .unwrap();

    let payments = engine.list_payments(employee.id).await.unwrap();
    assert_eq!(payments.len(), 2);
    assert_eq!(payments[0].payment_date, date(2024, 3, 2));
    assert_eq!(payments[1].notes.as_deref(), Some("January"));

    let employee = engine.employee(employee.id).await.unwrap();
    assert_eq!(employee.last_paid_date, Some(date(2024, 3, 2)));
}

#[tokio::test]
async fn usd_salary_converts_at_the_start_date_rate() {
    let (engine, _db) = engine_with_db().await;
    engine
        .set_dollar_rate(date(2024, 1, 1), Decimal::from(1450), None)
        .await
        .unwrap();
    engine
        .set_dollar_rate(date(2024, 1, 10), Decimal::from(1500), None)
        .await
        .unwrap();

    // Start date 2024-01-05 falls under the 1450 row, not the later one.
    let employee = engine
        .create_employee(CreateEmployeeCmd::new(
            "Omar",
            Decimal::from(500),
            Currency::Usd,
            30,
            date(2024, 1, 5),
        ))
        .await
        .unwrap();
    assert_eq!(employee.salary.amount, Decimal::from(500));
    assert_eq!(employee.salary.currency, Currency::Usd);
    assert_eq!(employee.converted_salary, Decimal::from(725_000));
}

#[tokio::test]
async fn usd_salary_without_a_rate_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let err = engine
        .create_employee(CreateEmployeeCmd::new(
            "Omar",
            Decimal::from(500),
            Currency::Usd,
            30,
            date(2024, 1, 5),
        ))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::MissingExchangeRate("2024-01-05".to_string())
    );
    assert!(engine.list_employees().await.unwrap().is_empty());
}

#[tokio::test]
async fn oversized_salary_conversion_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    engine
        .set_dollar_rate(date(2024, 1, 1), Decimal::from(1450), None)
        .await
        .unwrap();

    // Positive and well-formed, but the dinar product leaves Decimal range.
    let err = engine
        .create_employee(CreateEmployeeCmd::new(
            "Omar",
            Decimal::MAX,
            Currency::Usd,
            30,
            date(2024, 1, 5),
        ))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidAmount("converted amount too large".to_string())
    );
    assert!(engine.list_employees().await.unwrap().is_empty());
}

#[tokio::test]
async fn salary_update_refixes_the_dinar_value() {
    let (engine, _db) = engine_with_db().await;
    engine
        .set_dollar_rate(date(2024, 1, 1), Decimal::from(1450), None)
        .await
        .unwrap();
    let employee = engine
        .create_employee(CreateEmployeeCmd::new(
            "Omar",
            Decimal::from(500),
            Currency::Usd,
            30,
            date(2024, 1, 1),
        ))
        .await
        .unwrap();
    assert_eq!(employee.converted_salary, Decimal::from(725_000));

    engine
        .set_dollar_rate(date(2024, 2, 1), Decimal::from(1500), None)
        .await
        .unwrap();

    // A name edit alone must not touch the stored conversion.
    let employee = engine
        .update_employee(UpdateEmployeeCmd::new(employee.id).name("Omar K."))
        .await
        .unwrap();
    assert_eq!(employee.converted_salary, Decimal::from(725_000));

    let employee = engine
        .update_employee(
            UpdateEmployeeCmd::new(employee.id)
                .amount(Decimal::from(600))
                .rate_date(date(2024, 2, 1)),
        )
        .await
        .unwrap();
    assert_eq!(employee.converted_salary, Decimal::from(900_000));
}

#[tokio::test]
async fn adjustments_net_into_the_suggested_payment() {
    let (engine, _db) = engine_with_db().await;
    let employee = engine
        .create_employee(CreateEmployeeCmd::new(
            "Nadia",
            Decimal::from(500_000),
            Currency::Iqd,
            30,
            date(2024, 1, 1),
        ))
        .await
        .unwrap();

    engine
        .add_adjustment(AdjustmentCmd::new(
            employee.id,
            AdjustmentKind::Bonus,
            Decimal::from(50_000),
            Currency::Iqd,
            date(2024, 1, 10),
        ))
        .await
        .unwrap();
    let penalty = engine
        .add_adjustment(
            AdjustmentCmd::new(
                employee.id,
                AdjustmentKind::Penalty,
                Decimal::from(20_000),
                Currency::Iqd,
                date(2024, 1, 15),
            )
            .description("late twice"),
        )
        .await
        .unwrap();

    let due = engine
        .payment_due(employee.id, date(2024, 1, 31))
        .await
        .unwrap();
    assert_eq!(due.net_salary, Decimal::from(530_000));
    assert_eq!(due.suggested_amount, Decimal::from(530_000));

    engine
        .update_adjustment(UpdateAdjustmentCmd::new(penalty.id).amount(Decimal::from(10_000)))
        .await
        .unwrap();
    let due = engine
        .payment_due(employee.id, date(2024, 1, 31))
        .await
        .unwrap();
    assert_eq!(due.net_salary, Decimal::from(540_000));

    engine.delete_adjustment(penalty.id).await.unwrap();
    let due = engine
        .payment_due(employee.id, date(2024, 1, 31))
        .await
        .unwrap();
    assert_eq!(due.net_salary, Decimal::from(550_000));
}

#[tokio::test]
async fn adjustments_from_earlier_cycles_still_net_in() {
    let (engine, _db) = engine_with_db().await;
    let employee = engine
        .create_employee(CreateEmployeeCmd::new(
            "Nadia",
            Decimal::from(500_000),
            Currency::Iqd,
            30,
            date(2024, 1, 1),
        ))
        .await
        .unwrap();
    engine
        .add_adjustment(AdjustmentCmd::new(
            employee.id,
            AdjustmentKind::Bonus,
            Decimal::from(50_000),
            Currency::Iqd,
            date(2024, 1, 10),
        ))
        .await
        .unwrap();
    engine
        .record_payment(PaymentCmd::new(
            employee.id,
            Decimal::from(550_000),
            date(2024, 1, 31),
        ))
        .await
        .unwrap();

    // Netting is all-time until the entry is deleted; only withdrawals
    // reset with the cycle.
    let due = engine
        .payment_due(employee.id, date(2024, 3, 1))
        .await
        .unwrap();
    assert!(due.is_due);
    assert_eq!(due.net_salary, Decimal::from(550_000));
    assert_eq!(due.withdrawn, Decimal::ZERO);
}

#[tokio::test]
async fn adjustment_converts_at_its_own_date() {
    let (engine, _db) = engine_with_db().await;
    engine
        .set_dollar_rate(date(2024, 1, 1), Decimal::from(1450), None)
        .await
        .unwrap();
    engine
        .set_dollar_rate(date(2024, 1, 10), Decimal::from(1500), None)
        .await
        .unwrap();
    let employee = standard_employee(&engine).await;

    let early = engine
        .add_adjustment(AdjustmentCmd::new(
            employee.id,
            AdjustmentKind::Bonus,
            Decimal::from(100),
            Currency::Usd,
            date(2024, 1, 5),
        ))
        .await
        .unwrap();
    assert_eq!(early.converted.value, Decimal::from(145_000));
    assert_eq!(early.converted.source_rate, Some(Decimal::from(1450)));
    assert_eq!(early.converted.rate_date, Some(date(2024, 1, 1)));

    let late = engine
        .add_adjustment(AdjustmentCmd::new(
            employee.id,
            AdjustmentKind::Bonus,
            Decimal::from(100),
            Currency::Usd,
            date(2024, 1, 12),
        ))
        .await
        .unwrap();
    assert_eq!(late.converted.value, Decimal::from(150_000));
    assert_eq!(late.converted.source_rate, Some(Decimal::from(1500)));
}

#[tokio::test]
async fn editing_a_missing_adjustment_fails() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .update_adjustment(UpdateAdjustmentCmd::new(Uuid::new_v4()).amount(Decimal::from(10)))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::KeyNotFound("adjustment not exists".to_string())
    );

    let err = engine.delete_adjustment(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::KeyNotFound("adjustment not exists".to_string())
    );
}

#[tokio::test]
async fn inactive_employee_stays_readable_but_rejects_money() {
    let (engine, _db) = engine_with_db().await;
    let employee = standard_employee(&engine).await;
    engine
        .update_employee(UpdateEmployeeCmd::new(employee.id).is_active(false))
        .await
        .unwrap();

    // History and derived figures stay available.
    let balance = engine
        .compute_balance(employee.id, date(2024, 1, 11))
        .await
        .unwrap();
    assert_eq!(balance.available_balance, Decimal::from(300_000));
    engine.payment_due(employee.id, date(2024, 1, 11)).await.unwrap();
    assert!(engine.list_payments(employee.id).await.unwrap().is_empty());

    let not_found = EngineError::EmployeeNotFound(employee.id.to_string());
    let err = engine
        .record_withdrawal(WithdrawalCmd::new(
            employee.id,
            Decimal::from(10_000),
            Currency::Iqd,
            date(2024, 1, 11),
        ))
        .await
        .unwrap_err();
    assert_eq!(err, not_found);

    let err = engine
        .record_payment(PaymentCmd::new(
            employee.id,
            Decimal::from(900_000),
            date(2024, 1, 31),
        ))
        .await
        .unwrap_err();
    assert_eq!(err, not_found);
    assert!(engine.list_payments(employee.id).await.unwrap().is_empty());

    let err = engine
        .add_adjustment(AdjustmentCmd::new(
            employee.id,
            AdjustmentKind::Bonus,
            Decimal::from(10_000),
            Currency::Iqd,
            date(2024, 1, 11),
        ))
        .await
        .unwrap_err();
    assert_eq!(err, not_found);
}

#[tokio::test]
async fn unknown_employee_is_not_found() {
    let (engine, _db) = engine_with_db().await;
    let ghost = Uuid::new_v4();

    let err = engine
        .compute_balance(ghost, date(2024, 1, 11))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::EmployeeNotFound(ghost.to_string()));
}

#[tokio::test]
async fn rate_rows_replace_within_a_day() {
    let (engine, _db) = engine_with_db().await;
    engine
        .set_dollar_rate(date(2024, 1, 1), Decimal::from(1450), Some("admin"))
        .await
        .unwrap();
    engine
        .set_dollar_rate(date(2024, 1, 1), Decimal::from(1460), Some("admin"))
        .await
        .unwrap();
    engine
        .set_dollar_rate(date(2023, 12, 20), Decimal::from(1440), None)
        .await
        .unwrap();

    let rates = engine.list_dollar_rates().await.unwrap();
    assert_eq!(rates.len(), 2);
    assert_eq!(rates[0].date, date(2024, 1, 1));
    assert_eq!(rates[0].rate, Decimal::from(1460));
    assert_eq!(rates[0].entered_by.as_deref(), Some("admin"));
    assert_eq!(rates[1].rate, Decimal::from(1440));
}

#[tokio::test]
async fn rejects_nonpositive_amounts_and_cycles() {
    let (engine, _db) = engine_with_db().await;
    let employee = standard_employee(&engine).await;

    let err = engine
        .create_employee(CreateEmployeeCmd::new(
            "Zero",
            Decimal::ZERO,
            Currency::Iqd,
            30,
            date(2024, 1, 1),
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .create_employee(CreateEmployeeCmd::new(
            "Cycleless",
            Decimal::from(900_000),
            Currency::Iqd,
            0,
            date(2024, 1, 1),
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::CycleMisconfigured(_)));

    let err = engine
        .record_withdrawal(WithdrawalCmd::new(
            employee.id,
            Decimal::from(-5),
            Currency::Iqd,
            date(2024, 1, 11),
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .record_payment(PaymentCmd::new(employee.id, Decimal::ZERO, date(2024, 1, 31)))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .add_adjustment(AdjustmentCmd::new(
            employee.id,
            AdjustmentKind::Penalty,
            Decimal::ZERO,
            Currency::Iqd,
            date(2024, 1, 11),
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
}

#[tokio::test]
async fn stored_conversions_survive_reconnect() {
    let (engine, db, url, path) = engine_with_file_db().await;
    engine
        .set_dollar_rate(date(2024, 1, 1), Decimal::from(1450), None)
        .await
        .unwrap();
    let employee = engine
        .create_employee(CreateEmployeeCmd::new(
            "Omar",
            Decimal::from(500),
            Currency::Usd,
            30,
            date(2024, 1, 1),
        ))
        .await
        .unwrap();
    engine
        .record_withdrawal(WithdrawalCmd::new(
            employee.id,
            Decimal::from(100),
            Currency::Usd,
            date(2024, 1, 10),
        ))
        .await
        .unwrap();

    drop(engine);
    drop(db);

    let db2 = Database::connect(&url).await.unwrap();
    let engine2 = Engine::builder().database(db2.clone()).build().await.unwrap();

    let reloaded = engine2.employee(employee.id).await.unwrap();
    assert_eq!(reloaded.salary.currency, Currency::Usd);
    assert_eq!(reloaded.converted_salary, Decimal::from(725_000));

    let withdrawals = engine2.list_withdrawals(employee.id).await.unwrap();
    assert_eq!(withdrawals.len(), 1);
    assert_eq!(withdrawals[0].converted.value, Decimal::from(145_000));
    assert_eq!(withdrawals[0].converted.source_rate, Some(Decimal::from(1450)));

    drop(db2);
    let _ = std::fs::remove_file(path);
}
