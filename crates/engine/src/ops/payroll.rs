use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{
    EmployeeBalance, EngineError, MonetaryAmount, PaymentCmd, PaymentDue, ResultEngine,
    SalaryPayment, SalaryWithdrawal, WithdrawalCmd, adjustments::net_adjustment, balance,
    employees, payments,
    util::{normalize_optional_text, require_positive},
    withdrawals,
};

use super::{Engine, with_tx};

impl Engine {
    /// Computes the withdrawal headroom for an employee on `on`.
    ///
    /// Read-only. With unchanged ledgers, repeated calls return identical
    /// figures; inactive employees stay readable.
    pub async fn compute_balance(
        &self,
        employee_id: Uuid,
        on: NaiveDate,
    ) -> ResultEngine<EmployeeBalance> {
        with_tx!(self, |db_tx| {
            let employee = self.require_employee(&db_tx, employee_id).await?;
            let cycle = employee.cycle();
            let withdrawn = self
                .withdrawn_in_period(&db_tx, employee_id, cycle.period_start)
                .await?;
            balance::available_balance(employee.converted_salary, &cycle, on, withdrawn)
        })
    }

    /// Due state on `on`, plus the amount a payment form should pre-fill.
    ///
    /// The suggestion is net salary (stored adjustments included) minus the
    /// period's withdrawals. [`Engine::record_payment`] accepts whatever the
    /// caller decides and never re-checks it against this figure.
    pub async fn payment_due(&self, employee_id: Uuid, on: NaiveDate) -> ResultEngine<PaymentDue> {
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());
        with_tx!(self, |db_tx| {
            let employee = self.require_employee(&db_tx, employee_id).await?;
            let cycle = employee.cycle();
            let withdrawn = self
                .withdrawn_in_period(&db_tx, employee_id, cycle.period_start)
                .await?;
            let entries = self.load_adjustments(&db_tx, employee_id).await?;
            let net_salary = employee
                .converted_salary
                .checked_add(net_adjustment(&entries)?)
                .ok_or_else(overflow)?;
            let suggested = net_salary.checked_sub(withdrawn).ok_or_else(overflow)?;

            Ok(PaymentDue {
                is_due: cycle.is_due(on),
                elapsed_days: cycle.elapsed_days(on),
                days_remaining: cycle.days_remaining(on),
                next_due_date: cycle.next_due_date(),
                net_salary,
                withdrawn,
                suggested_amount: suggested,
            })
        })
    }

    /// Records a cash withdrawal against the running cycle.
    ///
    /// The amount is converted at the withdrawal date and appended to the
    /// ledger. No cap is enforced; the available balance is informational
    /// and a trusted operator may exceed it.
    pub async fn record_withdrawal(&self, cmd: WithdrawalCmd) -> ResultEngine<SalaryWithdrawal> {
        require_positive(cmd.amount, "withdrawal amount")?;
        with_tx!(self, |db_tx| {
            self.require_active_employee(&db_tx, cmd.employee_id).await?;

            let rates = self.load_rate_table(&db_tx).await?;
            let amount = MonetaryAmount::new(cmd.amount, cmd.currency);
            let converted = rates.convert(amount, cmd.withdrawal_date)?;

            let withdrawal = SalaryWithdrawal::new(
                cmd.employee_id,
                amount,
                converted,
                cmd.withdrawal_date,
                normalize_optional_text(cmd.notes.as_deref()),
            )?;
            withdrawals::ActiveModel::from(&withdrawal)
                .insert(&db_tx)
                .await?;
            Ok(withdrawal)
        })
    }

    /// Records a salary payment and rolls the cycle forward.
    ///
    /// The ledger row and the employee's last-payment summary
    /// (`last_paid_date`, `is_paid`, `paid_amount`) commit together or not
    /// at all. The new `last_paid_date` becomes the next cycle's baseline.
    pub async fn record_payment(&self, cmd: PaymentCmd) -> ResultEngine<SalaryPayment> {
        require_positive(cmd.amount, "payment amount")?;
        with_tx!(self, |db_tx| {
            let employee = self.require_active_employee(&db_tx, cmd.employee_id).await?;

            let payment = SalaryPayment::new(
                cmd.employee_id,
                cmd.amount,
                cmd.payment_date,
                normalize_optional_text(cmd.notes.as_deref()),
            )?;
            payments::ActiveModel::from(&payment).insert(&db_tx).await?;

            let summary = employees::ActiveModel {
                id: ActiveValue::Set(employee.id.to_string()),
                last_paid_date: ActiveValue::Set(Some(cmd.payment_date)),
                is_paid: ActiveValue::Set(true),
                paid_amount: ActiveValue::Set(Some(cmd.amount)),
                ..Default::default()
            };
            summary.update(&db_tx).await?;

            Ok(payment)
        })
    }

    /// All payments for an employee, newest first.
    pub async fn list_payments(&self, employee_id: Uuid) -> ResultEngine<Vec<SalaryPayment>> {
        with_tx!(self, |db_tx| {
            self.require_employee(&db_tx, employee_id).await?;
            let models = payments::Entity::find()
                .filter(payments::Column::EmployeeId.eq(employee_id.to_string()))
                .order_by_desc(payments::Column::PaymentDate)
                .all(&db_tx)
                .await?;
            models.into_iter().map(SalaryPayment::try_from).collect()
        })
    }

    /// All withdrawals for an employee, newest first.
    pub async fn list_withdrawals(
        &self,
        employee_id: Uuid,
    ) -> ResultEngine<Vec<SalaryWithdrawal>> {
        with_tx!(self, |db_tx| {
            self.require_employee(&db_tx, employee_id).await?;
            let models = withdrawals::Entity::find()
                .filter(withdrawals::Column::EmployeeId.eq(employee_id.to_string()))
                .order_by_desc(withdrawals::Column::WithdrawalDate)
                .all(&db_tx)
                .await?;
            models
                .into_iter()
                .map(SalaryWithdrawal::try_from)
                .collect()
        })
    }

    /// Sum of converted withdrawal values dated on or after `period_start`.
    async fn withdrawn_in_period(
        &self,
        db_tx: &DatabaseTransaction,
        employee_id: Uuid,
        period_start: NaiveDate,
    ) -> ResultEngine<Decimal> {
        let models = withdrawals::Entity::find()
            .filter(withdrawals::Column::EmployeeId.eq(employee_id.to_string()))
            .filter(withdrawals::Column::WithdrawalDate.gte(period_start))
            .all(db_tx)
            .await?;
        models
            .iter()
            .map(|m| m.converted_amount)
            .try_fold(Decimal::ZERO, |total, value| {
                total.checked_add(value).ok_or_else(|| {
                    EngineError::InvalidAmount("withdrawn total too large".to_string())
                })
            })
    }
}
