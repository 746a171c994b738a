use sea_orm::{DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Adjustment, AdjustmentCmd, EngineError, MonetaryAmount, ResultEngine, UpdateAdjustmentCmd,
    adjustments,
    util::{normalize_optional_text, require_positive},
};

use super::{Engine, with_tx};

impl Engine {
    /// Records a bonus or penalty for an active employee.
    ///
    /// The entry is converted at the rate in force on its own date and the
    /// dinar value is stored with it.
    pub async fn add_adjustment(&self, cmd: AdjustmentCmd) -> ResultEngine<Adjustment> {
        require_positive(cmd.amount, "adjustment amount")?;
        with_tx!(self, |db_tx| {
            self.require_active_employee(&db_tx, cmd.employee_id).await?;

            let rates = self.load_rate_table(&db_tx).await?;
            let amount = MonetaryAmount::new(cmd.amount, cmd.currency);
            let converted = rates.convert(amount, cmd.date)?;

            let adjustment = Adjustment::new(
                cmd.employee_id,
                cmd.kind,
                amount,
                converted,
                cmd.date,
                normalize_optional_text(cmd.description.as_deref()),
            )?;
            adjustments::ActiveModel::from(&adjustment)
                .insert(&db_tx)
                .await?;
            Ok(adjustment)
        })
    }

    /// Edits an adjustment; unset fields keep their stored value.
    ///
    /// The converted value is re-fixed from the resulting amount, currency
    /// and date, so an edit behaves like recording the entry afresh on its
    /// date.
    pub async fn update_adjustment(&self, cmd: UpdateAdjustmentCmd) -> ResultEngine<Adjustment> {
        with_tx!(self, |db_tx| {
            let mut adjustment = self.require_adjustment(&db_tx, cmd.adjustment_id).await?;

            if let Some(kind) = cmd.kind {
                adjustment.kind = kind;
            }
            if let Some(date) = cmd.date {
                adjustment.date = date;
            }
            if let Some(description) = cmd.description.as_deref() {
                adjustment.description = normalize_optional_text(Some(description));
            }
            let amount = cmd.amount.unwrap_or(adjustment.amount.amount);
            require_positive(amount, "adjustment amount")?;
            adjustment.amount =
                MonetaryAmount::new(amount, cmd.currency.unwrap_or(adjustment.amount.currency));

            let rates = self.load_rate_table(&db_tx).await?;
            adjustment.converted = rates.convert(adjustment.amount, adjustment.date)?;

            adjustments::ActiveModel::from(&adjustment)
                .update(&db_tx)
                .await?;
            Ok(adjustment)
        })
    }

    /// Deletes an adjustment outright.
    pub async fn delete_adjustment(&self, adjustment_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let deleted = adjustments::Entity::delete_by_id(adjustment_id.to_string())
                .exec(&db_tx)
                .await?;
            if deleted.rows_affected == 0 {
                return Err(EngineError::KeyNotFound(
                    "adjustment not exists".to_string(),
                ));
            }
            Ok(())
        })
    }

    /// All adjustments for an employee, newest first.
    pub async fn list_adjustments(&self, employee_id: Uuid) -> ResultEngine<Vec<Adjustment>> {
        with_tx!(self, |db_tx| {
            self.require_employee(&db_tx, employee_id).await?;
            self.load_adjustments(&db_tx, employee_id).await
        })
    }

    pub(crate) async fn load_adjustments(
        &self,
        db_tx: &DatabaseTransaction,
        employee_id: Uuid,
    ) -> ResultEngine<Vec<Adjustment>> {
        let models = adjustments::Entity::find()
            .filter(adjustments::Column::EmployeeId.eq(employee_id.to_string()))
            .order_by_desc(adjustments::Column::Date)
            .all(db_tx)
            .await?;
        models.into_iter().map(Adjustment::try_from).collect()
    }

    async fn require_adjustment(
        &self,
        db_tx: &DatabaseTransaction,
        adjustment_id: Uuid,
    ) -> ResultEngine<Adjustment> {
        let model = adjustments::Entity::find_by_id(adjustment_id.to_string())
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("adjustment not exists".to_string()))?;
        Adjustment::try_from(model)
    }
}
