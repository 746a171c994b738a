use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{DatabaseTransaction, QueryOrder, TransactionTrait, prelude::*};

use crate::{DollarRate, RateTable, ResultEngine, rates, util::normalize_optional_text};

use super::{Engine, with_tx};

impl Engine {
    /// Sets the dollar rate for a day, replacing any row already there.
    /// One row per calendar day; the latest row on or before a date wins at
    /// conversion time.
    pub async fn set_dollar_rate(
        &self,
        date: NaiveDate,
        rate: Decimal,
        entered_by: Option<&str>,
    ) -> ResultEngine<DollarRate> {
        let row = DollarRate::new(date, rate, normalize_optional_text(entered_by))?;
        with_tx!(self, |db_tx| {
            let active = rates::ActiveModel::from(&row);
            if rates::Entity::find_by_id(date).one(&db_tx).await?.is_some() {
                active.update(&db_tx).await?;
            } else {
                active.insert(&db_tx).await?;
            }
            Ok(row)
        })
    }

    /// All rate rows, newest first.
    pub async fn list_dollar_rates(&self) -> ResultEngine<Vec<DollarRate>> {
        with_tx!(self, |db_tx| {
            let models = rates::Entity::find()
                .order_by_desc(rates::Column::Date)
                .all(&db_tx)
                .await?;
            Ok(models.into_iter().map(DollarRate::from).collect())
        })
    }

    pub(crate) async fn load_rate_table(
        &self,
        db_tx: &DatabaseTransaction,
    ) -> ResultEngine<RateTable> {
        let models = rates::Entity::find().all(db_tx).await?;
        Ok(RateTable::new(
            models.into_iter().map(DollarRate::from).collect(),
        ))
    }
}
