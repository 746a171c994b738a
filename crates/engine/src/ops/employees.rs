use sea_orm::{DatabaseTransaction, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    CreateEmployeeCmd, Employee, EngineError, MonetaryAmount, ResultEngine, UpdateEmployeeCmd,
    employees,
    util::{normalize_employee_name, require_positive},
};

use super::{Engine, with_tx};

impl Engine {
    /// Creates an employee.
    ///
    /// A USD salary is converted at the rate in force on `rate_date`
    /// (defaulting to the start date) and the dinar value is stored on the
    /// row, so later rate changes never move an existing salary.
    pub async fn create_employee(&self, cmd: CreateEmployeeCmd) -> ResultEngine<Employee> {
        let name = normalize_employee_name(&cmd.name)?;
        require_positive(cmd.amount, "salary")?;
        with_tx!(self, |db_tx| {
            let rates = self.load_rate_table(&db_tx).await?;
            let salary = MonetaryAmount::new(cmd.amount, cmd.currency);
            let converted = rates.convert(salary, cmd.rate_date.unwrap_or(cmd.start_date))?;

            let employee = Employee::new(
                name,
                salary,
                converted.value,
                cmd.cycle_days,
                cmd.start_date,
            )?;
            employees::ActiveModel::from(&employee).insert(&db_tx).await?;
            Ok(employee)
        })
    }

    /// Updates an employee; unset fields keep their stored value.
    ///
    /// When the amount, currency or rate date change, the dinar salary is
    /// re-fixed from the resulting values. Deactivation goes through here
    /// (`is_active = false`); history stays readable afterwards.
    pub async fn update_employee(&self, cmd: UpdateEmployeeCmd) -> ResultEngine<Employee> {
        with_tx!(self, |db_tx| {
            let mut employee = self.require_employee(&db_tx, cmd.employee_id).await?;

            if let Some(name) = cmd.name.as_deref() {
                employee.name = normalize_employee_name(name)?;
            }
            if let Some(cycle_days) = cmd.cycle_days {
                if cycle_days <= 0 {
                    return Err(EngineError::CycleMisconfigured(format!(
                        "cycle_days must be > 0, got {cycle_days}"
                    )));
                }
                employee.cycle_days = cycle_days;
            }
            if let Some(start_date) = cmd.start_date {
                employee.start_date = start_date;
            }
            if let Some(is_active) = cmd.is_active {
                employee.is_active = is_active;
            }

            if cmd.amount.is_some() || cmd.currency.is_some() || cmd.rate_date.is_some() {
                let amount = cmd.amount.unwrap_or(employee.salary.amount);
                require_positive(amount, "salary")?;
                let salary =
                    MonetaryAmount::new(amount, cmd.currency.unwrap_or(employee.salary.currency));

                let rates = self.load_rate_table(&db_tx).await?;
                let converted =
                    rates.convert(salary, cmd.rate_date.unwrap_or(employee.start_date))?;
                employee.salary = salary;
                employee.converted_salary = converted.value;
            }

            employees::ActiveModel::from(&employee).update(&db_tx).await?;
            Ok(employee)
        })
    }

    /// Returns an employee by id, active or not.
    pub async fn employee(&self, employee_id: Uuid) -> ResultEngine<Employee> {
        with_tx!(self, |db_tx| {
            self.require_employee(&db_tx, employee_id).await
        })
    }

    /// All employees, ordered by name.
    pub async fn list_employees(&self) -> ResultEngine<Vec<Employee>> {
        with_tx!(self, |db_tx| {
            let models = employees::Entity::find()
                .order_by_asc(employees::Column::Name)
                .all(&db_tx)
                .await?;
            models.into_iter().map(Employee::try_from).collect()
        })
    }

    pub(crate) async fn require_employee(
        &self,
        db_tx: &DatabaseTransaction,
        employee_id: Uuid,
    ) -> ResultEngine<Employee> {
        let model = employees::Entity::find_by_id(employee_id.to_string())
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::EmployeeNotFound(employee_id.to_string()))?;
        Employee::try_from(model)
    }

    /// Like [`Engine::require_employee`] but rejects inactive employees.
    /// Write paths use this; reads stay available for inactive staff.
    pub(crate) async fn require_active_employee(
        &self,
        db_tx: &DatabaseTransaction,
        employee_id: Uuid,
    ) -> ResultEngine<Employee> {
        let employee = self.require_employee(db_tx, employee_id).await?;
        if !employee.is_active {
            return Err(EngineError::EmployeeNotFound(employee_id.to_string()));
        }
        Ok(employee)
    }
}
