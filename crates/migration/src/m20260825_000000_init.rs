//! Initial schema migration - creates all tables from scratch.
//!
//! It creates the complete schema for Daftar:
//!
//! - `employees`: staff roster with salary terms and last-payment summary
//! - `dollar_rates`: dated USD to IQD exchange rates
//! - `adjustments`: bonuses and penalties applied to an employee's net salary
//! - `salary_payments`: full salary settlements
//! - `salary_withdrawals`: mid-cycle advances against accrued salary

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Employees {
    Table,
    Id,
    Name,
    SalaryAmount,
    SalaryCurrency,
    ConvertedSalary,
    CycleDays,
    StartDate,
    IsActive,
    LastPaidDate,
    IsPaid,
    PaidAmount,
}

#[derive(Iden)]
enum DollarRates {
    Table,
    Date,
    Rate,
    EnteredBy,
}

#[derive(Iden)]
enum Adjustments {
    Table,
    Id,
    EmployeeId,
    Kind,
    Amount,
    Currency,
    ConvertedAmount,
    ExchangeRate,
    RateDate,
    Date,
    Description,
}

#[derive(Iden)]
enum SalaryPayments {
    Table,
    Id,
    EmployeeId,
    Amount,
    PaymentDate,
    Notes,
}

#[derive(Iden)]
enum SalaryWithdrawals {
    Table,
    Id,
    EmployeeId,
    Amount,
    Currency,
    ConvertedAmount,
    ExchangeRate,
    RateDate,
    WithdrawalDate,
    Notes,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Employees
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::Name).string().not_null())
                    .col(ColumnDef::new(Employees::SalaryAmount).decimal().not_null())
                    .col(
                        ColumnDef::new(Employees::SalaryCurrency)
                            .string()
                            .not_null()
                            .default("IQD"),
                    )
                    .col(
                        ColumnDef::new(Employees::ConvertedSalary)
                            .decimal()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Employees::CycleDays).integer().not_null())
                    .col(ColumnDef::new(Employees::StartDate).date().not_null())
                    .col(ColumnDef::new(Employees::IsActive).boolean().not_null())
                    .col(ColumnDef::new(Employees::LastPaidDate).date())
                    .col(ColumnDef::new(Employees::IsPaid).boolean().not_null())
                    .col(ColumnDef::new(Employees::PaidAmount).decimal())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Dollar Rates
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(DollarRates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DollarRates::Date)
                            .date()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DollarRates::Rate).decimal().not_null())
                    .col(ColumnDef::new(DollarRates::EnteredBy).string())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Adjustments
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Adjustments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Adjustments::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Adjustments::EmployeeId).string().not_null())
                    .col(ColumnDef::new(Adjustments::Kind).string().not_null())
                    .col(ColumnDef::new(Adjustments::Amount).decimal().not_null())
                    .col(ColumnDef::new(Adjustments::Currency).string().not_null())
                    .col(
                        ColumnDef::new(Adjustments::ConvertedAmount)
                            .decimal()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Adjustments::ExchangeRate).decimal())
                    .col(ColumnDef::new(Adjustments::RateDate).date())
                    .col(ColumnDef::new(Adjustments::Date).date().not_null())
                    .col(ColumnDef::new(Adjustments::Description).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-adjustments-employee_id")
                            .from(Adjustments::Table, Adjustments::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-adjustments-employee_id-date")
                    .table(Adjustments::Table)
                    .col(Adjustments::EmployeeId)
                    .col(Adjustments::Date)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Salary Payments
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(SalaryPayments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SalaryPayments::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SalaryPayments::EmployeeId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SalaryPayments::Amount).decimal().not_null())
                    .col(
                        ColumnDef::new(SalaryPayments::PaymentDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SalaryPayments::Notes).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-salary_payments-employee_id")
                            .from(SalaryPayments::Table, SalaryPayments::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-salary_payments-employee_id-payment_date")
                    .table(SalaryPayments::Table)
                    .col(SalaryPayments::EmployeeId)
                    .col(SalaryPayments::PaymentDate)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Salary Withdrawals
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(SalaryWithdrawals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SalaryWithdrawals::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SalaryWithdrawals::EmployeeId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SalaryWithdrawals::Amount)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SalaryWithdrawals::Currency)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SalaryWithdrawals::ConvertedAmount)
                            .decimal()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SalaryWithdrawals::ExchangeRate).decimal())
                    .col(ColumnDef::new(SalaryWithdrawals::RateDate).date())
                    .col(
                        ColumnDef::new(SalaryWithdrawals::WithdrawalDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SalaryWithdrawals::Notes).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-salary_withdrawals-employee_id")
                            .from(SalaryWithdrawals::Table, SalaryWithdrawals::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-salary_withdrawals-employee_id-withdrawal_date")
                    .table(SalaryWithdrawals::Table)
                    .col(SalaryWithdrawals::EmployeeId)
                    .col(SalaryWithdrawals::WithdrawalDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(SalaryWithdrawals::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SalaryPayments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Adjustments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DollarRates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;
        Ok(())
    }
}
