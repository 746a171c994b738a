use std::error::Error;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use engine::{Currency, Engine};
use migration::MigratorTrait;
use rust_decimal::Decimal;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "daftar_admin")]
#[command(about = "Admin utilities for Daftar (bootstrap employees/rates)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./daftar.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Employee(Employee),
    Rate(Rate),
}

#[derive(Args, Debug)]
struct Employee {
    #[command(subcommand)]
    command: EmployeeCommand,
}

#[derive(Subcommand, Debug)]
enum EmployeeCommand {
    Create(EmployeeCreateArgs),
    List,
}

#[derive(Args, Debug)]
struct EmployeeCreateArgs {
    #[arg(long)]
    name: String,
    /// Salary per cycle, e.g. `900000` or `500.50`.
    #[arg(long)]
    salary: Decimal,
    #[arg(long, default_value = "IQD")]
    currency: String,
    /// Days between scheduled payments.
    #[arg(long)]
    cycle_days: i32,
    /// First day of employment (YYYY-MM-DD).
    #[arg(long)]
    start_date: NaiveDate,
    /// Rate row converting a USD salary; defaults to the start date.
    #[arg(long)]
    rate_date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct Rate {
    #[command(subcommand)]
    command: RateCommand,
}

#[derive(Subcommand, Debug)]
enum RateCommand {
    Set(RateSetArgs),
    List,
}

#[derive(Args, Debug)]
struct RateSetArgs {
    /// Day the rate applies to (YYYY-MM-DD).
    #[arg(long)]
    date: NaiveDate,
    /// IQD per one USD.
    #[arg(long)]
    rate: Decimal,
    #[arg(long)]
    entered_by: Option<String>,
}

fn parse_currency(raw: &str) -> Result<Currency, String> {
    Currency::try_from(raw).map_err(|err| err.to_string())
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::Employee(Employee {
            command: EmployeeCommand::Create(args),
        }) => {
            let currency = match parse_currency(&args.currency) {
                Ok(v) => v,
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(2);
                }
            };

            let mut cmd = engine::CreateEmployeeCmd::new(
                args.name,
                args.salary,
                currency,
                args.cycle_days,
                args.start_date,
            );
            if let Some(rate_date) = args.rate_date {
                cmd = cmd.rate_date(rate_date);
            }

            let employee = engine.create_employee(cmd).await?;
            println!("created employee: {} ({})", employee.name, employee.id);
        }
        Command::Employee(Employee {
            command: EmployeeCommand::List,
        }) => {
            for employee in engine.list_employees().await? {
                let status = if employee.is_active {
                    "active"
                } else {
                    "inactive"
                };
                println!(
                    "{}  {}  {}  every {} days  {}",
                    employee.id, employee.name, employee.salary, employee.cycle_days, status,
                );
            }
        }
        Command::Rate(Rate {
            command: RateCommand::Set(args),
        }) => {
            let rate = engine
                .set_dollar_rate(args.date, args.rate, args.entered_by.as_deref())
                .await?;
            println!("set rate: {} = {} IQD per USD", rate.date, rate.rate);
        }
        Command::Rate(Rate {
            command: RateCommand::List,
        }) => {
            for rate in engine.list_dollar_rates().await? {
                println!("{}  {}", rate.date, rate.rate);
            }
        }
    }

    Ok(())
}
