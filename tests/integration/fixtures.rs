//! Sample sales databases for the integration tests.

use std::path::{Path, PathBuf};

use sales_report::config::DatabaseConfig;
use sales_report::db::{self, DatabaseClient, QueryResult};
use sales_report::report::{sales_report, ReportRunner, Step, StepOutcome};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection};

const EMPLOYEES_TABLE: &str = "CREATE TABLE employees (
    employeeNumber INTEGER,
    lastName TEXT,
    firstName TEXT,
    jobTitle TEXT
)";

const ORDER_DETAILS_TABLE: &str = "CREATE TABLE orderDetails (
    orderNumber INTEGER,
    productCode TEXT,
    quantityOrdered INTEGER,
    priceEach REAL,
    orderDate TEXT
)";

/// Employees covering every NULL and job-title edge case.
const EMPLOYEE_ROWS: &str = "INSERT INTO employees VALUES
    (1002, 'Murphy', 'Diane', 'President'),
    (1056, 'Patterson', 'Mary', 'VP Sales'),
    (1076, 'Firrelli', 'Jeff', 'VP Marketing'),
    (1088, 'Patterson', 'William', 'Sales Manager (APAC)'),
    (1102, NULL, 'Gerard', 'Sales Rep'),
    (NULL, 'Bow', 'Anthony', 'S'),
    (1165, 'Jennings', 'Leslie', NULL),
    (1166, 'Thompson', 'Leslie', '')";

/// Order lines with a valid, a missing and an unparseable date.
const ORDER_DETAIL_ROWS: &str = "INSERT INTO orderDetails VALUES
    (10100, 'S18_1749', 30, 136.00, '2003-01-15'),
    (10100, 'S18_2248', 50, 55.09, '2003-01-06'),
    (10101, 'S18_2325', 25, 108.06, NULL),
    (10102, 'S18_2795', 26, 167.06, 'not a date')";

/// Sum of priceEach * quantityOrdered over `ORDER_DETAIL_ROWS`.
pub const EXPECTED_TOTAL_PRICE: f64 = 13879.56;

/// Which tables and rows a fixture database gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixture {
    /// Both tables with sample rows.
    Populated,
    /// Both tables, no rows.
    Empty,
    /// Populated `employees`, no `orderDetails` table.
    EmployeesOnly,
}

/// Creates a fixture database at `dir/data.sqlite` and returns its config.
pub async fn create_database(dir: &Path, fixture: Fixture) -> DatabaseConfig {
    let path: PathBuf = dir.join("data.sqlite");
    let mut conn = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true)
        .connect()
        .await
        .expect("create fixture database");

    let mut statements = vec![EMPLOYEES_TABLE];
    match fixture {
        Fixture::Populated => {
            statements.extend([ORDER_DETAILS_TABLE, EMPLOYEE_ROWS, ORDER_DETAIL_ROWS])
        }
        Fixture::Empty => statements.push(ORDER_DETAILS_TABLE),
        Fixture::EmployeesOnly => statements.push(EMPLOYEE_ROWS),
    }

    for sql in statements {
        sqlx::query(sql)
            .execute(&mut conn)
            .await
            .expect("seed fixture database");
    }
    conn.close().await.expect("close fixture database");

    DatabaseConfig::new(path)
}

/// Opens a runner over the fixture database.
pub async fn open_runner(config: &DatabaseConfig) -> ReportRunner {
    let client: Box<dyn DatabaseClient> = db::connect(config).await.expect("connect");
    ReportRunner::new(client)
}

/// Looks up a report step by label.
pub fn step(label: &str) -> &'static Step {
    sales_report()
        .iter()
        .find(|s| s.label == label)
        .unwrap_or_else(|| panic!("no step labeled {label}"))
}

/// Runs one step and returns its rows, panicking on failure.
pub async fn rows_for(runner: &mut ReportRunner, label: &str) -> QueryResult {
    match runner.execute(step(label)).await.outcome {
        StepOutcome::Rows(result) => result,
        StepOutcome::Failed(e) => panic!("step {label} failed: {e}"),
    }
}
