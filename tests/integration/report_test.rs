//! Report step integration tests.
//!
//! Runs the sales report against fixture databases and checks each step's
//! rows and rendered output.

use super::fixtures::{create_database, open_runner, rows_for, Fixture, EXPECTED_TOTAL_PRICE};
use pretty_assertions::assert_eq;
use sales_report::db::{QueryResult, Value};
use sales_report::report::{sales_report, RunSummary};
use tempfile::tempdir;

fn text(value: &str) -> Value {
    Value::from(value)
}

fn column(result: &QueryResult, name: &str) -> Vec<Value> {
    result
        .column_values(name)
        .unwrap_or_else(|| panic!("missing column {name}"))
        .into_iter()
        .cloned()
        .collect()
}

#[tokio::test]
async fn test_employee_data_returns_every_row() {
    let dir = tempdir().unwrap();
    let config = create_database(dir.path(), Fixture::Populated).await;
    let mut runner = open_runner(&config).await;

    let result = rows_for(&mut runner, "Employee Data").await;
    assert_eq!(result.row_count, 8);
    assert_eq!(result.columns.len(), 4);

    runner.close().await.unwrap();
}

#[tokio::test]
async fn test_null_employee_fields_become_unknown() {
    let dir = tempdir().unwrap();
    let config = create_database(dir.path(), Fixture::Populated).await;
    let mut runner = open_runner(&config).await;

    let first_five = rows_for(&mut runner, "First Five Columns").await;
    let names: Vec<&str> = first_five.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["employeeNumber", "lastName"]);
    assert_eq!(first_five.rows[4], vec![Value::Int(1102), text("Unknown")]);
    assert_eq!(first_five.rows[5], vec![text("Unknown"), text("Bow")]);

    let reversed = rows_for(&mut runner, "Five Reverse Columns").await;
    let names: Vec<&str> = reversed.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["lastName", "employeeNumber"]);
    assert_eq!(reversed.rows[0], vec![text("Murphy"), Value::Int(1002)]);
    assert_eq!(reversed.rows[4], vec![text("Unknown"), Value::Int(1102)]);

    let aliased = rows_for(&mut runner, "Aliased Columns").await;
    let names: Vec<&str> = aliased.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["lastName", "ID"]);
    assert_eq!(aliased.rows[4], vec![text("Unknown"), Value::Int(1102)]);
    assert_eq!(aliased.rows[5], vec![text("Bow"), Value::Null]);

    runner.close().await.unwrap();
}

#[tokio::test]
async fn test_executive_roles() {
    let dir = tempdir().unwrap();
    let config = create_database(dir.path(), Fixture::Populated).await;
    let mut runner = open_runner(&config).await;

    let result = rows_for(&mut runner, "Executive Roles").await;
    assert_eq!(
        column(&result, "role"),
        vec![
            text("Executive"),
            text("Executive"),
            text("Executive"),
            text("Not Executive"),
            text("Not Executive"),
            text("Not Executive"),
            text("Not Executive"),
            text("Not Executive"),
        ]
    );

    runner.close().await.unwrap();
}

#[tokio::test]
async fn test_name_length_keeps_null() {
    let dir = tempdir().unwrap();
    let config = create_database(dir.path(), Fixture::Populated).await;
    let mut runner = open_runner(&config).await;

    let result = rows_for(&mut runner, "Name Length").await;
    let lengths = column(&result, "name_length");
    assert_eq!(lengths[0], Value::Int(6));
    assert_eq!(lengths[1], Value::Int(9));
    assert_eq!(lengths[4], Value::Null);
    assert_eq!(lengths[5], Value::Int(3));

    runner.close().await.unwrap();
}

#[tokio::test]
async fn test_short_job_title() {
    let dir = tempdir().unwrap();
    let config = create_database(dir.path(), Fixture::Populated).await;
    let mut runner = open_runner(&config).await;

    let result = rows_for(&mut runner, "Short Job Title").await;
    assert_eq!(
        column(&result, "short_title"),
        vec![
            text("Pr"),
            text("VP"),
            text("VP"),
            text("Sa"),
            text("Sa"),
            text("S"),
            text("NA"),
            text(""),
        ]
    );
    // The source column is shown as-is.
    assert_eq!(column(&result, "jobTitle")[6], Value::Null);

    runner.close().await.unwrap();
}

#[tokio::test]
async fn test_total_price() {
    let dir = tempdir().unwrap();
    let config = create_database(dir.path(), Fixture::Populated).await;
    let mut runner = open_runner(&config).await;

    let result = rows_for(&mut runner, "Total Price").await;
    assert_eq!(result.row_count, 1);
    match &result.rows[0][0] {
        Value::Float(total) => assert!((total - EXPECTED_TOTAL_PRICE).abs() < 1e-9),
        other => panic!("Expected Float total, got {:?}", other),
    }

    runner.close().await.unwrap();
}

#[tokio::test]
async fn test_order_date_breakdown() {
    let dir = tempdir().unwrap();
    let config = create_database(dir.path(), Fixture::Populated).await;
    let mut runner = open_runner(&config).await;

    let result = rows_for(&mut runner, "Order Date Breakdown").await;
    let names: Vec<&str> = result.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["orderDate", "day", "month", "year"]);

    assert_eq!(
        result.rows[0],
        vec![text("2003-01-15"), text("15"), text("01"), text("2003")]
    );
    assert_eq!(
        result.rows[2],
        vec![Value::Null, text("Unknown"), text("Unknown"), text("Unknown")]
    );
    assert_eq!(
        result.rows[3],
        vec![
            text("not a date"),
            text("Unknown"),
            text("Unknown"),
            text("Unknown")
        ]
    );

    runner.close().await.unwrap();
}

#[tokio::test]
async fn test_full_run_output() {
    let dir = tempdir().unwrap();
    let config = create_database(dir.path(), Fixture::Populated).await;
    let mut runner = open_runner(&config).await;

    let mut out = Vec::new();
    let summary = runner.run(sales_report(), &mut out).await.unwrap();
    runner.close().await.unwrap();

    assert_eq!(summary, RunSummary { succeeded: 10, failed: 0 });

    let output = String::from_utf8(out).unwrap();
    let headers: Vec<&str> = output
        .lines()
        .filter(|line| line.starts_with('-') && line.chars().any(|c| c != '-'))
        .filter(|line| !line.contains("End "))
        .collect();
    assert_eq!(
        headers,
        vec![
            "---------------------Employee Data---------------------",
            "----------First Five Columns----------",
            "----------Five Reverse Columns----------",
            "----------Aliased Columns----------",
            "----------Executive Roles----------",
            "----------Name Length----------",
            "----------Short Job Title----------",
            "------------------Order Details Data------------------",
            "----------Total Price----------",
            "----------Order Date Breakdown----------",
        ]
    );
    assert!(output.contains("-------------------End Employee Data-------------------"));
    assert!(output.contains("│ 13879.56    │"));
    assert!(!output.contains("Warning"));
    assert!(!output.contains("Error"));
}

#[tokio::test]
async fn test_empty_tables() {
    let dir = tempdir().unwrap();
    let config = create_database(dir.path(), Fixture::Empty).await;
    let mut runner = open_runner(&config).await;

    let employees = rows_for(&mut runner, "Employee Data").await;
    assert!(employees.is_empty());
    assert_eq!(employees.columns.len(), 4);

    let total = rows_for(&mut runner, "Total Price").await;
    assert_eq!(total.rows, vec![vec![Value::Null]]);

    let mut out = Vec::new();
    let summary = runner.run(sales_report(), &mut out).await.unwrap();
    runner.close().await.unwrap();

    assert_eq!(summary.failed, 0);
    let output = String::from_utf8(out).unwrap();
    assert!(output.starts_with("Warning: Employees table is empty.\n\n"));
    assert!(output.contains("Warning: Order details table is empty.\n"));
    assert_eq!(output.matches("Warning:").count(), 2);
}

#[tokio::test]
async fn test_missing_table_does_not_stop_the_run() {
    let dir = tempdir().unwrap();
    let config = create_database(dir.path(), Fixture::EmployeesOnly).await;
    let mut runner = open_runner(&config).await;

    let mut out = Vec::new();
    let summary = runner.run(sales_report(), &mut out).await.unwrap();

    assert_eq!(summary, RunSummary { succeeded: 7, failed: 3 });

    let output = String::from_utf8(out).unwrap();
    let errors: Vec<&str> = output
        .lines()
        .filter(|line| line.starts_with("Error "))
        .collect();
    assert_eq!(
        errors,
        vec![
            "Error fetching order details: Query error: no such table: orderDetails",
            "Error calculating total price: Query error: no such table: orderDetails",
            "Error processing order dates: Query error: no such table: orderDetails",
        ]
    );
    assert!(output.contains("----------Short Job Title----------"));

    // The connection is still closed cleanly after failed steps.
    runner.close().await.unwrap();
}
