//! The fixed sales report.

use super::{Banner, Fallback, Step};

/// Text substituted for missing employee and date fields.
pub const NULL_FALLBACK: &str = "Unknown";

/// Text substituted for a missing short job title.
const SHORT_TITLE_FALLBACK: &str = "NA";

const STEPS: [Step; 10] = [
    Step {
        label: "Employee Data",
        sql: "SELECT * FROM employees",
        banner: Banner::Framed { width: 55 },
        fallbacks: &[],
        empty_warning: Some("Warning: Employees table is empty."),
        failure_context: "fetching employees data",
    },
    Step {
        label: "First Five Columns",
        sql: "SELECT employeeNumber, lastName FROM employees",
        banner: Banner::Section,
        fallbacks: &[
            Fallback::new("employeeNumber", NULL_FALLBACK),
            Fallback::new("lastName", NULL_FALLBACK),
        ],
        empty_warning: None,
        failure_context: "fetching first five employees",
    },
    Step {
        label: "Five Reverse Columns",
        sql: "SELECT lastName, employeeNumber FROM employees",
        banner: Banner::Section,
        fallbacks: &[
            Fallback::new("lastName", NULL_FALLBACK),
            Fallback::new("employeeNumber", NULL_FALLBACK),
        ],
        empty_warning: None,
        failure_context: "fetching reversed employees",
    },
    Step {
        label: "Aliased Columns",
        sql: "SELECT lastName, employeeNumber AS ID FROM employees",
        banner: Banner::Section,
        fallbacks: &[Fallback::new("lastName", NULL_FALLBACK)],
        empty_warning: None,
        failure_context: "fetching aliased data",
    },
    Step {
        label: "Executive Roles",
        sql: "SELECT employeeNumber, jobTitle, \
              CASE WHEN jobTitle IN ('President', 'VP Sales', 'VP Marketing') \
              THEN 'Executive' ELSE 'Not Executive' END AS role \
              FROM employees",
        banner: Banner::Section,
        fallbacks: &[],
        empty_warning: None,
        failure_context: "classifying executives",
    },
    // LENGTH(NULL) stays NULL
    Step {
        label: "Name Length",
        sql: "SELECT lastName, LENGTH(lastName) AS name_length FROM employees",
        banner: Banner::Section,
        fallbacks: &[],
        empty_warning: None,
        failure_context: "fetching name length",
    },
    Step {
        label: "Short Job Title",
        sql: "SELECT jobTitle, SUBSTR(jobTitle, 1, 2) AS short_title FROM employees",
        banner: Banner::Section,
        fallbacks: &[Fallback::new("short_title", SHORT_TITLE_FALLBACK)],
        empty_warning: None,
        failure_context: "fetching short job titles",
    },
    Step {
        label: "Order Details Data",
        sql: "SELECT * FROM orderDetails",
        banner: Banner::Framed { width: 54 },
        fallbacks: &[],
        empty_warning: Some("Warning: Order details table is empty."),
        failure_context: "fetching order details",
    },
    // SUM over no rows is NULL, rendered as such
    Step {
        label: "Total Price",
        sql: "SELECT ROUND(SUM(priceEach * quantityOrdered), 2) AS total_price \
              FROM orderDetails",
        banner: Banner::Section,
        fallbacks: &[],
        empty_warning: None,
        failure_context: "calculating total price",
    },
    Step {
        label: "Order Date Breakdown",
        sql: "SELECT orderDate, \
              STRFTIME('%d', orderDate) AS day, \
              STRFTIME('%m', orderDate) AS month, \
              STRFTIME('%Y', orderDate) AS year \
              FROM orderDetails",
        banner: Banner::Section,
        fallbacks: &[
            Fallback::new("day", NULL_FALLBACK),
            Fallback::new("month", NULL_FALLBACK),
            Fallback::new("year", NULL_FALLBACK),
        ],
        empty_warning: None,
        failure_context: "processing order dates",
    },
];

/// Returns the sales report steps in execution order.
pub fn sales_report() -> &'static [Step] {
    &STEPS
}
