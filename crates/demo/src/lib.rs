//! Demonstration driver: builds the sample invoices and reports on them.

pub mod scenarios;

/// Environment variable overriding the number of the printed invoice.
pub const INVOICE_NUMBER_ENV: &str = "INVOICE_DEMO_NUMBER";

/// Number used for the printed invoice when [`INVOICE_NUMBER_ENV`] is unset.
pub const DEFAULT_INVOICE_NUMBER: i64 = 1000;

/// Resolves the printed invoice's number from the raw environment value.
/// A value that is not a whole number is ignored with a warning.
pub fn invoice_number_from(raw: Option<&str>) -> i64 {
    match raw.map(str::trim) {
        None => DEFAULT_INVOICE_NUMBER,
        Some(value) => value.parse().unwrap_or_else(|_| {
            tracing::warn!(
                value,
                "{INVOICE_NUMBER_ENV} is not a whole number; using {DEFAULT_INVOICE_NUMBER}"
            );
            DEFAULT_INVOICE_NUMBER
        }),
    }
}
