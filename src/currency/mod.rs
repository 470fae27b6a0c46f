//! Presentation helpers for wallet amounts and expense dates.

use chrono::NaiveDate;

const GROUPING_SEPARATOR: char = ',';
const PRECISION: usize = 2;

/// Formats `amount` as `$1,234.50`, prefixing a minus sign for negative values.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let body = format_number(amount.abs());
    if amount < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{}{}", symbol, body)
    } else {
        format!("{}{}", symbol, body)
    }
}

fn format_number(value: f64) -> String {
    let body = format!("{:.*}", PRECISION, value);
    match body.find('.') {
        Some(pos) => format!("{}{}", group_digits(&body[..pos]), &body[pos..]),
        None => group_digits(&body),
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, GROUPING_SEPARATOR);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// Long form used by the transaction list, e.g. `January 5, 2024`.
pub fn format_expense_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Formats a raw expense date, echoing it unchanged when it is not `YYYY-MM-DD`.
pub fn format_expense_date_str(raw: &str) -> String {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map(format_expense_date)
        .unwrap_or_else(|_| raw.to_string())
}
