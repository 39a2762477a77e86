use std::collections::BTreeMap;

use chrono::NaiveDate;
use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::aggregate::{sum_amounts, GroupTotal};
use crate::fmt::{date, money};
use crate::models::Record;
use crate::reports::ComparisonRow;

// ---------------------------------------------------------------------------
// Formatters (pure functions returning String)
// ---------------------------------------------------------------------------

pub fn format_accounts(accounts: &BTreeMap<String, f64>) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Account", "Total"]);
    for (name, total) in accounts {
        table.add_row(vec![Cell::new(name), Cell::new(money(*total))]);
    }
    format!("{}\n{table}", "Accounts".bold())
}

/// One row per group plus a grand total, in the order given.
pub fn format_group_totals(title: &str, totals: &[GroupTotal]) -> String {
    let mut table = Table::new();
    table.set_header(vec![title, "Total"]);
    for t in totals {
        table.add_row(vec![Cell::new(&t.name), Cell::new(money(t.total))]);
    }
    let grand: f64 = totals.iter().map(|t| t.total).sum();
    table.add_row(vec![Cell::new("Total".bold()), Cell::new(money(grand))]);
    table.to_string()
}

pub fn format_transactions(title: &str, records: &[&Record]) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Date", "Description", "Category", "Account", "Amount"]);
    for r in records {
        table.add_row(vec![
            Cell::new(date(r.date)),
            Cell::new(&r.description),
            Cell::new(&r.category),
            Cell::new(&r.account_name),
            Cell::new(money(r.amount)),
        ]);
    }
    format!("{}\n{table}", title.bold())
}

pub fn format_transaction_totals(title: &str, records: &[&Record]) -> String {
    format!(
        "{title} total: {} ({} transactions)",
        money(sum_amounts(records.iter().copied())),
        records.len()
    )
}

pub fn format_comparison(rows: &[ComparisonRow]) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Category", "Previous", "Current", "Change"]);
    for row in rows {
        let change = row.change();
        // Spending going up is bad news.
        let change_str = if change > 0.0 {
            money(change).red().to_string()
        } else if change < 0.0 {
            money(change).green().to_string()
        } else {
            money(change)
        };
        table.add_row(vec![
            Cell::new(&row.category),
            Cell::new(money(row.previous)),
            Cell::new(money(row.current)),
            Cell::new(change_str),
        ]);
    }
    let previous: f64 = rows.iter().map(|r| r.previous).sum();
    let current: f64 = rows.iter().map(|r| r.current).sum();
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(money(previous)),
        Cell::new(money(current)),
        Cell::new(money(current - previous)),
    ]);
    format!("{}\n{table}", "Previous vs Current Month".bold())
}

pub fn format_daily(days: &BTreeMap<NaiveDate, f64>) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Date", "Day", "Spent"]);
    for (day, total) in days {
        table.add_row(vec![
            Cell::new(date(*day)),
            Cell::new(day.format("%a")),
            Cell::new(money(*total)),
        ]);
    }
    let total: f64 = days.values().sum();
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(""),
        Cell::new(money(total)),
    ]);
    format!("{}\n{table}", "Daily Spending".bold())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::record;

    #[test]
    fn test_format_accounts() {
        let mut accounts = BTreeMap::new();
        accounts.insert("Visa".to_string(), -1234.5);
        accounts.insert("Checking".to_string(), 200.0);
        let out = format_accounts(&accounts);
        assert!(out.contains("Visa"));
        assert!(out.contains("-$1,234.50"));
        assert!(out.contains("$200.00"));
        assert!(out.find("Checking").unwrap() < out.find("Visa").unwrap());
    }

    #[test]
    fn test_format_group_totals_includes_grand_total() {
        let totals = vec![
            GroupTotal { name: "Groceries".to_string(), total: 100.0 },
            GroupTotal { name: "Fuel".to_string(), total: 25.5 },
        ];
        let out = format_group_totals("Category", &totals);
        assert!(out.contains("Groceries"));
        assert!(out.contains("$125.50"));
    }

    #[test]
    fn test_format_transactions_and_totals() {
        let a = record("2025-01-02", "debit", "Dining", "Visa", 12.0);
        let b = record("2025-01-03", "debit", "Fuel", "Amex", 30.0);
        let records = vec![&a, &b];
        let out = format_transactions("Debits", &records);
        assert!(out.contains("2025-01-02"));
        assert!(out.contains("Dining purchase"));
        assert!(out.contains("Amex"));
        assert_eq!(
            format_transaction_totals("Debits", &records),
            "Debits total: $42.00 (2 transactions)"
        );
    }

    #[test]
    fn test_format_comparison() {
        let rows = vec![ComparisonRow {
            category: "Groceries".to_string(),
            previous: 100.0,
            current: 150.0,
        }];
        let out = format_comparison(&rows);
        assert!(out.contains("Groceries"));
        assert!(out.contains("$100.00"));
        assert!(out.contains("$150.00"));
    }

    #[test]
    fn test_format_daily() {
        let mut days = BTreeMap::new();
        days.insert(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(), 20.0);
        days.insert(NaiveDate::from_ymd_opt(2025, 1, 7).unwrap(), 5.0);
        let out = format_daily(&days);
        assert!(out.contains("2025-01-06"));
        assert!(out.contains("Mon"));
        assert!(out.contains("$25.00"));
    }
}
