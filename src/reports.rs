use chrono::NaiveDate;

use crate::aggregate::{group_by_category, totals_by_group, GroupTotal};
use crate::store::Store;
use crate::window::DateWindow;

// ---------------------------------------------------------------------------
// Month-over-month comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub category: String,
    pub previous: f64,
    pub current: f64,
}

impl ComparisonRow {
    pub fn change(&self) -> f64 {
        self.current - self.previous
    }
}

/// Debit category totals for the month containing `today` against the month before it.
pub fn compare_months(store: &Store, today: NaiveDate) -> Vec<ComparisonRow> {
    let current = DateWindow::month_of(today);
    let previous = current.previous_month();

    let previous_debits = store.records_by_type("debit", Some(&previous));
    let current_debits = store.records_by_type("debit", Some(&current));
    let previous_totals = totals_by_group(&group_by_category(previous_debits));
    let current_totals = totals_by_group(&group_by_category(current_debits));

    compare_totals(&previous_totals, &current_totals)
}

/// Merge two total lists into rows over the union of names: previous order
/// first, then names only present in `current`. A missing side counts as zero.
pub fn compare_totals(previous: &[GroupTotal], current: &[GroupTotal]) -> Vec<ComparisonRow> {
    let lookup = |totals: &[GroupTotal], name: &str| {
        totals
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.total)
            .unwrap_or(0.0)
    };

    let mut rows: Vec<ComparisonRow> = previous
        .iter()
        .map(|p| ComparisonRow {
            category: p.name.clone(),
            previous: p.total,
            current: lookup(current, &p.name),
        })
        .collect();
    for c in current {
        if !previous.iter().any(|p| p.name == c.name) {
            rows.push(ComparisonRow {
                category: c.name.clone(),
                previous: 0.0,
                current: c.total,
            });
        }
    }
    rows
}

// ---------------------------------------------------------------------------
// Pie chart slices
// ---------------------------------------------------------------------------

pub const OTHER_LABEL: &str = "Other";

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub total: f64,
    pub pct: f64,
}

/// Absolute totals sorted largest first. Slices under `other_limit` are folded
/// into a trailing "Other" slice, which is left out when nothing was folded.
pub fn pie_slices(totals: &[GroupTotal], other_limit: f64) -> Vec<PieSlice> {
    let grand: f64 = totals.iter().map(|t| t.total.abs()).sum();
    let pct = |v: f64| if grand != 0.0 { v / grand * 100.0 } else { 0.0 };

    let mut big: Vec<(String, f64)> = Vec::new();
    let mut other = 0.0f64;
    let mut folded = false;
    for t in totals {
        let v = t.total.abs();
        if v < other_limit {
            other += v;
            folded = true;
        } else {
            big.push((t.name.clone(), v));
        }
    }
    big.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut slices: Vec<PieSlice> = big
        .into_iter()
        .map(|(label, total)| PieSlice {
            label,
            total,
            pct: pct(total),
        })
        .collect();
    if folded {
        slices.push(PieSlice {
            label: OTHER_LABEL.to_string(),
            total: other,
            pct: pct(other),
        });
    }
    slices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::record;

    fn total(name: &str, total: f64) -> GroupTotal {
        GroupTotal {
            name: name.to_string(),
            total,
        }
    }

    #[test]
    fn test_compare_totals_union() {
        let previous = vec![total("Groceries", 100.0), total("Fuel", 50.0)];
        let current = vec![total("Dining", 20.0), total("Groceries", 130.0)];
        let rows = compare_totals(&previous, &current);
        let names: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(names, vec!["Groceries", "Fuel", "Dining"]);
        assert_eq!(rows[0].change(), 30.0);
        assert_eq!(rows[1].current, 0.0);
        assert_eq!(rows[2].previous, 0.0);
        assert_eq!(rows[2].change(), 20.0);
    }

    #[test]
    fn test_compare_months_wraps_january() {
        let records = vec![
            record("2024-12-05", "debit", "Groceries", "Visa", 80.0),
            record("2024-12-20", "credit", "Paycheck", "Checking", 900.0),
            record("2025-01-03", "debit", "Groceries", "Visa", 60.0),
            record("2025-01-04", "debit", "Gifts", "Visa", 25.0),
            record("2024-11-30", "debit", "Groceries", "Visa", 999.0),
        ];
        let store = Store::new(records, 5, vec![]);
        let mid_january = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        let rows = compare_months(&store, mid_january);
        assert_eq!(
            rows,
            vec![
                ComparisonRow {
                    category: "Groceries".to_string(),
                    previous: 80.0,
                    current: 60.0
                },
                ComparisonRow {
                    category: "Gifts".to_string(),
                    previous: 0.0,
                    current: 25.0
                },
            ]
        );
    }

    #[test]
    fn test_compare_months_uses_whole_month_of_today() {
        let records = vec![
            record("2025-03-01", "debit", "Fuel", "Visa", 30.0),
            record("2025-03-31", "debit", "Fuel", "Visa", 20.0),
            record("2025-04-02", "debit", "Fuel", "Visa", 45.0),
        ];
        let store = Store::new(records, 3, vec![]);
        let first_of_april = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let rows = compare_months(&store, first_of_april);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].previous, 50.0);
        assert_eq!(rows[0].current, 45.0);
    }

    #[test]
    fn test_pie_slices_folds_small_into_other() {
        let totals = vec![
            total("Groceries", 400.0),
            total("Fuel", 50.0),
            total("Mortgage", 1500.0),
            total("Dining", 50.0),
        ];
        let slices = pie_slices(&totals, 300.0);
        let labels: Vec<&str> = slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Mortgage", "Groceries", "Other"]);
        assert_eq!(slices[2].total, 100.0);
        assert_eq!(slices[0].pct, 75.0);
        let sum: f64 = slices.iter().map(|s| s.pct).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_pie_slices_no_other_when_nothing_small() {
        let slices = pie_slices(&[total("Mortgage", -1500.0)], 300.0);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].total, 1500.0);
        assert_eq!(slices[0].pct, 100.0);
    }

    #[test]
    fn test_pie_slices_empty() {
        assert!(pie_slices(&[], 300.0).is_empty());
    }
}
