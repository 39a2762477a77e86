use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::Record;
use crate::window::DateWindow;

/// In-memory transactions from one load plus the active reporting window.
/// A reload builds a new `Store`; records are never merged across loads.
#[derive(Debug, Clone)]
pub struct Store {
    records: Vec<Record>,
    count: usize,
    tags: Vec<String>,
    window: DateWindow,
}

impl Store {
    pub fn new(records: Vec<Record>, count: usize, tags: Vec<String>) -> Self {
        Self {
            records,
            count,
            tags,
            window: DateWindow::current_month(),
        }
    }

    /// All kept records in file order.
    #[cfg(test)]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Data rows read from the file, including rows dropped as hidden.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Tag vocabulary this store was loaded with.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn window(&self) -> DateWindow {
        self.window
    }

    pub fn set_window(&mut self, window: DateWindow) {
        self.window = window;
    }

    /// Records of `kind` (case-insensitive) dated inside `window`, or inside
    /// the store's window when none is given. Load order is preserved.
    pub fn records_by_type(&self, kind: &str, window: Option<&DateWindow>) -> Vec<&Record> {
        let window = window.copied().unwrap_or(self.window);
        self.records
            .iter()
            .filter(|r| window.contains(r.date) && r.is_type(kind))
            .collect()
    }

    /// Debits summed per calendar date. Days without debits are absent.
    pub fn daily_debit_totals(&self, window: Option<&DateWindow>) -> BTreeMap<NaiveDate, f64> {
        let mut days = BTreeMap::new();
        for record in self.records_by_type("debit", window) {
            *days.entry(record.date).or_insert(0.0) += record.amount;
        }
        days
    }

    /// Debit records on a single date.
    pub fn records_on(&self, date: NaiveDate) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|r| r.date == date && r.is_debit())
            .collect()
    }

    /// Signed total per account over every record, ignoring the window.
    pub fn account_totals(&self) -> BTreeMap<String, f64> {
        let mut accounts = BTreeMap::new();
        for record in &self.records {
            *accounts.entry(record.account_name.clone()).or_insert(0.0) += record.amount;
        }
        accounts
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(date: &str, kind: &str, category: &str, account: &str, amount: f64) -> Record {
        Record {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            description: format!("{category} purchase"),
            original_description: String::new(),
            amount,
            transaction_type: kind.to_string(),
            category: category.to_string(),
            account_name: account.to_string(),
            tags: String::new(),
            notes: String::new(),
        }
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_store() -> Store {
        let records = vec![
            record("2025-01-01", "debit", "Groceries", "Visa", 10.0),
            record("2025-01-15", "Debit", "Dining", "Visa", 25.0),
            record("2025-01-15", "debit", "Groceries", "Checking", 5.0),
            record("2025-01-20", "credit", "Paycheck", "Checking", 1000.0),
            record("2025-01-31", "DEBIT", "Fuel", "Amex", 40.0),
            record("2025-02-01", "debit", "Groceries", "Visa", 99.0),
        ];
        let mut store = Store::new(records, 6, vec![]);
        store.set_window(DateWindow::month(2025, 1).unwrap());
        store
    }

    #[test]
    fn test_default_window_is_current_month() {
        let store = Store::new(vec![], 0, vec![]);
        assert_eq!(store.window(), DateWindow::current_month());
    }

    #[test]
    fn test_records_by_type_uses_store_window() {
        let store = sample_store();
        let debits = store.records_by_type("debit", None);
        assert_eq!(debits.len(), 4);
        assert!(debits.iter().all(|r| r.is_debit()));
        assert!(debits.iter().all(|r| r.date.to_string().starts_with("2025-01")));
        // load order kept
        assert_eq!(debits[0].category, "Groceries");
        assert_eq!(debits[1].category, "Dining");
        assert_eq!(debits[3].category, "Fuel");
    }

    #[test]
    fn test_records_by_type_includes_boundaries() {
        let store = sample_store();
        let window = DateWindow::new(d("2025-01-15"), d("2025-01-31")).unwrap();
        let debits = store.records_by_type("DEBIT", Some(&window));
        let dates: Vec<String> = debits.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2025-01-15", "2025-01-15", "2025-01-31"]);
    }

    #[test]
    fn test_records_by_type_credit() {
        let store = sample_store();
        let credits = store.records_by_type("credit", None);
        assert_eq!(credits.len(), 1);
        assert_eq!(credits[0].amount, 1000.0);
    }

    #[test]
    fn test_explicit_window_does_not_change_store_window() {
        let store = sample_store();
        let feb = DateWindow::month(2025, 2).unwrap();
        assert_eq!(store.records_by_type("debit", Some(&feb)).len(), 1);
        assert_eq!(store.window(), DateWindow::month(2025, 1).unwrap());
    }

    #[test]
    fn test_daily_debit_totals() {
        let store = sample_store();
        let days = store.daily_debit_totals(None);
        assert_eq!(days.len(), 3);
        assert_eq!(days[&d("2025-01-01")], 10.0);
        assert_eq!(days[&d("2025-01-15")], 30.0);
        assert_eq!(days[&d("2025-01-31")], 40.0);
        assert!(!days.contains_key(&d("2025-01-20")));
        assert!(!days.contains_key(&d("2025-02-01")));
    }

    #[test]
    fn test_records_on_date() {
        let store = sample_store();
        assert_eq!(store.records_on(d("2025-01-15")).len(), 2);
        assert!(store.records_on(d("2025-01-20")).is_empty());
    }

    #[test]
    fn test_account_totals_ignore_window() {
        let store = sample_store();
        let accounts = store.account_totals();
        assert_eq!(accounts["Visa"], 134.0);
        assert_eq!(accounts["Checking"], 1005.0);
        assert_eq!(accounts["Amex"], 40.0);

        let grand: f64 = store.records().iter().map(|r| r.amount).sum();
        let summed: f64 = accounts.values().sum();
        assert!((grand - summed).abs() < 1e-9);
    }
}
