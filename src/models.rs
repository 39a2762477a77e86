use chrono::NaiveDate;

/// One transaction line from the export. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub date: NaiveDate,
    pub description: String,
    pub original_description: String,
    pub amount: f64,
    pub transaction_type: String,
    pub category: String,
    pub account_name: String,
    pub tags: String,
    pub notes: String,
}

impl Record {
    pub fn is_type(&self, kind: &str) -> bool {
        self.transaction_type.eq_ignore_ascii_case(kind)
    }

    pub fn is_debit(&self) -> bool {
        self.is_type("debit")
    }
}

/// Categories starting with "hide" (any case) never show up in reports.
pub fn is_hidden_category(category: &str) -> bool {
    category.to_lowercase().starts_with("hide")
}
