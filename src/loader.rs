use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

use chrono::NaiveDate;
use csv::StringRecord;
use log::{debug, info};
use regex::Regex;

use crate::error::{Result, SpendError};
use crate::models::{is_hidden_category, Record};
use crate::store::Store;

pub const DEFAULT_TAGS: &[&str] = &["Keith", "Eileen", "Split", "Lake House", "Glen Rock House"];

/// Mint writes dates as M/D/YYYY. ISO dates are accepted as a fallback.
pub const DEFAULT_DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d"];

/// Everything a load needs besides the file itself. Passed in explicitly so
/// two loads never share a tag list or a column map.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    pub tags: Vec<String>,
    pub date_formats: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            tags: DEFAULT_TAGS.iter().map(|t| t.to_string()).collect(),
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Header mapping
// ---------------------------------------------------------------------------

const DATE_HEADER: &str = "date";
const DESCRIPTION_HEADER: &str = "description";
const ORIGINAL_DESCRIPTION_HEADER: &str = "original description";
const AMOUNT_HEADER: &str = "amount";
const TRANSACTION_TYPE_HEADER: &str = "transaction type";
const CATEGORY_HEADER: &str = "category";
const ACCOUNT_NAME_HEADER: &str = "account name";
const TAGS_HEADER: &str = "labels";
const NOTES_HEADER: &str = "notes";

/// Column position of each required field, taken from the header row of one file.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderIndex {
    date: usize,
    description: usize,
    original_description: usize,
    amount: usize,
    transaction_type: usize,
    category: usize,
    account_name: usize,
    tags: usize,
    notes: usize,
}

impl HeaderIndex {
    /// When a header name repeats, the last column with that name is used.
    pub fn from_headers(headers: &StringRecord) -> Result<Self> {
        let names: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |wanted: &str| -> Result<usize> {
            names
                .iter()
                .rposition(|n| n == wanted)
                .ok_or_else(|| SpendError::MissingHeader(wanted.to_string()))
        };
        Ok(Self {
            date: find(DATE_HEADER)?,
            description: find(DESCRIPTION_HEADER)?,
            original_description: find(ORIGINAL_DESCRIPTION_HEADER)?,
            amount: find(AMOUNT_HEADER)?,
            transaction_type: find(TRANSACTION_TYPE_HEADER)?,
            category: find(CATEGORY_HEADER)?,
            account_name: find(ACCOUNT_NAME_HEADER)?,
            tags: find(TAGS_HEADER)?,
            notes: find(NOTES_HEADER)?,
        })
    }

    fn parse_row(&self, row: &StringRecord, line: u64, config: &LoaderConfig) -> Result<Record> {
        let field = |idx, name| field_at(row, idx, line, name);

        let raw_date = field(self.date, DATE_HEADER)?;
        let date = parse_date(raw_date, &config.date_formats).ok_or_else(|| SpendError::Parse {
            line,
            field: DATE_HEADER,
            value: raw_date.to_string(),
            reason: format!("expected one of {}", config.date_formats.join(", ")),
        })?;

        let raw_amount = field(self.amount, AMOUNT_HEADER)?;
        let amount = parse_amount(raw_amount).ok_or_else(|| SpendError::Parse {
            line,
            field: AMOUNT_HEADER,
            value: raw_amount.to_string(),
            reason: "not a number".to_string(),
        })?;

        Ok(Record {
            date,
            description: field(self.description, DESCRIPTION_HEADER)?.to_string(),
            original_description: field(self.original_description, ORIGINAL_DESCRIPTION_HEADER)?
                .to_string(),
            amount,
            transaction_type: field(self.transaction_type, TRANSACTION_TYPE_HEADER)?
                .trim()
                .to_string(),
            category: field(self.category, CATEGORY_HEADER)?.to_string(),
            account_name: field(self.account_name, ACCOUNT_NAME_HEADER)?.to_string(),
            tags: field(self.tags, TAGS_HEADER)?.to_string(),
            notes: field(self.notes, NOTES_HEADER)?.to_string(),
        })
    }
}

fn field_at<'r>(row: &'r StringRecord, idx: usize, line: u64, name: &'static str) -> Result<&'r str> {
    row.get(idx).ok_or_else(|| SpendError::Parse {
        line,
        field: name,
        value: String::new(),
        reason: "column missing from row".to_string(),
    })
}

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

/// Optional sign, optional `$`, then digits. Commas are allowed only as
/// thousands separators in the integer part.
fn amount_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<sign>[+-])?\$?(?P<num>(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d*)?|\.\d+)$").ok()
    })
    .as_ref()
}

/// Signed decimal with optional `$` and thousands separators. Returns `None`
/// for anything else; callers turn that into a parse error.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let caps = amount_re()?.captures(raw.trim())?;
    let value: f64 = caps["num"].replace(',', "").parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    let negative = caps.name("sign").is_some_and(|m| m.as_str() == "-");
    Some(if negative { -value } else { value })
}

pub fn parse_date<S: AsRef<str>>(raw: &str, formats: &[S]) -> Option<NaiveDate> {
    let raw = raw.trim();
    formats
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(raw, f.as_ref()).ok())
}

// ---------------------------------------------------------------------------
// load
// ---------------------------------------------------------------------------

/// Read a transaction export into a fresh `Store`. The file is held open only
/// for the duration of this call.
pub fn load(path: &Path, config: &LoaderConfig) -> Result<Store> {
    if !path.is_file() {
        return Err(SpendError::MissingSource(path.to_path_buf()));
    }
    let file =
        std::fs::File::open(path).map_err(|_| SpendError::MissingSource(path.to_path_buf()))?;
    info!("Loading transactions from {}", path.display());
    load_from_reader(std::io::BufReader::new(file), config)
}

pub fn load_from_reader<R: Read>(reader: R, config: &LoaderConfig) -> Result<Store> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let index = HeaderIndex::from_headers(rdr.headers()?)?;

    let mut records = Vec::new();
    let mut count = 0usize;
    for result in rdr.records() {
        let row = result?;
        count += 1;
        // Header is line 1.
        let line = row.position().map(|p| p.line()).unwrap_or(count as u64 + 1);
        let record = index.parse_row(&row, line, config)?;
        if is_hidden_category(&record.category) {
            debug!("Line {line}: skipping hidden category '{}'", record.category);
            continue;
        }
        records.push(record);
    }

    info!("{count} rows read, {} kept", records.len());
    Ok(Store::new(records, count, config.tags.clone()))
}
