use std::path::PathBuf;

use colored::Colorize;
use dialoguer::Input;
use log::info;

use crate::aggregate::{find_group_by_pattern, group_by_category, group_by_tag, totals_by_group};
use crate::cli::chart::format_pie;
use crate::cli::report::{
    format_accounts, format_comparison, format_daily, format_group_totals, format_transaction_totals,
    format_transactions,
};
use crate::error::{Result, SpendError};
use crate::loader::{self, parse_date};
use crate::reports::{compare_months, pie_slices};
use crate::settings::Settings;
use crate::store::Store;
use crate::window::DateWindow;

const HELP: &str = "\
a                    - list accounts with their totals
cat [category name]  - spending by category; with a name, that category's transactions
cp                   - compare the current month to the previous month
day [date]           - daily spending for the date range; with a date, that day's transactions
dr START END         - change the reporting date range
help                 - show this help
income               - credits in the date range
spending             - debits in the date range
lf                   - reload the transaction file
pie                  - pie chart of spending by category
tag [tag name]       - spending by tag; with a name, that tag's transactions
quit                 - leave";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Accounts,
    Categories(Option<String>),
    Tags(Option<String>),
    Compare,
    Day(Option<String>),
    DateRange(String, String),
    Help,
    Income,
    Spending,
    Reload,
    Pie,
    Quit,
    Empty,
    Invalid(String),
    Unknown(String),
}

/// Turn one line of shell input into a command. Never fails; bad input maps
/// to `Invalid` or `Unknown`.
pub fn parse_command(line: &str) -> ShellCommand {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };
    let arg = (!rest.is_empty()).then(|| rest.to_string());

    match word.to_lowercase().as_str() {
        "" => ShellCommand::Empty,
        "a" => ShellCommand::Accounts,
        "cat" => ShellCommand::Categories(arg),
        "tag" => ShellCommand::Tags(arg),
        "cp" => ShellCommand::Compare,
        "day" => ShellCommand::Day(arg),
        "dr" => {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            match parts.as_slice() {
                [start, end] => ShellCommand::DateRange(start.to_string(), end.to_string()),
                _ => ShellCommand::Invalid("usage: dr START END".to_string()),
            }
        }
        "help" => ShellCommand::Help,
        "income" => ShellCommand::Income,
        "spending" => ShellCommand::Spending,
        "lf" => ShellCommand::Reload,
        "pie" => ShellCommand::Pie,
        "quit" | "q" => ShellCommand::Quit,
        _ => ShellCommand::Unknown(line.to_string()),
    }
}

pub enum Outcome {
    Output(String),
    Quit,
}

/// Interactive session over one `Store` at a time.
pub struct Shell {
    settings: Settings,
    path: PathBuf,
    store: Store,
}

impl Shell {
    pub fn new(settings: Settings, path: PathBuf, store: Store) -> Self {
        Self {
            settings,
            path,
            store,
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn run(&mut self) -> Result<()> {
        println!("{} transactions loaded.", self.store.count());
        loop {
            let prompt = format!("{} -->", self.store.window());
            let line: String = match Input::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
            {
                Ok(line) => line,
                Err(_) => break,
            };
            match self.execute(parse_command(&line)) {
                Ok(Outcome::Output(text)) => {
                    if !text.is_empty() {
                        println!("{text}");
                    }
                }
                Ok(Outcome::Quit) => break,
                Err(e) => eprintln!("{} {e}", "Error:".red()),
            }
        }
        Ok(())
    }

    pub fn execute(&mut self, command: ShellCommand) -> Result<Outcome> {
        let text = match command {
            ShellCommand::Quit => return Ok(Outcome::Quit),
            ShellCommand::Empty => String::new(),
            ShellCommand::Help => HELP.to_string(),
            ShellCommand::Invalid(msg) => msg,
            ShellCommand::Unknown(_) => "*** Unrecognized command ***".to_string(),
            ShellCommand::Accounts => format_accounts(&self.store.account_totals()),
            ShellCommand::Categories(name) => self.categories(name.as_deref())?,
            ShellCommand::Tags(name) => self.tags(name.as_deref())?,
            ShellCommand::Compare => {
                format_comparison(&compare_months(&self.store, chrono::Local::now().date_naive()))
            }
            ShellCommand::Day(None) => format_daily(&self.store.daily_debit_totals(None)),
            ShellCommand::Day(Some(raw)) => {
                let date = self.parse_date(&raw)?;
                let records = self.store.records_on(date);
                if records.is_empty() {
                    format!("No spending on {date}.")
                } else {
                    format!(
                        "{}\n{}",
                        format_transactions(&date.to_string(), &records),
                        format_transaction_totals("Day", &records)
                    )
                }
            }
            ShellCommand::DateRange(start, end) => {
                let window = DateWindow::new(self.parse_date(&start)?, self.parse_date(&end)?)?;
                self.store.set_window(window);
                info!("Reporting window set to {window}");
                String::new()
            }
            ShellCommand::Income => self.listing("Credits", "credit"),
            ShellCommand::Spending => self.listing("Debits", "debit"),
            ShellCommand::Reload => self.reload()?,
            ShellCommand::Pie => {
                let debits = self.store.records_by_type("debit", None);
                let totals = totals_by_group(&group_by_category(debits));
                format_pie(
                    "Spending by Category",
                    &pie_slices(&totals, self.settings.other_limit),
                )
            }
        };
        Ok(Outcome::Output(text))
    }

    fn parse_date(&self, raw: &str) -> Result<chrono::NaiveDate> {
        parse_date(raw, &self.settings.date_formats)
            .ok_or_else(|| SpendError::Other(format!("Invalid date: {raw}")))
    }

    fn categories(&self, name: Option<&str>) -> Result<String> {
        let debits = self.store.records_by_type("debit", None);
        let grouping = group_by_category(debits);
        Ok(match name {
            None => format_group_totals("Category", &totals_by_group(&grouping)),
            Some(name) => match find_group_by_pattern(&grouping, name)? {
                Some(records) => format_transactions(name, records),
                None => format!("No transactions found for category: {name}."),
            },
        })
    }

    fn tags(&self, name: Option<&str>) -> Result<String> {
        let debits = self.store.records_by_type("debit", None);
        let grouping = group_by_tag(debits, self.store.tags());
        Ok(match name {
            None => format_group_totals("Tag", &totals_by_group(&grouping)),
            Some(name) => match find_group_by_pattern(&grouping, name)? {
                Some(records) => format_transactions(name, records),
                None => format!("No transactions found for tag: {name}."),
            },
        })
    }

    fn listing(&self, title: &str, kind: &str) -> String {
        let records = self.store.records_by_type(kind, None);
        format!(
            "{}\n{}",
            format_transactions(title, &records),
            format_transaction_totals(title, &records)
        )
    }

    /// Replace the store with a fresh load. The old store stays if the load fails.
    fn reload(&mut self) -> Result<String> {
        info!("Reloading {}", self.path.display());
        let store = loader::load(&self.path, &self.settings.loader_config())?;
        self.store = store;
        Ok(format!("{} transactions loaded.", self.store.count()))
    }
}
