pub mod chart;
pub mod config;
pub mod report;
pub mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::{Result, SpendError};
use crate::loader::{self, parse_date};
use crate::settings::{load_settings, shellexpand_path, Settings};
use crate::window::DateWindow;
use shell::{Outcome, Shell, ShellCommand};

#[derive(Parser)]
#[command(
    name = "spendview",
    version,
    about = "Spending reports over a Mint transaction export."
)]
pub struct Cli {
    /// Transaction export to read (default: data_file from settings)
    #[arg(long, global = true)]
    pub file: Option<String>,
    /// Reporting window start date
    #[arg(long = "from", global = true)]
    pub from_date: Option<String>,
    /// Reporting window end date
    #[arg(long = "to", global = true)]
    pub to_date: Option<String>,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Totals for every account over the whole file.
    Accounts,
    /// Debit totals by category, or the transactions of the first matching category.
    Categories {
        /// Case-insensitive regular expression matched against category names
        name: Option<String>,
    },
    /// Debit totals by tag, or the transactions of the first matching tag.
    Tags {
        /// Case-insensitive regular expression matched against tag names
        name: Option<String>,
    },
    /// Compare category spending this month against last month.
    Compare,
    /// Daily debit totals for the window, or the debits of one day.
    Daily {
        /// Show the transactions for this date instead
        date: Option<String>,
    },
    /// Credits in the reporting window.
    Income,
    /// Debits in the reporting window.
    Spending,
    /// Category pie chart of debits in the reporting window.
    Pie,
    /// Show or change settings.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective settings.
    Show,
    /// Set the default transaction file.
    SetFile {
        /// Path to the Mint CSV export
        path: String,
    },
}

impl Commands {
    fn to_shell_command(&self) -> Option<ShellCommand> {
        Some(match self {
            Commands::Accounts => ShellCommand::Accounts,
            Commands::Categories { name } => ShellCommand::Categories(name.clone()),
            Commands::Tags { name } => ShellCommand::Tags(name.clone()),
            Commands::Compare => ShellCommand::Compare,
            Commands::Daily { date } => ShellCommand::Day(date.clone()),
            Commands::Income => ShellCommand::Income,
            Commands::Spending => ShellCommand::Spending,
            Commands::Pie => ShellCommand::Pie,
            Commands::Config { .. } => return None,
        })
    }
}

/// Build the reporting window from `--from`/`--to`. Both or neither.
pub(crate) fn window_from_args(
    from_date: Option<&str>,
    to_date: Option<&str>,
    formats: &[String],
) -> Result<Option<DateWindow>> {
    let parse = |raw: &str| {
        parse_date(raw, formats)
            .ok_or_else(|| SpendError::Other(format!("Invalid date: {raw}")))
    };
    match (from_date, to_date) {
        (Some(from), Some(to)) => Ok(Some(DateWindow::new(parse(from)?, parse(to)?)?)),
        (Some(_), None) => Err(SpendError::Other(
            "--from requires --to (both date boundaries must be specified)".to_string(),
        )),
        (None, Some(_)) => Err(SpendError::Other(
            "--to requires --from (both date boundaries must be specified)".to_string(),
        )),
        (None, None) => Ok(None),
    }
}

fn data_path(settings: &Settings, file: Option<&str>) -> PathBuf {
    match file {
        Some(f) => PathBuf::from(shellexpand_path(f)),
        None => settings.data_path(),
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let settings = load_settings();

    if let Some(Commands::Config { command }) = &cli.command {
        return match command {
            ConfigCommands::Show => config::show(&settings),
            ConfigCommands::SetFile { path } => config::set_file(settings, path),
        };
    }

    let window = window_from_args(
        cli.from_date.as_deref(),
        cli.to_date.as_deref(),
        &settings.date_formats,
    )?;
    let path = data_path(&settings, cli.file.as_deref());
    let mut store = loader::load(&path, &settings.loader_config())?;
    if let Some(w) = window {
        store.set_window(w);
    }

    let mut shell = Shell::new(settings, path, store);
    match cli.command.as_ref().and_then(Commands::to_shell_command) {
        Some(command) => {
            if let Outcome::Output(text) = shell.execute(command)? {
                println!("{text}");
            }
            Ok(())
        }
        None => shell.run(),
    }
}
