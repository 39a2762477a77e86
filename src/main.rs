mod aggregate;
mod cli;
mod error;
mod fmt;
mod loader;
mod models;
mod reports;
mod settings;
mod store;
mod window;

use clap::Parser;
use env_logger::Env;

use cli::Cli;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(e) = cli::run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
