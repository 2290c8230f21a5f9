use env_logger::Env;
use log::info;
use crate::csv_handler::ExpenseStore;
use crate::errors::TrackerError;
use crate::expense_tracker::ExpenseTracker;

mod csv_handler;
mod errors;
mod expense_tracker;
mod shell;

const DEFAULT_FILE: &str = "expenses.csv";

fn main() -> Result<(), TrackerError> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_FILE.to_string());

    let store = ExpenseStore::new(path);
    info!("Using expenses file {}", store.path().display());
    let mut tracker = ExpenseTracker::open(store)?;
    info!("Loaded {} expenses", tracker.expenses().len());

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    shell::run_menu(&mut tracker, &mut stdin.lock(), &mut stdout.lock())
}
