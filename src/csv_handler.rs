use log::{debug, info};
use serde::Deserialize;
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use crate::errors::TrackerError;
use crate::expense_tracker::{parse_amount, Expense};

const HEADER: [&str; 4] = ["amount", "category", "description", "date"];

/// A stored row before the amount has been coerced to a number.
#[derive(Debug, Deserialize)]
struct ExpenseRaw {
    amount: String,
    category: String,
    description: String,
    date: String,
}

/// Flat-file storage for the expense list. Every save rewrites the whole file.
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    path: PathBuf,
}

impl ExpenseStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ExpenseStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all expenses from the CSV file. A missing file is an empty list.
    pub fn load(&self) -> Result<Vec<Expense>, TrackerError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No previous expenses found at {}. Starting fresh.", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::ReaderBuilder::new().from_reader(file);
        let headers = reader.headers().map_err(malformed)?.clone();

        let mut expenses = Vec::new();
        for result in reader.records() {
            let record = result.map_err(malformed)?;
            let line = record.position().map_or(0, |p| p.line());
            let raw: ExpenseRaw = record.deserialize(Some(&headers)).map_err(malformed)?;
            let amount = parse_amount(&raw.amount).map_err(|e| TrackerError::MalformedRecord {
                line,
                reason: e.to_string(),
            })?;
            expenses.push(Expense {
                amount,
                category: raw.category,
                description: raw.description,
                date: raw.date,
            });
        }
        Ok(expenses)
    }

    /// Overwrites the CSV file with a header row followed by `expenses` in order.
    pub fn save(&self, expenses: &[Expense]) -> Result<(), TrackerError> {
        self.write_csv(expenses).map_err(|source| TrackerError::Storage {
            path: self.path.clone(),
            source,
        })?;
        debug!("Saved {} expenses to {}", expenses.len(), self.path.display());
        Ok(())
    }

    fn write_csv(&self, expenses: &[Expense]) -> Result<(), csv::Error> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        writer.write_record(HEADER)?;
        for expense in expenses {
            writer.serialize(expense)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn malformed(e: csv::Error) -> TrackerError {
    let line = e.position().map_or(0, |p| p.line());
    TrackerError::MalformedRecord { line, reason: e.to_string() }
}
