use std::collections::HashMap;
use std::io::Write;
use chrono::Local;
use log::{trace, warn};
use serde::Serialize;
use crate::csv_handler::ExpenseStore;
use crate::errors::TrackerError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single recorded expense. Field order is the stored column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expense {
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Converts user or stored text into an amount. Surrounding whitespace is ignored.
pub fn parse_amount(text: &str) -> Result<f64, TrackerError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| TrackerError::InvalidAmount(text.to_string()))
}

fn today() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

/// The expense tracker, owning the in-memory expense list in insertion order
/// and flushing it to its store after every change.
#[derive(Debug)]
pub struct ExpenseTracker {
    store: ExpenseStore,
    expenses: Vec<Expense>,
}

impl ExpenseTracker {

    /// Loads the existing expenses from `store`.
    pub fn open(store: ExpenseStore) -> Result<Self, TrackerError> {
        let expenses = store.load()?;
        Ok(ExpenseTracker { store, expenses })
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Records a new expense and rewrites the store. An empty or missing `date`
    /// means today. If the save fails the expense is dropped again.
    pub fn add_expense(
        &mut self,
        out: &mut impl Write,
        amount: &str,
        category: &str,
        description: &str,
        date: Option<&str>,
    ) -> Result<(), TrackerError> {
        let amount = parse_amount(amount)?;
        let date = match date {
            Some(date) if !date.is_empty() => date.to_string(),
            _ => today(),
        };
        let expense = Expense {
            amount,
            category: category.to_string(),
            description: description.to_string(),
            date,
        };
        trace!("Adding expense {:?}", expense);
        self.expenses.push(expense);

        if let Err(e) = self.store.save(&self.expenses) {
            warn!("Rolling back the last expense: {}", e);
            self.expenses.pop();
            return Err(e);
        }
        writeln!(out, "Expense added successfully!")?;
        Ok(())
    }

    /// Prints every expense in insertion order as a fixed-width table.
    pub fn view_expenses(&self, out: &mut impl Write) -> Result<(), TrackerError> {
        if self.expenses.is_empty() {
            writeln!(out, "No expenses recorded.")?;
            return Ok(());
        }

        writeln!(out, "{:<12} {:<10} {:<15} {:<20}", "Date", "Amount", "Category", "Description")?;
        writeln!(out, "{}", "-".repeat(60))?;
        for expense in &self.expenses {
            writeln!(
                out,
                "{:<12} {:<10.2} {:<15} {:<20}",
                expense.date, expense.amount, expense.category, expense.description
            )?;
        }
        Ok(())
    }

    /// Totals per category, in the order each category first appears.
    pub fn summary(&self) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for expense in &self.expenses {
            match index.get(expense.category.as_str()) {
                Some(&i) => totals[i].total += expense.amount,
                None => {
                    index.insert(&expense.category, totals.len());
                    totals.push(CategoryTotal {
                        category: expense.category.clone(),
                        total: expense.amount,
                    });
                }
            }
        }
        totals
    }

    pub fn summarize_by_category(&self, out: &mut impl Write) -> Result<(), TrackerError> {
        if self.expenses.is_empty() {
            writeln!(out, "No expenses to summarize.")?;
            return Ok(());
        }

        writeln!(out, "{:<15} {:<10}", "Category", "Total Amount")?;
        writeln!(out, "{}", "-".repeat(30))?;
        for CategoryTotal { category, total } in self.summary() {
            writeln!(out, "{:<15} {:<10.2}", category, total)?;
        }
        Ok(())
    }
}
