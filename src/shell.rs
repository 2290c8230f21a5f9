use std::io::{BufRead, Write};
use log::debug;
use crate::errors::TrackerError;
use crate::expense_tracker::ExpenseTracker;

const MENU: &str = "\nExpense Tracker Menu\n1. Add Expense\n2. View Expenses\n3. Summarize by Category\n4. Exit";

/// Prints `prompt` and reads one line without its terminator. `None` at end of input.
fn prompt(input: &mut impl BufRead, out: &mut impl Write, prompt: &str) -> Result<Option<String>, TrackerError> {
    write!(out, "{}", prompt)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Runs the menu loop until the user exits or input ends.
pub fn run_menu(
    tracker: &mut ExpenseTracker,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<(), TrackerError> {
    loop {
        writeln!(out, "{}", MENU)?;
        let Some(choice) = prompt(input, out, "Enter your choice: ")? else {
            debug!("Input closed, leaving the menu");
            return Ok(());
        };

        match choice.as_str() {
            "1" => {
                let Some(amount) = prompt(input, out, "Enter amount: ")? else { return Ok(()) };
                let Some(category) = prompt(input, out, "Enter category: ")? else { return Ok(()) };
                let Some(description) = prompt(input, out, "Enter description: ")? else { return Ok(()) };
                tracker.add_expense(out, &amount, &category, &description, None)?;
            }
            "2" => tracker.view_expenses(out)?,
            "3" => tracker.summarize_by_category(out)?,
            "4" => {
                writeln!(out, "Exiting Expense Tracker. Goodbye!")?;
                return Ok(());
            }
            _ => writeln!(out, "Invalid choice. Please try again.")?,
        }
    }
}
