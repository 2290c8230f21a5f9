use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn run_tracker(data_file: &Path, input: &str) -> Output {
    let bin_path = env!("CARGO_BIN_EXE_expense_tracker");

    let mut child = Command::new(bin_path)
        .arg(data_file)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute binary");

    child.stdin.take()
        .expect("Failed to open stdin")
        .write_all(input.as_bytes())
        .expect("Failed to write to stdin");

    child.wait_with_output().expect("Failed to wait for binary")
}

fn non_empty_lines(content: &str) -> Vec<String> {
    content.lines()
        .map(|line| line.trim_end().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

#[test]
fn test_add_view_summarize_session() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let data_file = dir.path().join("expenses.csv");

    let output = run_tracker(&data_file, "1\n10\nFood\nLunch\n1\n5\nTransport\nBus\n1\n20\nFood\nDinner\n2\n3\n4\n");

    assert!(output.status.success(),
        "Binary failed with stderr: {}",
        String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("Expense added successfully!").count(), 3);
    assert!(stdout.contains("Exiting Expense Tracker. Goodbye!"));

    let lines = non_empty_lines(&stdout);
    let food = lines.iter().position(|l| l == "Food            30.00").expect("missing Food total");
    let transport = lines.iter().position(|l| l == "Transport       5.00").expect("missing Transport total");
    assert!(food < transport, "categories out of first-seen order:\n{}", stdout);

    let stored = std::fs::read_to_string(&data_file).expect("Failed to read expenses file");
    let stored = non_empty_lines(&stored);
    assert_eq!(stored.len(), 4);
    assert_eq!(stored[0], "amount,category,description,date");
    assert!(stored[1].starts_with("10.0,Food,Lunch,"));
    assert!(stored[2].starts_with("5.0,Transport,Bus,"));
    assert!(stored[3].starts_with("20.0,Food,Dinner,"));
}

#[test]
fn test_expenses_survive_restart() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let data_file = dir.path().join("expenses.csv");

    let first = run_tracker(&data_file, "1\n12.50\nFood\nLunch\n4\n");
    assert!(first.status.success());
    let stderr = String::from_utf8_lossy(&first.stderr);
    assert!(stderr.contains("Starting fresh"), "stderr was: {}", stderr);

    let second = run_tracker(&data_file, "2\n3\n4\n");
    assert!(second.status.success());

    let stdout = String::from_utf8_lossy(&second.stdout);
    let lines = non_empty_lines(&stdout);
    let rows: Vec<&String> = lines.iter().filter(|l| l.contains("Lunch")).collect();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].contains("12.50      Food"));
    assert!(lines.iter().any(|l| l == "Food            12.50"));
    assert!(!String::from_utf8_lossy(&second.stderr).contains("Starting fresh"));
}

#[test]
fn test_invalid_amount_terminates_with_error() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let data_file = dir.path().join("expenses.csv");

    let output = run_tracker(&data_file, "1\nabc\nFood\nLunch\n4\n");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("InvalidAmount"));
    assert!(!data_file.exists());
}

#[test]
fn test_malformed_file_terminates_with_error() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let data_file = dir.path().join("expenses.csv");
    std::fs::write(&data_file, "amount,category,description,date\nten,Food,Lunch,2024-01-01\n")
        .expect("Failed to write expenses file");

    let output = run_tracker(&data_file, "4\n");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("MalformedRecord"));
    assert!(String::from_utf8_lossy(&output.stdout).is_empty());
}
