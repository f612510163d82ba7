use std::env;
use std::error::Error;
use std::path::Path;
use std::process::exit;

use chrono::{Duration, Utc};
use rusqlite::Connection;

use centsible::{
    create_app_state,
    models::{PasswordHash, Transaction, TransactionKind},
    stores::{TransactionStore, UserStore},
};

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <output_path>", &args[0]);
        exit(1);
    }

    let output_path = Path::new(&args[1]);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;
    let state = create_app_state(conn, "notasecret")?;

    println!("Creating test user...");
    let mut user_store = state.user_store.clone();
    let password_hash = PasswordHash::new("test", PasswordHash::DEFAULT_COST)?;
    let user = user_store.create("test@test.com".parse()?, password_hash)?;

    println!("Creating test transactions...");
    let mut transaction_store = state.transaction_store.clone();
    let now = Utc::now();

    for months_ago in 0..6 {
        let date = now - Duration::days(30 * months_ago);

        transaction_store.create(
            TransactionKind::Income,
            Transaction::build(2500.0, user.id())
                .description("Paycheck")
                .category("Salary")
                .date(date),
        )?;
        transaction_store.create(
            TransactionKind::Expense,
            Transaction::build(1200.0, user.id())
                .description("Rent")
                .category("Bills")
                .date(date),
        )?;
        transaction_store.create(
            TransactionKind::Expense,
            Transaction::build(85.5 + months_ago as f64, user.id())
                .description("Groceries")
                .category("Food")
                .date(date - Duration::days(2)),
        )?;
    }

    Ok(())
}
