mod common;

use std::fs::File;

use anyhow::Result;
use common::{record, StandardLedger};
use moneymate::application::LedgerStore;
use moneymate::domain::{Category, TransactionKind};
use moneymate::io::{read_transactions_csv, Exporter, SessionSnapshot};
use tempfile::TempDir;

fn tuples(store: &LedgerStore) -> Vec<(String, TransactionKind, Category, i64, Option<String>)> {
    store
        .transactions()
        .iter()
        .map(|t| {
            (
                t.date.to_string(),
                t.kind,
                t.category,
                t.amount,
                t.description.clone(),
            )
        })
        .collect()
}

#[test]
fn test_csv_round_trip_preserves_rows_and_order() -> Result<()> {
    let mut store = StandardLedger::month();
    store.add_transaction(
        TransactionKind::Expense,
        Category::Other,
        1,
        Some("Quoted \"gift\", with comma\nand newline".into()),
    )?;
    record(&mut store, "2023-12-31", TransactionKind::Income, Category::Bonus, 123_456_789);

    let bytes = Exporter::new(&store).transactions_csv_bytes()?;
    let rows = read_transactions_csv(bytes.as_slice())?;

    let parsed: Vec<_> = rows
        .into_iter()
        .map(|r| (r.date.to_string(), r.kind, r.category, r.amount, r.description))
        .collect();
    assert_eq!(parsed, tuples(&store));

    Ok(())
}

#[test]
fn test_csv_round_trip_empty_ledger() -> Result<()> {
    let store = LedgerStore::new();
    let bytes = Exporter::new(&store).transactions_csv_bytes()?;
    assert!(read_transactions_csv(bytes.as_slice())?.is_empty());
    Ok(())
}

#[test]
fn test_csv_amount_has_no_currency_symbol() -> Result<()> {
    let store = StandardLedger::month();
    let text = String::from_utf8(Exporter::new(&store).transactions_csv_bytes()?)?;

    assert!(!text.contains("Rp"));
    assert!(text.contains("2024-01-01,income,salary,50000.00,"));
    Ok(())
}

#[test]
fn test_export_to_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let csv_path = temp_dir.path().join("report.csv");
    let json_path = temp_dir.path().join("session.json");

    let mut store = StandardLedger::month();
    store.set_goal("Emergency Fund", 5_000_000)?;
    let exporter = Exporter::new(&store);

    let count = exporter.export_transactions_csv(File::create(&csv_path)?)?;
    assert_eq!(count, 4);
    let rows = read_transactions_csv(File::open(&csv_path)?)?;
    assert_eq!(rows.len(), 4);

    exporter.export_session_json(File::create(&json_path)?)?;
    let snapshot: SessionSnapshot = serde_json::from_reader(File::open(&json_path)?)?;
    assert_eq!(snapshot.transactions, store.transactions());
    assert_eq!(snapshot.goals.len(), 1);
    assert_eq!(snapshot.dashboard.balance, 800_000);
    assert_eq!(snapshot.currency, "Rp");

    Ok(())
}
