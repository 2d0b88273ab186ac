use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::{DashboardReport, LedgerStore};
use crate::domain::{format_amount, Goal, Transaction};

/// Column order of the transaction CSV
pub const TRANSACTION_CSV_HEADER: [&str; 5] = ["date", "kind", "category", "amount", "description"];

/// Full session snapshot for JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub currency: String,
    pub transactions: Vec<Transaction>,
    pub goals: Vec<Goal>,
    pub dashboard: DashboardReport,
}

/// Exporter for converting session data to downloadable formats
pub struct Exporter<'a> {
    store: &'a LedgerStore,
}

impl<'a> Exporter<'a> {
    pub fn new(store: &'a LedgerStore) -> Self {
        Self { store }
    }

    /// Export transactions to CSV, one row per transaction in insertion order.
    pub fn export_transactions_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(TRANSACTION_CSV_HEADER)?;

        let mut count = 0;
        for transaction in self.store.transactions() {
            csv_writer.write_record([
                transaction.date.format("%Y-%m-%d").to_string().as_str(),
                transaction.kind.as_str(),
                transaction.category.as_str(),
                format_amount(transaction.amount).as_str(),
                transaction.description.as_deref().unwrap_or_default(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export transactions as an in-memory CSV byte buffer.
    pub fn transactions_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.export_transactions_csv(&mut buffer)?;
        Ok(buffer)
    }

    /// Export the whole session as a JSON snapshot
    pub fn export_session_json<W: Write>(&self, mut writer: W) -> Result<SessionSnapshot> {
        let snapshot = SessionSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            currency: self.store.currency().to_string(),
            transactions: self.store.transactions().to_vec(),
            goals: self.store.goals().to_vec(),
            dashboard: self.store.dashboard(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}
