use chrono::NaiveDate;
use std::io::Read;
use thiserror::Error;

use crate::domain::{parse_amount, Amount, Category, TransactionKind};

use super::export::TRANSACTION_CSV_HEADER;

/// One row of an exported transaction CSV
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTransaction {
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: Category,
    pub amount: Amount,
    pub description: Option<String>,
}

/// Error that occurred while reading a transaction CSV
#[derive(Error, Debug)]
#[error("line {line}{}: {message}", .field.as_ref().map(|f| format!(" ({f})")).unwrap_or_default())]
pub struct ImportError {
    pub line: usize,
    pub field: Option<String>,
    pub message: String,
}

impl ImportError {
    fn new(line: usize, field: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            line,
            field: field.map(str::to_string),
            message: message.into(),
        }
    }
}

/// Read rows written by `Exporter::export_transactions_csv`, in file order.
/// Stops at the first malformed row.
pub fn read_transactions_csv<R: Read>(reader: R) -> Result<Vec<CsvTransaction>, ImportError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| ImportError::new(1, None, format!("CSV parse error: {e}")))?;
    if headers.iter().ne(TRANSACTION_CSV_HEADER) {
        return Err(ImportError::new(
            1,
            None,
            format!("unexpected header, expected: {}", TRANSACTION_CSV_HEADER.join(",")),
        ));
    }

    let mut rows = Vec::new();
    for (line_num, result) in csv_reader.records().enumerate() {
        let line = line_num + 2; // +2 for header and 0-indexing

        let record =
            result.map_err(|e| ImportError::new(line, None, format!("CSV parse error: {e}")))?;
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let date = NaiveDate::parse_from_str(field(0), "%Y-%m-%d")
            .map_err(|e| ImportError::new(line, Some("date"), format!("invalid date: {e}")))?;

        let kind = TransactionKind::from_str(field(1)).ok_or_else(|| {
            ImportError::new(line, Some("kind"), format!("unknown kind '{}'", field(1)))
        })?;

        let category = Category::from_str(field(2)).ok_or_else(|| {
            ImportError::new(line, Some("category"), format!("unknown category '{}'", field(2)))
        })?;
        if !category.is_valid_for(kind) {
            return Err(ImportError::new(
                line,
                Some("category"),
                format!("category '{category}' is not valid for {kind}"),
            ));
        }

        let amount = parse_amount(field(3))
            .map_err(|e| ImportError::new(line, Some("amount"), format!("invalid amount: {e}")))?;

        let description = match field(4) {
            "" => None,
            s => Some(s.to_string()),
        };

        rows.push(CsvTransaction {
            date,
            kind,
            category,
            amount,
            description,
        });
    }

    Ok(rows)
}
