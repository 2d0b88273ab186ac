// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use chrono::NaiveDate;
use moneymate::application::LedgerStore;
use moneymate::assistant::AssistantProvider;
use moneymate::cli::{LoopControl, Session};
use moneymate::domain::{Amount, Category, TransactionKind};

/// Helper to parse a date string into a NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Record a transaction on a fixed date, panicking on rejection
pub fn record(
    store: &mut LedgerStore,
    date: &str,
    kind: TransactionKind,
    category: Category,
    amount: Amount,
) {
    store
        .add_transaction_on(parse_date(date), kind, category, amount, None)
        .unwrap();
}

/// Test fixture: a typical month
pub struct StandardLedger;

impl StandardLedger {
    /// Salary 5,000,000 and one expense in each 50/30/20 bucket
    pub fn month() -> LedgerStore {
        let mut store = LedgerStore::new();
        record(&mut store, "2024-01-01", TransactionKind::Income, Category::Salary, 5_000_000);
        record(&mut store, "2024-01-03", TransactionKind::Expense, Category::Needs, 2_000_000);
        record(&mut store, "2024-01-10", TransactionKind::Expense, Category::Wants, 1_200_000);
        record(&mut store, "2024-01-25", TransactionKind::Expense, Category::Savings, 1_000_000);
        store
    }
}

/// Feed lines to a session and collect everything it printed
pub async fn run_lines(session: &mut Session, lines: &[&str]) -> String {
    let mut out = Vec::new();
    for line in lines {
        if session.handle_line(line, &mut out).await.unwrap() == LoopControl::Exit {
            break;
        }
    }
    String::from_utf8(out).unwrap()
}

/// A session backed by the offline echo assistant
pub fn echo_session() -> Session {
    Session::new(
        "Rp",
        AssistantProvider::Echo(moneymate::assistant::providers::echo::EchoProvider),
    )
}
