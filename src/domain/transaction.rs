use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Amount;

pub type TransactionId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in (salary, bonus, ...)
    Income,
    /// Money going out, bucketed by the 50/30/20 rule
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }

    /// Categories a transaction of this kind may carry.
    pub fn categories(&self) -> &'static [Category] {
        match self {
            TransactionKind::Income => &[
                Category::Salary,
                Category::Bonus,
                Category::Business,
                Category::Other,
            ],
            TransactionKind::Expense => &[
                Category::Needs,
                Category::Wants,
                Category::Savings,
                Category::Other,
            ],
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Budgeting bucket. Income and expense share `Other`; the expense buckets
/// follow the 50/30/20 rule (needs / wants / savings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Salary,
    Bonus,
    Business,
    Needs,
    Wants,
    Savings,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Salary => "salary",
            Category::Bonus => "bonus",
            Category::Business => "business",
            Category::Needs => "needs",
            Category::Wants => "wants",
            Category::Savings => "savings",
            Category::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "salary" => Some(Category::Salary),
            "bonus" => Some(Category::Bonus),
            "business" => Some(Category::Business),
            "needs" => Some(Category::Needs),
            "wants" => Some(Category::Wants),
            "savings" => Some(Category::Savings),
            "other" => Some(Category::Other),
            _ => None,
        }
    }

    pub fn is_valid_for(&self, kind: TransactionKind) -> bool {
        kind.categories().contains(self)
    }

    /// Share of income the 50/30/20 rule assigns to this bucket, if any.
    pub fn budget_share(&self) -> Option<u8> {
        match self {
            Category::Needs => Some(50),
            Category::Wants => Some(30),
            Category::Savings => Some(20),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single ledger entry. Transactions are append-only: once stored they are
/// never edited or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    /// Insertion index within the session, assigned by the store
    pub sequence: u64,
    /// Calendar date the transaction was recorded on
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: Category,
    /// Amount in minor units (always positive)
    pub amount: Amount,
    pub description: Option<String>,
}

impl Transaction {
    /// Create a new transaction. Callers validate the amount and category
    /// first; the sequence number is assigned by the store.
    pub fn new(date: NaiveDate, kind: TransactionKind, category: Category, amount: Amount) -> Self {
        debug_assert!(amount > 0, "Transaction amount must be positive");
        Self {
            id: Uuid::new_v4(),
            sequence: 0,
            date,
            kind,
            category,
            amount,
            description: None,
        }
    }

    /// Attach a description. Blank text is treated as no description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        let trimmed = description.trim();
        self.description = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}
