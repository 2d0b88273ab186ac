use std::collections::BTreeMap;

use super::{Amount, Category, Transaction, TransactionKind};

/// Sum of all transaction amounts of the given kind.
pub fn total_by_kind(kind: TransactionKind, transactions: &[Transaction]) -> Amount {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

/// Sum of amounts matching both kind and category.
pub fn total_by_kind_and_category(
    kind: TransactionKind,
    category: Category,
    transactions: &[Transaction],
) -> Amount {
    transactions
        .iter()
        .filter(|t| t.kind == kind && t.category == category)
        .map(|t| t.amount)
        .sum()
}

/// Balance = total income - total expense. Not clamped, may be negative.
pub fn compute_balance(transactions: &[Transaction]) -> Amount {
    transactions.iter().fold(0, |balance, t| match t.kind {
        TransactionKind::Income => balance + t.amount,
        TransactionKind::Expense => balance - t.amount,
    })
}

/// Group transactions of one kind by category, summing amounts.
/// Categories without transactions are absent from the map.
pub fn totals_by_category(
    kind: TransactionKind,
    transactions: &[Transaction],
) -> BTreeMap<Category, Amount> {
    let mut totals: BTreeMap<Category, Amount> = BTreeMap::new();

    for transaction in transactions.iter().filter(|t| t.kind == kind) {
        *totals.entry(transaction.category).or_insert(0) += transaction.amount;
    }

    totals
}

/// The pooled savings total every goal is measured against:
/// all expenses booked to the Savings bucket.
pub fn savings_pool(transactions: &[Transaction]) -> Amount {
    total_by_kind_and_category(TransactionKind::Expense, Category::Savings, transactions)
}

/// Raw progress percentage of `saved` towards `target`, unclamped.
pub fn progress_percentage(saved: Amount, target: Amount) -> Result<f64, DivisionError> {
    if target == 0 {
        return Err(DivisionError::ZeroTarget);
    }
    Ok(saved as f64 * 100.0 / target as f64)
}

/// Transactions ordered for display: newest date first, ties kept in
/// insertion order.
pub fn sorted_for_display(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    // sort_by is stable
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivisionError {
    ZeroTarget,
}

impl std::fmt::Display for DivisionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DivisionError::ZeroTarget => write!(f, "cannot compute progress against a zero target"),
        }
    }
}

impl std::error::Error for DivisionError {}
