use thiserror::Error;

use crate::domain::{Amount, Category, DivisionError, TransactionKind};

/// Input that violates a precondition of a ledger operation.
/// The operation is rejected and the ledger is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Amount must be positive (got {0})")]
    NonPositiveAmount(Amount),

    #[error("Category '{category}' is not valid for {kind} (expected one of: {allowed})")]
    InvalidCategory {
        kind: TransactionKind,
        category: Category,
        allowed: String,
    },

    #[error("Amount {amount} would overflow the {kind} total")]
    TotalOverflow { kind: TransactionKind, amount: Amount },

    #[error("Goal name must not be empty")]
    EmptyGoalName,

    #[error("Goal target must be positive (got {0})")]
    NonPositiveTarget(Amount),
}

impl ValidationError {
    pub(crate) fn invalid_category(kind: TransactionKind, category: Category) -> Self {
        let allowed = kind
            .categories()
            .iter()
            .map(Category::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        ValidationError::InvalidCategory {
            kind,
            category,
            allowed,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Goal not found: {0}")]
    GoalNotFound(String),

    #[error("Goal '{goal}': {source}")]
    Division {
        goal: String,
        #[source]
        source: DivisionError,
    },
}
