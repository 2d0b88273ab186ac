use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::domain::{
    compute_balance, format_amount_grouped, progress_percentage, savings_pool, sorted_for_display,
    total_by_kind, totals_by_category, Amount, Category, Goal, GoalStatus, Transaction,
    TransactionKind,
};

use super::reporting::{CategorySummary, DashboardReport};
use super::{LedgerError, ValidationError};

pub const DEFAULT_CURRENCY: &str = "Rp";

/// In-memory ledger for one session.
/// This is the primary interface for any client (CLI shell, tests, ...).
/// It is created empty and dropped with the session; nothing is persisted.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    transactions: Vec<Transaction>,
    // Insertion-ordered registry; names are unique
    goals: Vec<Goal>,
    currency: String,
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::with_currency(DEFAULT_CURRENCY)
    }

    /// Create an empty store whose summary text uses the given currency label.
    pub fn with_currency(currency: impl Into<String>) -> Self {
        Self {
            transactions: Vec::new(),
            goals: Vec::new(),
            currency: currency.into(),
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    // ========================
    // Transaction operations
    // ========================

    /// Record a transaction dated today.
    pub fn add_transaction(
        &mut self,
        kind: TransactionKind,
        category: Category,
        amount: Amount,
        description: Option<String>,
    ) -> Result<Transaction, LedgerError> {
        let today = Local::now().date_naive();
        self.add_transaction_on(today, kind, category, amount, description)
    }

    /// Record a transaction with an explicit date.
    pub fn add_transaction_on(
        &mut self,
        date: NaiveDate,
        kind: TransactionKind,
        category: Category,
        amount: Amount,
        description: Option<String>,
    ) -> Result<Transaction, LedgerError> {
        if amount <= 0 {
            debug!(amount, %kind, "rejected non-positive amount");
            return Err(ValidationError::NonPositiveAmount(amount).into());
        }
        if !category.is_valid_for(kind) {
            debug!(%kind, %category, "rejected category");
            return Err(ValidationError::invalid_category(kind, category).into());
        }
        // Every other aggregate is bounded by the per-kind totals
        if self.total_by_kind(kind).checked_add(amount).is_none() {
            debug!(amount, %kind, "rejected amount overflowing total");
            return Err(ValidationError::TotalOverflow { kind, amount }.into());
        }

        let mut transaction = Transaction::new(date, kind, category, amount);
        if let Some(desc) = description {
            transaction = transaction.with_description(desc);
        }
        transaction.sequence = self.transactions.len() as u64;

        info!(
            id = %transaction.id,
            sequence = transaction.sequence,
            %kind,
            %category,
            amount,
            "transaction recorded"
        );

        self.transactions.push(transaction.clone());
        Ok(transaction)
    }

    /// All transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Transactions ordered for display: newest date first, ties in insertion order.
    pub fn transactions_for_display(&self) -> Vec<&Transaction> {
        sorted_for_display(&self.transactions)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    // ========================
    // Goal operations
    // ========================

    /// Create a goal, or replace the target of an existing one.
    pub fn set_goal(&mut self, name: &str, target: Amount) -> Result<Goal, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyGoalName.into());
        }
        if target <= 0 {
            return Err(ValidationError::NonPositiveTarget(target).into());
        }

        let goal = Goal::new(name, target);
        match self.goals.iter_mut().find(|g| g.name == name) {
            Some(existing) => {
                info!(goal = name, target, previous = existing.target, "goal updated");
                *existing = goal.clone();
            }
            None => {
                info!(goal = name, target, "goal created");
                self.goals.push(goal.clone());
            }
        }

        Ok(goal)
    }

    /// Look up a goal by name, trimmed the same way `set_goal` trims it.
    pub fn get_goal(&self, name: &str) -> Result<&Goal, LedgerError> {
        let name = name.trim();
        self.goals
            .iter()
            .find(|g| g.name == name)
            .ok_or_else(|| LedgerError::GoalNotFound(name.to_string()))
    }

    /// Goals in the order they were first set.
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Raw progress percentage of a goal against the savings pool.
    /// Not clamped: over-saving yields values above 100.
    pub fn goal_progress(&self, name: &str) -> Result<f64, LedgerError> {
        let goal = self.get_goal(name)?;
        progress_percentage(self.savings_pool(), goal.target).map_err(|source| {
            LedgerError::Division {
                goal: goal.name.clone(),
                source,
            }
        })
    }

    /// Progress rows for every goal. Goals whose progress cannot be computed
    /// report 0%.
    pub fn goal_statuses(&self) -> Vec<GoalStatus> {
        let saved = self.savings_pool();
        self.goals
            .iter()
            .map(|goal| GoalStatus {
                name: goal.name.clone(),
                target: goal.target,
                saved,
                percentage: progress_percentage(saved, goal.target).unwrap_or(0.0),
            })
            .collect()
    }

    // ========================
    // Aggregates
    // ========================

    pub fn total_by_kind(&self, kind: TransactionKind) -> Amount {
        total_by_kind(kind, &self.transactions)
    }

    pub fn balance(&self) -> Amount {
        compute_balance(&self.transactions)
    }

    /// Expense totals per category; categories without expenses are omitted.
    pub fn expense_by_category(&self) -> BTreeMap<Category, Amount> {
        totals_by_category(TransactionKind::Expense, &self.transactions)
    }

    /// Sum of all Savings expenses, shared by every goal.
    pub fn savings_pool(&self) -> Amount {
        savings_pool(&self.transactions)
    }

    /// One-line summary of the ledger for the assistant prompt.
    /// Depends only on stored state.
    pub fn financial_summary_text(&self) -> String {
        if self.is_empty() {
            return "No financial data recorded yet.".to_string();
        }

        let income = self.total_by_kind(TransactionKind::Income);
        let expense = self.total_by_kind(TransactionKind::Expense);
        format!(
            "Financial summary: income {cur} {}, expense {cur} {}, balance {cur} {}.",
            format_amount_grouped(income),
            format_amount_grouped(expense),
            format_amount_grouped(income - expense),
            cur = self.currency,
        )
    }

    // ========================
    // Reporting
    // ========================

    /// Snapshot of every dashboard figure.
    pub fn dashboard(&self) -> DashboardReport {
        let total_expense = self.total_by_kind(TransactionKind::Expense);

        let mut expense_categories: Vec<CategorySummary> = self
            .expense_by_category()
            .into_iter()
            .map(|(category, total)| {
                let count = self
                    .transactions
                    .iter()
                    .filter(|t| t.is_expense() && t.category == category)
                    .count();
                let percentage = if total_expense > 0 {
                    (total as f64 / total_expense as f64) * 100.0
                } else {
                    0.0
                };
                CategorySummary {
                    category,
                    total,
                    count,
                    percentage,
                }
            })
            .collect();

        // Largest bucket first
        expense_categories.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.category.as_str().cmp(b.category.as_str()))
        });

        DashboardReport {
            total_income: self.total_by_kind(TransactionKind::Income),
            total_expense,
            balance: self.balance(),
            savings_pool: self.savings_pool(),
            transaction_count: self.len(),
            expense_categories,
            goals: self.goal_statuses(),
        }
    }
}
