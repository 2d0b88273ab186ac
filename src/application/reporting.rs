use serde::{Deserialize, Serialize};

use crate::domain::{Amount, Category, GoalStatus};

/// Every figure the dashboard shows, derived from the ledger on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    pub total_income: Amount,
    pub total_expense: Amount,
    pub balance: Amount,
    pub savings_pool: Amount,
    pub transaction_count: usize,
    /// Expense allocation, largest bucket first
    pub expense_categories: Vec<CategorySummary>,
    pub goals: Vec<GoalStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: Category,
    pub total: Amount,
    pub count: usize,
    /// Share of total expense
    pub percentage: f64,
}

impl DashboardReport {
    /// The category whose actual share of income deviates the most from its
    /// 50/30/20 allotment, with the signed deviation in percentage points.
    pub fn largest_budget_deviation(&self) -> Option<(Category, f64)> {
        if self.total_income <= 0 {
            return None;
        }

        [Category::Needs, Category::Wants, Category::Savings]
            .into_iter()
            .filter_map(|category| {
                let share = f64::from(category.budget_share()?);
                let spent = self
                    .expense_categories
                    .iter()
                    .find(|c| c.category == category)
                    .map(|c| c.total)
                    .unwrap_or(0);
                let actual = spent as f64 * 100.0 / self.total_income as f64;
                Some((category, actual - share))
            })
            .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
    }
}
