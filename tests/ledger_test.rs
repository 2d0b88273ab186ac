mod common;

use common::{parse_date, record, StandardLedger};
use moneymate::application::{LedgerError, LedgerStore, ValidationError};
use moneymate::domain::{parse_amount, Amount, Category, TransactionKind};

#[test]
fn test_empty_ledger() {
    let store = LedgerStore::new();

    assert_eq!(store.balance(), 0);
    assert_eq!(store.total_by_kind(TransactionKind::Income), 0);
    assert_eq!(store.total_by_kind(TransactionKind::Expense), 0);
    assert!(store.expense_by_category().is_empty());
    assert!(store.goal_statuses().is_empty());
}

#[test]
fn test_salary_savings_and_goal_scenario() {
    let mut store = LedgerStore::new();

    store
        .add_transaction(
            TransactionKind::Income,
            Category::Salary,
            5_000_000,
            Some("Monthly salary".into()),
        )
        .unwrap();
    store
        .add_transaction(TransactionKind::Expense, Category::Savings, 1_000_000, None)
        .unwrap();

    assert_eq!(store.balance(), 4_000_000);

    store.set_goal("Emergency Fund", 5_000_000).unwrap();
    assert_eq!(store.goal_progress("Emergency Fund").unwrap(), 20.0);
}

#[test]
fn test_wants_expenses_are_grouped() {
    let mut store = LedgerStore::new();

    store
        .add_transaction(TransactionKind::Expense, Category::Wants, 100_000, None)
        .unwrap();
    store
        .add_transaction(TransactionKind::Expense, Category::Wants, 50_000, None)
        .unwrap();

    assert_eq!(store.expense_by_category()[&Category::Wants], 150_000);
}

#[test]
fn test_zero_amount_is_rejected() {
    let mut store = StandardLedger::month();
    let before = store.len();

    let err = store
        .add_transaction(TransactionKind::Expense, Category::Needs, 0, Some("free".into()))
        .unwrap_err();

    assert_eq!(
        err,
        LedgerError::Validation(ValidationError::NonPositiveAmount(0))
    );
    assert_eq!(store.len(), before);
    assert_eq!(store.balance(), 800_000);
}

#[test]
fn test_balance_equals_income_minus_expense() {
    let mut store = LedgerStore::new();
    let entries: [(TransactionKind, Category, Amount); 8] = [
        (TransactionKind::Income, Category::Salary, 4_500_000),
        (TransactionKind::Expense, Category::Needs, 1_700_000),
        (TransactionKind::Income, Category::Bonus, 250_000),
        (TransactionKind::Expense, Category::Wants, 990_001),
        (TransactionKind::Expense, Category::Other, 1),
        (TransactionKind::Income, Category::Business, 75_050),
        (TransactionKind::Expense, Category::Savings, 3_000_000),
        (TransactionKind::Income, Category::Other, 9),
    ];

    for (kind, category, amount) in entries {
        store.add_transaction(kind, category, amount, None).unwrap();
        assert_eq!(
            store.total_by_kind(TransactionKind::Income)
                - store.total_by_kind(TransactionKind::Expense),
            store.balance()
        );
    }

    // Spending more than earned leaves a negative balance
    assert_eq!(store.balance(), -864_943);
}

#[test]
fn test_invalid_input_never_changes_the_ledger() {
    let mut store = StandardLedger::month();
    let before = store.transactions().to_vec();

    let attempts = [
        (TransactionKind::Expense, Category::Needs, -5),
        (TransactionKind::Income, Category::Salary, 0),
        (TransactionKind::Income, Category::Savings, 100),
        (TransactionKind::Expense, Category::Bonus, 100),
    ];
    for (kind, category, amount) in attempts {
        assert!(store.add_transaction(kind, category, amount, None).is_err());
    }

    assert_eq!(store.transactions(), before.as_slice());
}

#[test]
fn test_expense_by_category_sums_to_total_expense() {
    let store = StandardLedger::month();
    let by_category = store.expense_by_category();

    assert_eq!(by_category.len(), 3);
    assert!(!by_category.contains_key(&Category::Other));
    assert_eq!(
        by_category.values().sum::<Amount>(),
        store.total_by_kind(TransactionKind::Expense)
    );
}

#[test]
fn test_goal_progress_is_monotonic() {
    let mut store = LedgerStore::new();
    store.set_goal("House", 10_000_000).unwrap();

    let mut previous = store.goal_progress("House").unwrap();
    assert_eq!(previous, 0.0);

    for amount in [1, 999_999, 2_500_000, 3, 7_000_000] {
        store
            .add_transaction(TransactionKind::Expense, Category::Savings, amount, None)
            .unwrap();
        // Other spending does not affect the pool
        store
            .add_transaction(TransactionKind::Expense, Category::Wants, amount, None)
            .unwrap();

        let current = store.goal_progress("House").unwrap();
        assert!(current >= previous, "{current} < {previous}");
        previous = current;
    }
}

#[test]
fn test_goals_share_the_savings_pool() {
    let mut store = StandardLedger::month();
    store.set_goal("Vacation", 2_000_000).unwrap();
    store.set_goal("Laptop", 500_000).unwrap();

    assert_eq!(store.goal_progress("Vacation").unwrap(), 50.0);
    // Raw value exceeds 100, the clamped value does not
    assert_eq!(store.goal_progress("Laptop").unwrap(), 200.0);

    let statuses = store.goal_statuses();
    assert_eq!(statuses.len(), 2);
    assert!(statuses.iter().all(|s| s.saved == 1_000_000));
    assert_eq!(statuses[1].name, "Laptop");
    assert_eq!(statuses[1].percentage, 200.0);
    assert_eq!(statuses[1].clamped_percentage(), 100.0);
    assert!(statuses[1].is_reached());
}

#[test]
fn test_display_order_newest_first_with_stable_ties() {
    let mut store = LedgerStore::new();
    record(&mut store, "2024-03-01", TransactionKind::Income, Category::Salary, 1);
    record(&mut store, "2024-03-05", TransactionKind::Expense, Category::Needs, 2);
    record(&mut store, "2024-03-01", TransactionKind::Expense, Category::Wants, 3);
    record(&mut store, "2024-03-05", TransactionKind::Expense, Category::Other, 4);

    let amounts: Vec<Amount> = store
        .transactions_for_display()
        .iter()
        .map(|t| t.amount)
        .collect();
    assert_eq!(amounts, vec![2, 4, 1, 3]);

    // Storage order is untouched
    let stored: Vec<Amount> = store.transactions().iter().map(|t| t.amount).collect();
    assert_eq!(stored, vec![1, 2, 3, 4]);
    assert_eq!(store.transactions()[0].date, parse_date("2024-03-01"));
}

#[test]
fn test_summary_text() {
    let store = StandardLedger::month();
    assert_eq!(
        store.financial_summary_text(),
        "Financial summary: income Rp 50,000.00, expense Rp 42,000.00, balance Rp 8,000.00."
    );
}

#[test]
fn test_dashboard_report() {
    let mut store = StandardLedger::month();
    store.set_goal("Emergency Fund", 5_000_000).unwrap();

    let report = store.dashboard();

    assert_eq!(report.total_income, 5_000_000);
    assert_eq!(report.total_expense, 4_200_000);
    assert_eq!(report.balance, 800_000);
    assert_eq!(report.savings_pool, 1_000_000);
    assert_eq!(report.transaction_count, 4);
    assert_eq!(report.expense_categories[0].category, Category::Needs);
    assert!((report.expense_categories[0].percentage - 47.62).abs() < 0.01);
    assert_eq!(report.goals[0].percentage, 20.0);

    // Needs at 40% of income is the furthest from its 50% share
    let (category, deviation) = report.largest_budget_deviation().unwrap();
    assert_eq!(category, Category::Needs);
    assert!((deviation + 10.0).abs() < 1e-9);
}

#[test]
fn test_totals_never_overflow() {
    let mut store = LedgerStore::new();
    let largest = parse_amount("90,000,000,000,000,000").unwrap();

    store
        .add_transaction(TransactionKind::Income, Category::Salary, largest, None)
        .unwrap();
    let err = store
        .add_transaction(TransactionKind::Income, Category::Salary, largest, None)
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Validation(ValidationError::TotalOverflow { .. })
    ));

    store
        .add_transaction(TransactionKind::Expense, Category::Savings, largest, None)
        .unwrap();
    assert!(store
        .add_transaction(TransactionKind::Expense, Category::Wants, largest, None)
        .is_err());

    let report = store.dashboard();
    assert_eq!(report.total_income, largest);
    assert_eq!(report.total_expense, largest);
    assert_eq!(report.balance, 0);
    assert_eq!(report.savings_pool, largest);
    assert!(store.financial_summary_text().contains("balance Rp 0.00"));
}
