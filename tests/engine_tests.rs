// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use findash::engine::{
    Severity, budget_utilization, category_breakdown, compute_stats, filter_transactions,
    goal_progress, savings_rate, transactions_to_csv,
};
use findash::models::{Account, Budget, Category, Goal, Transaction, TransactionType};

fn tx(
    description: &str,
    category: Category,
    amount: i64,
    r#type: TransactionType,
    account: Account,
) -> Transaction {
    Transaction {
        id: Uuid::new_v4(),
        date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
        category,
        description: description.to_string(),
        amount: Decimal::new(amount, 0),
        r#type,
        account_id: account,
        is_recurring: None,
        frequency: None,
    }
}

#[test]
fn filter_matches_description_and_category_case_insensitively() {
    let txs = vec![
        tx("Groceries run", Category::Food, 40, TransactionType::Expense, Account::Cash),
        tx("Bus pass", Category::Transport, 20, TransactionType::Expense, Account::DebitCard),
        tx("Salary", Category::Income, 900, TransactionType::Income, Account::Savings),
    ];

    let by_desc = filter_transactions(&txs, "GROCER", None);
    assert_eq!(by_desc.len(), 1);
    assert_eq!(by_desc[0].description, "Groceries run");

    // "transport" only appears as a category label
    let by_cat = filter_transactions(&txs, "transport", None);
    assert_eq!(by_cat.len(), 1);
    assert_eq!(by_cat[0].description, "Bus pass");
}

#[test]
fn filter_empty_query_matches_everything_and_preserves_order() {
    let txs = vec![
        tx("a", Category::Food, 1, TransactionType::Expense, Account::Cash),
        tx("b", Category::Other, 2, TransactionType::Expense, Account::Cash),
        tx("c", Category::Housing, 3, TransactionType::Expense, Account::Cash),
    ];
    let all = filter_transactions(&txs, "", None);
    let names: Vec<&str> = all.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn filter_combines_query_with_account() {
    let txs = vec![
        tx("coffee", Category::Food, 5, TransactionType::Expense, Account::Cash),
        tx("coffee beans", Category::Food, 12, TransactionType::Expense, Account::CreditCard),
    ];
    let hit = filter_transactions(&txs, "coffee", Some(Account::CreditCard));
    assert_eq!(hit.len(), 1);
    assert_eq!(hit[0].description, "coffee beans");

    assert!(filter_transactions(&txs, "coffee", Some(Account::Savings)).is_empty());
}

#[test]
fn stats_scenario_from_mixed_ledger() {
    let txs = vec![
        tx("lunch", Category::Food, 100, TransactionType::Expense, Account::Cash),
        tx("refund", Category::Income, 50, TransactionType::Income, Account::Cash),
    ];
    let stats = compute_stats(&txs);
    assert_eq!(stats.income, Decimal::new(50, 0));
    assert_eq!(stats.expenses, Decimal::new(100, 0));
    assert_eq!(stats.balance, Decimal::new(-50, 0));
    assert_eq!(stats.tax_estimate, Decimal::new(8, 0));
    assert_eq!(stats.balance, stats.income - stats.expenses);
}

#[test]
fn stats_on_empty_ledger_are_all_zero() {
    let stats = compute_stats(&[]);
    assert_eq!(stats.income, Decimal::ZERO);
    assert_eq!(stats.expenses, Decimal::ZERO);
    assert_eq!(stats.balance, Decimal::ZERO);
    assert_eq!(stats.tax_estimate, Decimal::ZERO);
}

#[test]
fn tax_estimate_is_exactly_eight_percent_of_expenses() {
    let txs = vec![
        tx("a", Category::Shopping, 37, TransactionType::Expense, Account::Cash),
        tx("b", Category::Food, 63, TransactionType::Expense, Account::Cash),
    ];
    let stats = compute_stats(&txs);
    assert_eq!(stats.tax_estimate, stats.expenses * Decimal::new(8, 2));
}

#[test]
fn savings_rate_guards_zero_income() {
    let stats = compute_stats(&[tx(
        "rent",
        Category::Housing,
        800,
        TransactionType::Expense,
        Account::DebitCard,
    )]);
    assert_eq!(savings_rate(&stats), Decimal::ZERO);

    let stats = compute_stats(&[
        tx("pay", Category::Income, 200, TransactionType::Income, Account::Savings),
        tx("food", Category::Food, 50, TransactionType::Expense, Account::Cash),
    ]);
    assert_eq!(savings_rate(&stats), Decimal::new(75, 0));
}

#[test]
fn breakdown_groups_expenses_in_first_occurrence_order() {
    let txs = vec![
        tx("bus", Category::Transport, 10, TransactionType::Expense, Account::Cash),
        tx("lunch", Category::Food, 30, TransactionType::Expense, Account::Cash),
        tx("salary", Category::Income, 500, TransactionType::Income, Account::Savings),
        tx("train", Category::Transport, 15, TransactionType::Expense, Account::Cash),
    ];
    let groups = category_breakdown(&txs);
    assert_eq!(
        groups,
        vec![
            (Category::Transport, Decimal::new(25, 0)),
            (Category::Food, Decimal::new(30, 0)),
        ]
    );
}

#[test]
fn budget_percentage_clamps_but_ratio_does_not() {
    let budgets = vec![Budget {
        category: Category::Food,
        limit: Decimal::new(80, 0),
    }];
    let txs = vec![tx("feast", Category::Food, 100, TransactionType::Expense, Account::Cash)];
    let statuses = budget_utilization(&budgets, &txs);
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].spent, Decimal::new(100, 0));
    assert_eq!(statuses[0].percentage, Decimal::new(100, 0));
    assert_eq!(statuses[0].ratio, Decimal::new(125, 0));
    assert_eq!(statuses[0].severity, Severity::Critical);
}

#[test]
fn budget_with_no_spend_reads_zero() {
    let budgets = vec![Budget {
        category: Category::Shopping,
        limit: Decimal::new(400, 0),
    }];
    let statuses = budget_utilization(&budgets, &[]);
    assert_eq!(statuses[0].spent, Decimal::ZERO);
    assert_eq!(statuses[0].percentage, Decimal::ZERO);
    assert_eq!(statuses[0].severity, Severity::Normal);
}

#[test]
fn budget_percentage_is_monotonic_below_the_cap() {
    let budgets = vec![Budget {
        category: Category::Food,
        limit: Decimal::new(200, 0),
    }];
    let mut last = Decimal::ZERO;
    for spend in [10, 50, 120, 199] {
        let txs = vec![tx("meal", Category::Food, spend, TransactionType::Expense, Account::Cash)];
        let p = budget_utilization(&budgets, &txs)[0].percentage;
        assert!(p > last, "{} should exceed {}", p, last);
        last = p;
    }
}

#[test]
fn budget_severity_bands() {
    let budgets = vec![Budget {
        category: Category::Food,
        limit: Decimal::new(100, 0),
    }];
    let case = |spend: i64| {
        let txs = vec![tx("meal", Category::Food, spend, TransactionType::Expense, Account::Cash)];
        budget_utilization(&budgets, &txs)[0].severity
    };
    assert_eq!(case(70), Severity::Normal);
    assert_eq!(case(71), Severity::Warning);
    assert_eq!(case(90), Severity::Warning);
    assert_eq!(case(91), Severity::Critical);
}

#[test]
fn budget_ignores_search_irrelevant_types_and_categories() {
    let budgets = vec![Budget {
        category: Category::Food,
        limit: Decimal::new(100, 0),
    }];
    let txs = vec![
        tx("salary", Category::Food, 500, TransactionType::Income, Account::Savings),
        tx("bus", Category::Transport, 20, TransactionType::Expense, Account::Cash),
        tx("lunch", Category::Food, 40, TransactionType::Expense, Account::Cash),
    ];
    let statuses = budget_utilization(&budgets, &txs);
    assert_eq!(statuses[0].spent, Decimal::new(40, 0));
}

#[test]
fn goal_progress_endpoints_and_overshoot() {
    let mut goal = Goal {
        id: Uuid::new_v4(),
        name: "Trip".to_string(),
        target_amount: Decimal::new(1000, 0),
        current_amount: Decimal::ZERO,
        deadline: None,
    };
    assert_eq!(goal_progress(&goal), Decimal::ZERO);

    goal.current_amount = Decimal::new(1000, 0);
    assert_eq!(goal_progress(&goal), Decimal::new(100, 0));

    goal.current_amount = Decimal::new(1500, 0);
    assert_eq!(goal_progress(&goal), Decimal::new(150, 0));
}

#[test]
fn goal_progress_guards_zero_target() {
    let goal = Goal {
        id: Uuid::new_v4(),
        name: "Broken".to_string(),
        target_amount: Decimal::ZERO,
        current_amount: Decimal::new(50, 0),
        deadline: None,
    };
    assert_eq!(goal_progress(&goal), Decimal::ZERO);
}

#[test]
fn csv_has_fixed_header_and_store_order() {
    let txs = vec![
        tx("coffee", Category::Food, 5, TransactionType::Expense, Account::Cash),
        tx("salary", Category::Income, 900, TransactionType::Income, Account::Savings),
    ];
    let out = transactions_to_csv(&txs).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "Date,Description,Category,Amount,Type,Account");
    assert_eq!(lines[1], "2025-08-01,coffee,Food,5,expense,Cash");
    assert_eq!(lines[2], "2025-08-01,salary,Income,900,income,Savings");
}

#[test]
fn csv_export_is_idempotent() {
    let txs = vec![tx("coffee", Category::Food, 5, TransactionType::Expense, Account::Cash)];
    let a = transactions_to_csv(&txs).unwrap();
    let b = transactions_to_csv(&txs).unwrap();
    assert_eq!(a, b);
}

#[test]
fn csv_quotes_embedded_commas() {
    let txs = vec![tx(
        "Dinner, drinks",
        Category::Entertainment,
        60,
        TransactionType::Expense,
        Account::CreditCard,
    )];
    let out = transactions_to_csv(&txs).unwrap();
    assert!(out.contains("\"Dinner, drinks\""));
    // Still six columns when parsed back
    let mut rdr = csv::Reader::from_reader(out.as_bytes());
    let record = rdr.records().next().unwrap().unwrap();
    assert_eq!(record.len(), 6);
    assert_eq!(&record[1], "Dinner, drinks");
}
