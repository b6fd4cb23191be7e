// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use findash::models::{
    Account, Budget, Category, Frequency, Goal, Transaction, TransactionType, default_budgets,
};
use findash::store::{CurrencyLabel, Settings, Store};

fn sample_transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 7, 30).unwrap(),
            category: Category::Food,
            description: "Groceries".to_string(),
            amount: Decimal::new(12345, 2),
            r#type: TransactionType::Expense,
            account_id: Account::DebitCard,
            is_recurring: Some(true),
            frequency: Some(Frequency::Weekly),
        },
        Transaction {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            category: Category::Income,
            description: "Salary".to_string(),
            amount: Decimal::new(3000, 0),
            r#type: TransactionType::Income,
            account_id: Account::Savings,
            is_recurring: None,
            frequency: None,
        },
    ]
}

#[test]
fn transactions_round_trip_identically() {
    let store = Store::open_in_memory().unwrap();
    let txs = sample_transactions();
    store.save_transactions(&txs).unwrap();
    let loaded = store.load_transactions().unwrap();
    assert_eq!(loaded, txs);
}

#[test]
fn first_load_of_transactions_is_empty() {
    let store = Store::open_in_memory().unwrap();
    assert!(store.load_transactions().unwrap().is_empty());
}

#[test]
fn budgets_seed_on_first_load() {
    let store = Store::open_in_memory().unwrap();
    let budgets = store.load_budgets().unwrap();
    assert_eq!(budgets, default_budgets());
    assert_eq!(budgets[0].category, Category::Food);
    assert_eq!(budgets[0].limit, Decimal::new(500, 0));
    assert_eq!(budgets[1].category, Category::Transport);
    assert_eq!(budgets[2].category, Category::Shopping);
}

#[test]
fn budget_seed_is_written_back_not_regenerated() {
    let store = Store::open_in_memory().unwrap();
    let first = store.load_budgets().unwrap();
    // Overwrite, then confirm the seed does not come back
    store
        .save_budgets(&[Budget {
            category: Category::Housing,
            limit: Decimal::new(900, 0),
        }])
        .unwrap();
    let second = store.load_budgets().unwrap();
    assert_ne!(first, second);
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].category, Category::Housing);
}

#[test]
fn goals_seed_on_first_load_and_round_trip() {
    let store = Store::open_in_memory().unwrap();
    let goals = store.load_goals().unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].name, "New Car");
    assert_eq!(goals[0].target_amount, Decimal::new(20000, 0));
    assert_eq!(goals[0].current_amount, Decimal::new(5000, 0));

    let custom = vec![Goal {
        id: Uuid::new_v4(),
        name: "Vacation".to_string(),
        target_amount: Decimal::new(2500, 0),
        current_amount: Decimal::new(100, 0),
        deadline: NaiveDate::from_ymd_opt(2026, 6, 1),
    }];
    store.save_goals(&custom).unwrap();
    assert_eq!(store.load_goals().unwrap(), custom);
}

#[test]
fn settings_default_and_round_trip() {
    let store = Store::open_in_memory().unwrap();
    let settings = store.load_settings().unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.currency, CurrencyLabel::Usd);
    assert!(!settings.secure_mode);

    let changed = Settings {
        currency: CurrencyLabel::Brl,
        secure_mode: true,
    };
    store.save_settings(&changed).unwrap();
    assert_eq!(store.load_settings().unwrap(), changed);
}

#[test]
fn persisted_layout_is_a_json_array_of_camel_case_records() {
    let txs = sample_transactions();
    let raw = serde_json::to_value(&txs).unwrap();
    let arr = raw.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert!(arr[0].get("accountId").is_some());
    assert!(arr[0].get("isRecurring").is_some());
    assert_eq!(arr[0]["type"], "expense");
    assert_eq!(arr[0]["accountId"], "Debit Card");
    // Optional fields are omitted when unset
    assert!(arr[1].get("isRecurring").is_none());
    assert!(arr[1].get("frequency").is_none());
}
