// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::tempdir;

use findash::models::{Account, Category, NewTransaction, TransactionType};
use findash::state::AppState;
use findash::store::Store;
use findash::{cli, commands};

fn state_with_one_entry() -> AppState {
    let mut state = AppState::load(Store::open_in_memory().unwrap()).unwrap();
    state
        .add_transaction(NewTransaction {
            date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            category: Category::Food,
            description: Some("Corner Shop".to_string()),
            amount: Decimal::new(1234, 2),
            r#type: TransactionType::Expense,
            account_id: Account::DebitCard,
            is_recurring: None,
            frequency: None,
        })
        .unwrap();
    state
}

#[test]
fn export_writes_the_csv_projection() {
    let state = state_with_one_entry();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches =
        cli.get_matches_from(["findash", "export", "transactions", "--out", &out_str]);
    if let Some(("export", export_m)) = matches.subcommand() {
        commands::exporter::handle(&state, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "Date,Description,Category,Amount,Type,Account");
    assert_eq!(lines[1], "2025-01-02,Corner Shop,Food,12.34,expense,Debit Card");
    assert_eq!(lines.len(), 2);
}

#[test]
fn exporting_twice_is_byte_identical() {
    let state = state_with_one_entry();
    let dir = tempdir().unwrap();
    let first = dir.path().join("a.csv");
    let second = dir.path().join("b.csv");

    for path in [&first, &second] {
        let out_str = path.to_string_lossy().to_string();
        let matches = cli::build_cli().get_matches_from([
            "findash",
            "export",
            "transactions",
            "--out",
            &out_str,
        ]);
        if let Some(("export", export_m)) = matches.subcommand() {
            commands::exporter::handle(&state, export_m).unwrap();
        } else {
            panic!("no export subcommand");
        }
    }

    assert_eq!(
        std::fs::read(&first).unwrap(),
        std::fs::read(&second).unwrap()
    );
}
