// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::engine::{self, savings_rate};
use crate::models::Transaction;
use crate::state::AppState;
use crate::utils::{fmt_amount, fmt_percent, maybe_print_json, pretty_table};

pub fn handle(state: &AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(state, sub)?,
        Some(("by-category", sub)) => by_category(state, sub)?,
        _ => {}
    }
    Ok(())
}

fn filtered_view(state: &AppState, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let query = sub.get_one::<String>("query").map(String::as_str).unwrap_or("");
    let account = match sub.get_one::<String>("account") {
        Some(s) => Some(s.parse()?),
        None => None,
    };
    Ok(engine::filter_transactions(
        state.transactions(),
        query,
        account,
    ))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    income: Decimal,
    expenses: Decimal,
    balance: Decimal,
    tax_estimate: Decimal,
    savings_rate: Decimal,
}

fn summary(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let view = filtered_view(state, sub)?;
    let stats = engine::compute_stats(&view);
    let data = Summary {
        income: stats.income,
        expenses: stats.expenses,
        balance: stats.balance,
        tax_estimate: stats.tax_estimate,
        savings_rate: savings_rate(&stats),
    };
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let settings = *state.settings();
        let rows = vec![
            vec!["Income".to_string(), fmt_amount(&data.income, &settings)],
            vec!["Expenses".to_string(), fmt_amount(&data.expenses, &settings)],
            vec!["Balance".to_string(), fmt_amount(&data.balance, &settings)],
            vec![
                "Tax estimate (8%)".to_string(),
                fmt_amount(&data.tax_estimate, &settings),
            ],
            vec![
                "Savings rate".to_string(),
                fmt_percent(&data.savings_rate),
            ],
        ];
        println!("{}", pretty_table(&["Metric", "Value"], rows));
    }
    Ok(())
}

#[derive(Serialize)]
struct CategoryRow {
    category: String,
    total: Decimal,
}

fn by_category(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let view = filtered_view(state, sub)?;
    let data: Vec<CategoryRow> = engine::category_breakdown(&view)
        .into_iter()
        .map(|(category, total)| CategoryRow {
            category: category.to_string(),
            total,
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let settings = *state.settings();
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| vec![r.category.clone(), fmt_amount(&r.total, &settings)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}
