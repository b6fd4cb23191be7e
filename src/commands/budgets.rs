// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::models::Category;
use crate::state::AppState;
use crate::utils::{fmt_amount, fmt_percent, maybe_print_json, parse_decimal, pretty_table};

pub fn handle(state: &mut AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(state, sub)?,
        Some(("list", sub)) => list(state, sub)?,
        Some(("report", sub)) => report(state, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let category: Category = sub.get_one::<String>("category").unwrap().parse()?;
    let limit = parse_decimal(sub.get_one::<String>("limit").unwrap())?;
    state.set_budget(category, limit)?;
    println!("Budget set for {} = {}", category, limit);
    Ok(())
}

fn list(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if !maybe_print_json(json_flag, jsonl_flag, &state.budgets())? {
        let settings = *state.settings();
        let rows: Vec<Vec<String>> = state
            .budgets()
            .iter()
            .map(|b| vec![b.category.to_string(), fmt_amount(&b.limit, &settings)])
            .collect();
        println!("{}", pretty_table(&["Category", "Limit"], rows));
    }
    Ok(())
}

fn report(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let statuses = state.budget_statuses();
    if !maybe_print_json(json_flag, jsonl_flag, &statuses)? {
        let settings = *state.settings();
        let rows: Vec<Vec<String>> = statuses
            .iter()
            .map(|s| {
                vec![
                    s.category.to_string(),
                    fmt_amount(&s.limit, &settings),
                    fmt_amount(&s.spent, &settings),
                    fmt_percent(&s.percentage),
                    fmt_percent(&s.ratio),
                    s.severity.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Category", "Limit", "Spent", "Used", "Raw", "Severity"],
                rows
            )
        );
    }
    Ok(())
}
