// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::engine::goal_progress;
use crate::state::AppState;
use crate::utils::{fmt_amount, fmt_percent, maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(state: &mut AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(state, sub)?,
        Some(("list", sub)) => list(state, sub)?,
        Some(("set-current", sub)) => set_current(state, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().to_string();
    let target = parse_decimal(sub.get_one::<String>("target").unwrap())?;
    let deadline = match sub.get_one::<String>("deadline") {
        Some(s) => Some(parse_date(s)?),
        None => None,
    };
    let id = state.add_goal(name.clone(), target, deadline)?;
    println!("Goal '{}' added with id {}", name, id);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GoalRow {
    id: Uuid,
    name: String,
    target_amount: Decimal,
    current_amount: Decimal,
    percentage: Decimal,
    deadline: Option<chrono::NaiveDate>,
}

fn list(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data: Vec<GoalRow> = state
        .goals()
        .iter()
        .map(|g| GoalRow {
            id: g.id,
            name: g.name.clone(),
            target_amount: g.target_amount,
            current_amount: g.current_amount,
            percentage: goal_progress(g),
            deadline: g.deadline,
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let settings = *state.settings();
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|g| {
                vec![
                    g.id.to_string(),
                    g.name.clone(),
                    fmt_amount(&g.target_amount, &settings),
                    fmt_amount(&g.current_amount, &settings),
                    fmt_percent(&g.percentage),
                    g.deadline.map(|d| d.to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Name", "Target", "Current", "Progress", "Deadline"],
                rows
            )
        );
    }
    Ok(())
}

fn set_current(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let raw = sub.get_one::<String>("id").unwrap();
    let id = Uuid::parse_str(raw).with_context(|| format!("Invalid goal id '{}'", raw))?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    state.set_goal_current(id, amount)?;
    println!("Goal {} progress set to {}", id, amount);
    Ok(())
}
