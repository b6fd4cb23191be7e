// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::Local;
use uuid::Uuid;

use crate::models::{Account, Category, Frequency, NewTransaction, TransactionType};
use crate::state::AppState;
use crate::utils::{fmt_amount, maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(state: &mut AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(state, sub)?,
        Some(("list", sub)) => list(state, sub)?,
        Some(("delete", sub)) => delete(state, sub)?,
        Some(("clear", sub)) => clear(state, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let category: Category = sub.get_one::<String>("category").unwrap().parse()?;
    let r#type: TransactionType = sub.get_one::<String>("type").unwrap().parse()?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };
    let description = sub.get_one::<String>("description").map(|s| s.to_string());
    let account: Account = sub.get_one::<String>("account").unwrap().parse()?;
    let recurring = sub.get_flag("recurring");
    let frequency = if recurring {
        match sub.get_one::<String>("frequency") {
            Some(s) => s.parse::<Frequency>()?,
            None => Frequency::Monthly,
        }
    } else {
        Frequency::Once
    };

    let id = state.add_transaction(NewTransaction {
        date,
        category,
        description,
        amount,
        r#type,
        account_id: account,
        is_recurring: Some(recurring),
        frequency: Some(frequency),
    })?;
    println!(
        "Recorded {} {} of {} in {} on {} ({})",
        r#type, id, amount, category, date, account
    );
    Ok(())
}

fn list(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if let Some(q) = sub.get_one::<String>("query") {
        state.set_query(q.clone());
    }
    if let Some(acct) = sub.get_one::<String>("account") {
        state.set_account_filter(Some(acct.parse()?));
    }
    let mut data = state.filtered();
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let settings = *state.settings();
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.date.to_string(),
                    t.description.clone(),
                    t.category.to_string(),
                    fmt_amount(&t.amount, &settings),
                    t.r#type.to_string(),
                    t.account_id.to_string(),
                    match t.frequency {
                        Some(f) if t.is_recurring == Some(true) => f.to_string(),
                        _ => String::new(),
                    },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Description", "Category", "Amount", "Type", "Account", "Repeats"],
                rows,
            )
        );
    }
    Ok(())
}

fn delete(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let raw = sub.get_one::<String>("id").unwrap();
    let id = Uuid::parse_str(raw).with_context(|| format!("Invalid transaction id '{}'", raw))?;
    state.delete_transaction(id)?;
    println!("Deleted {}", id);
    Ok(())
}

fn clear(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    if !sub.get_flag("yes") {
        println!("Refusing to clear the ledger without --yes; this cannot be undone.");
        return Ok(());
    }
    let removed = state.clear_transactions()?;
    println!("Removed {} entries", removed);
    Ok(())
}
