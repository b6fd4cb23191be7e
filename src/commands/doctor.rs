// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;

use anyhow::Result;
use rust_decimal::Decimal;

use crate::state::AppState;
use crate::utils::pretty_table;

pub fn handle(state: &AppState) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Duplicate transaction ids
    let mut seen = HashSet::new();
    for t in state.transactions() {
        if !seen.insert(t.id) {
            rows.push(vec!["duplicate_tx_id".into(), t.id.to_string()]);
        }
    }

    // 2) Negative amounts (sign belongs to the type, never the magnitude)
    for t in state.transactions() {
        if t.amount < Decimal::ZERO {
            rows.push(vec![
                "negative_amount".into(),
                format!("{} {}", t.id, t.amount),
            ]);
        }
    }

    // 3) Duplicate budget categories (category is the key)
    let mut cats = HashSet::new();
    for b in state.budgets() {
        if !cats.insert(b.category) {
            rows.push(vec!["duplicate_budget".into(), b.category.to_string()]);
        }
    }
    for b in state.budgets() {
        if b.limit <= Decimal::ZERO {
            rows.push(vec![
                "non_positive_limit".into(),
                format!("{} {}", b.category, b.limit),
            ]);
        }
    }

    // 4) Degenerate goals
    for g in state.goals() {
        if g.target_amount <= Decimal::ZERO {
            rows.push(vec![
                "non_positive_target".into(),
                format!("{} '{}'", g.id, g.name),
            ]);
        }
        if g.current_amount < Decimal::ZERO {
            rows.push(vec![
                "negative_goal_progress".into(),
                format!("{} '{}'", g.id, g.name),
            ]);
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
