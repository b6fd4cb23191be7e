// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::engine::transactions_to_csv;
use crate::state::AppState;

pub fn handle(state: &AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(state, sub),
        _ => Ok(()),
    }
}

fn export_transactions(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub.get_one::<String>("out").unwrap();
    let csv = transactions_to_csv(state.transactions())?;
    std::fs::write(out, csv).with_context(|| format!("Write CSV to {}", out))?;
    println!("Exported transactions to {}", out);
    Ok(())
}
