// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::advice::AdviceClient;
use crate::state::AppState;

pub fn handle(state: &mut AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("insight", _)) => insight(state)?,
        Some(("scan-receipt", sub)) => scan_receipt(state, sub)?,
        _ => {}
    }
    Ok(())
}

fn insight(state: &mut AppState) -> Result<()> {
    let client = AdviceClient::from_env()?;
    let text = state.fetch_insight(&client)?;
    println!("{}", text);
    Ok(())
}

fn scan_receipt(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("image").unwrap();
    let bytes = std::fs::read(path).with_context(|| format!("Read image {}", path))?;
    let client = AdviceClient::from_env()?;
    match state.scan_receipt(&client, &STANDARD.encode(bytes))? {
        Some(id) => println!("Recorded scanned transaction {}", id),
        None => println!("No transaction created from receipt."),
    }
    Ok(())
}
