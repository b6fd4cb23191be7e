// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use findash::state::AppState;
use findash::store::Store;
use findash::{cli, commands, store};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut state = AppState::load(Store::open_or_init()?)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Store initialized at {}", store::store_path()?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut state, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut state, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&mut state, sub)?,
        Some(("report", sub)) => commands::reports::handle(&state, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&state, sub)?,
        Some(("advice", sub)) => commands::advice::handle(&mut state, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&mut state, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&state)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
