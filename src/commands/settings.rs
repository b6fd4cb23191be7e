// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};

use crate::state::AppState;
use crate::store::CurrencyLabel;

pub fn handle(state: &mut AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("currency", sub)) => {
            let label: CurrencyLabel = sub.get_one::<String>("label").unwrap().parse()?;
            state.set_currency_label(label)?;
            println!("Display currency set to {}", label);
        }
        Some(("secure-mode", sub)) => {
            let on = match sub.get_one::<String>("state").unwrap().to_lowercase().as_str() {
                "on" | "true" => true,
                "off" | "false" => false,
                other => bail!("Invalid secure-mode state '{}', expected on or off", other),
            };
            state.set_secure_mode(on)?;
            println!("Secure mode {}", if on { "enabled" } else { "disabled" });
        }
        Some(("show", _)) => {
            let s = state.settings();
            println!("currency: {}", s.currency);
            println!("secure-mode: {}", if s.secure_mode { "on" } else { "off" });
        }
        _ => {}
    }
    Ok(())
}
