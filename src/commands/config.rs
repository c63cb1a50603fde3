// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::OrphanPolicy;
use anyhow::{Context, Result};

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", _)) => {
            println!("orphan-policy = {}", ledger.orphan_policy());
        }
        Some(("set", sub)) => {
            let value = sub.get_one::<String>("value").context("value is required")?;
            let policy: OrphanPolicy = value.parse()?;
            ledger.set_orphan_policy(policy);
            println!("orphan-policy = {}", policy);
        }
        _ => {}
    }
    Ok(())
}
