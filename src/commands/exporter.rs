// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use serde_json::json;
use tracing::info;

use crate::ledger::Ledger;

pub fn handle(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(ledger, sub),
        _ => Ok(()),
    }
}

fn export_transactions(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "csv".to_string());
    let out = sub.get_one::<String>("out").context("--out is required")?;

    let mut txs: Vec<_> = ledger.transactions().iter().collect();
    txs.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Create export file {}", out))?;
            wtr.write_record([
                "id", "date", "type", "amount", "category", "profile", "memo",
            ])?;
            for t in &txs {
                wtr.write_record([
                    t.id.to_string(),
                    t.date.to_string(),
                    t.tx_type.to_string(),
                    t.amount.to_string(),
                    ledger.category_name(t.category_id).to_string(),
                    ledger.profile_name(t.profile_id).to_string(),
                    t.memo.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = txs
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "date": t.date,
                        "type": t.tx_type,
                        "amount": t.amount,
                        "category_id": t.category_id,
                        "category": ledger.category_name(t.category_id),
                        "profile_id": t.profile_id,
                        "profile": ledger.profile_name(t.profile_id),
                        "memo": t.memo,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Write export file {}", out))?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    info!(count = txs.len(), %fmt, out = %out, "transactions exported");
    println!("Exported {} transactions to {}", txs.len(), out);
    Ok(())
}
