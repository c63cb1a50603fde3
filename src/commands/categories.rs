// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{declined, tx_type_arg};
use crate::ledger::Ledger;
use crate::models::TxType;
use crate::utils::{maybe_print_json, pretty_table, split_icon};
use anyhow::{Context, Result};

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").context("--name is required")?;
            let name = match sub.get_one::<String>("icon").map(|s| s.trim()) {
                Some(icon) if !icon.is_empty() => format!("{} {}", icon, name.trim()),
                _ => name.to_string(),
            };
            let tx_type = tx_type_arg(sub)?.unwrap_or(TxType::Expense);
            match ledger.add_category(&name, tx_type) {
                Ok(id) => println!("Added {} category '{}' (id {})", tx_type, name.trim(), id),
                Err(e) => return declined("category add", e),
            }
        }
        Some(("list", sub)) => {
            let filter = tx_type_arg(sub)?;
            let cats: Vec<_> = ledger
                .categories()
                .iter()
                .filter(|c| filter.is_none_or(|t| c.tx_type == t))
                .collect();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
                let data = cats
                    .iter()
                    .map(|c| {
                        let (icon, label) = split_icon(&c.name);
                        vec![
                            c.id.to_string(),
                            icon.unwrap_or("").to_string(),
                            label.to_string(),
                            c.tx_type.to_string(),
                            if c.is_default { "yes" } else { "" }.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Icon", "Name", "Type", "Default"], data)
                );
            }
        }
        Some(("rename", sub)) => {
            let id = *sub.get_one::<i64>("id").context("--id is required")?;
            let name = sub.get_one::<String>("name").context("--name is required")?;
            match ledger.rename_category(id, name) {
                Ok(()) => println!("Renamed category {} to '{}'", id, name.trim()),
                Err(e) => return declined("category rename", e),
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("--id is required")?;
            match ledger.delete_category(id) {
                Ok(cat) => println!("Removed category '{}'", cat.name),
                Err(e) => return declined("category rm", e),
            }
        }
        _ => {}
    }
    Ok(())
}
