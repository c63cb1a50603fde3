// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use crate::commands::declined;
use crate::ledger::Ledger;
use crate::utils::{image_data_url, maybe_print_json, pretty_table};
use anyhow::{Context, Result};

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").context("--name is required")?;
            match ledger.add_profile(name) {
                Ok(id) => println!("Added profile '{}' (id {})", name.trim(), id),
                Err(e) => return declined("profile add", e),
            }
        }
        Some(("list", sub)) => {
            if !maybe_print_json(
                sub.get_flag("json"),
                sub.get_flag("jsonl"),
                &ledger.profiles(),
            )? {
                let data = ledger
                    .profiles()
                    .iter()
                    .map(|p| {
                        vec![
                            p.id.to_string(),
                            p.name.clone(),
                            p.color.clone(),
                            if p.image.is_some() { "yes" } else { "" }.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Name", "Color", "Image"], data)
                );
            }
        }
        Some(("rename", sub)) => {
            let id = *sub.get_one::<i64>("id").context("--id is required")?;
            let name = sub.get_one::<String>("name").context("--name is required")?;
            match ledger.rename_profile(id, name) {
                Ok(()) => println!("Renamed profile {} to '{}'", id, name.trim()),
                Err(e) => return declined("profile rename", e),
            }
        }
        Some(("set-image", sub)) => {
            let id = *sub.get_one::<i64>("id").context("--id is required")?;
            let file = sub
                .get_one::<PathBuf>("file")
                .context("--file is required")?;
            let url = image_data_url(file)?;
            match ledger.set_profile_image(id, Some(url)) {
                Ok(()) => println!("Set image for profile {} from {}", id, file.display()),
                Err(e) => return declined("profile set-image", e),
            }
        }
        Some(("clear-image", sub)) => {
            let id = *sub.get_one::<i64>("id").context("--id is required")?;
            match ledger.set_profile_image(id, None) {
                Ok(()) => println!("Cleared image for profile {}", id),
                Err(e) => return declined("profile clear-image", e),
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("--id is required")?;
            match ledger.delete_profile(id) {
                Ok(p) => println!("Removed profile '{}'", p.name),
                Err(e) => return declined("profile rm", e),
            }
        }
        _ => {}
    }
    Ok(())
}
