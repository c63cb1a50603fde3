// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{declined, tx_type_arg};
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::{FixedDay, NewFixedItem, TxType};
use crate::utils::{
    format_amount, id_for_category, id_for_profile, maybe_print_json, parse_amount, pretty_table,
};
use anyhow::{Context, Result};

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("edit", sub)) => edit(ledger, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("--id is required")?;
            match ledger.delete_fixed_item(id) {
                Ok(_) => println!("Removed fixed item {}", id),
                Err(e) => return declined("fixed rm", e),
            }
        }
        _ => {}
    }
    Ok(())
}

/// Overlays the type, reference and memo arguments onto `item`. Returns
/// whether the type changed, in which case the category was cleared.
fn apply_refs(ledger: &Ledger, item: &mut NewFixedItem, sub: &clap::ArgMatches) -> Result<bool> {
    let mut retyped = false;
    if let Some(t) = tx_type_arg(sub)? {
        if t != item.tx_type {
            item.tx_type = t;
            item.category_id = None;
            retyped = true;
        }
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        item.category_id = Some(id_for_category(ledger, cat)?);
    }
    if let Some(p) = sub.get_one::<String>("profile") {
        item.profile_id = Some(id_for_profile(ledger, p)?);
    }
    if let Some(memo) = sub.get_one::<String>("memo") {
        item.memo = memo.trim().to_string();
    }
    Ok(retyped)
}

/// Parses `--amount` and `--day` onto `item`.
fn apply_values(item: &mut NewFixedItem, sub: &clap::ArgMatches) -> LedgerResult<()> {
    if let Some(raw) = sub.get_one::<String>("amount") {
        item.amount = parse_amount(raw)?;
    }
    if let Some(raw) = sub.get_one::<String>("day") {
        item.day = raw.parse()?;
    }
    Ok(())
}

fn default_category(ledger: &Ledger, item: &mut NewFixedItem) {
    if item.category_id.is_none() {
        item.category_id = ledger.categories_of(item.tx_type).first().map(|c| c.id);
    }
}

fn add(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let mut item = NewFixedItem {
        amount: 0,
        day: FixedDay::LastDay,
        category_id: None,
        profile_id: ledger.profiles().first().map(|p| p.id),
        memo: String::new(),
        tx_type: TxType::Expense,
    };
    apply_refs(ledger, &mut item, sub)?;
    if let Err(e) = apply_values(&mut item, sub) {
        return declined("fixed add", e);
    }
    default_category(ledger, &mut item);
    match ledger.add_fixed_item(item) {
        Ok(id) => println!("Added fixed item {}", id),
        Err(e) => return declined("fixed add", e),
    }
    Ok(())
}

fn edit(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    let Some(existing) = ledger.fixed_item(id) else {
        return declined("fixed edit", LedgerError::UnknownFixedItem(id));
    };
    let mut item = NewFixedItem {
        amount: existing.amount,
        day: existing.day,
        category_id: existing.category_id,
        profile_id: existing.profile_id,
        memo: existing.memo.clone(),
        tx_type: existing.tx_type,
    };
    // a detached category stays detached unless the type changes
    if apply_refs(ledger, &mut item, sub)? {
        default_category(ledger, &mut item);
    }
    if let Err(e) = apply_values(&mut item, sub) {
        return declined("fixed edit", e);
    }
    match ledger.update_fixed_item(id, item) {
        Ok(()) => println!("Updated fixed item {}", id),
        Err(e) => return declined("fixed edit", e),
    }
    Ok(())
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    if maybe_print_json(
        sub.get_flag("json"),
        sub.get_flag("jsonl"),
        &ledger.fixed_items(),
    )? {
        return Ok(());
    }
    let mut data: Vec<Vec<String>> = ledger
        .fixed_items()
        .iter()
        .map(|f| {
            vec![
                f.id.to_string(),
                f.day.to_string(),
                f.tx_type.to_string(),
                format!("{}{}", f.tx_type.sign(), format_amount(f.amount)),
                ledger.category_name(f.category_id).to_string(),
                ledger.profile_name(f.profile_id).to_string(),
                f.memo.clone(),
            ]
        })
        .collect();
    for t in [TxType::Income, TxType::Expense] {
        data.push(vec![
            String::new(),
            String::new(),
            format!("Total {}", t),
            format!("{}{}", t.sign(), format_amount(ledger.fixed_total(t))),
            String::new(),
            String::new(),
            String::new(),
        ]);
    }
    println!(
        "{}",
        pretty_table(
            &["ID", "Day", "Type", "Amount", "Category", "Profile", "Memo"],
            data
        )
    );
    Ok(())
}
