// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{declined, tx_type_arg};
use crate::form::TransactionForm;
use crate::ledger::Ledger;
use crate::utils::{
    format_amount, id_for_category, id_for_profile, maybe_print_json, parse_date, parse_month,
    pretty_table, same_month,
};
use anyhow::{Context, Result};
use serde::Serialize;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("edit", sub)) => edit(ledger, sub)?,
        Some(("rm", sub)) => rm(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

/// Applies the optional form arguments shared by `add` and `edit`.
fn fill_form(form: &mut TransactionForm, ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(date) = sub.get_one::<String>("date") {
        form.set_date(parse_date(date)?);
    }
    if let Some(t) = tx_type_arg(sub)? {
        if t != form.tx_type() {
            form.set_type(t);
        }
    }
    if let Some(amount) = sub.get_one::<String>("amount") {
        form.set_amount(amount);
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        form.select_category(id_for_category(ledger, cat)?);
    }
    if let Some(p) = sub.get_one::<String>("profile") {
        form.set_profile(id_for_profile(ledger, p)?);
    }
    if let Some(memo) = sub.get_one::<String>("memo") {
        form.set_memo(memo);
    }
    Ok(())
}

fn add(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").context("--date is required")?)?;
    let mut form = TransactionForm::new(date, ledger);
    fill_form(&mut form, ledger, sub)?;
    let new_tx = match form.submit(ledger) {
        Ok(tx) => tx,
        Err(e) => return declined("tx add", e),
    };
    match ledger.add_transaction(new_tx) {
        Ok(tx) => {
            println!(
                "Recorded {}{} on {} (id {})",
                tx.tx_type.sign(),
                format_amount(tx.amount),
                tx.date,
                tx.id
            );
            Ok(())
        }
        Err(e) => declined("tx add", e),
    }
}

fn edit(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    let Some(existing) = ledger.transaction(id) else {
        return declined("tx edit", crate::error::LedgerError::UnknownTransaction(id));
    };
    let mut form = TransactionForm::from_existing(existing);
    fill_form(&mut form, ledger, sub)?;

    let replacement = match form.submit(ledger) {
        Ok(tx) => tx,
        Err(e) => return declined("tx edit", e),
    };
    match ledger.replace_transaction(id, replacement) {
        Ok(()) => {
            println!("Updated transaction {}", id);
            Ok(())
        }
        Err(e) => declined("tx edit", e),
    }
}

fn rm(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    match ledger.delete_transaction(id) {
        Ok(tx) => {
            println!(
                "Removed transaction {} ({}{} on {})",
                id,
                tx.tx_type.sign(),
                format_amount(tx.amount),
                tx.date
            );
            Ok(())
        }
        Err(e) => declined("tx rm", e),
    }
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(ledger, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.r#type.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.profile.clone(),
                    r.memo.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Amount", "Category", "Profile", "Memo"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub r#type: String,
    pub amount: String,
    pub category: String,
    pub profile: String,
    pub memo: String,
}

/// Newest first; ties on date fall back to the newest id.
pub fn query_rows(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let month = sub
        .get_one::<String>("month")
        .map(|m| parse_month(m))
        .transpose()?;
    let date = sub
        .get_one::<String>("date")
        .map(|d| parse_date(d))
        .transpose()?;
    let category = sub
        .get_one::<String>("category")
        .map(|c| id_for_category(ledger, c))
        .transpose()?;

    let mut txs: Vec<_> = ledger
        .transactions()
        .iter()
        .filter(|t| month.is_none_or(|m| same_month(t.date, m)))
        .filter(|t| date.is_none_or(|d| t.date == d))
        .filter(|t| category.is_none_or(|c| t.category_id == Some(c)))
        .collect();
    txs.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        txs.truncate(*limit);
    }

    Ok(txs
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            r#type: t.tx_type.to_string(),
            amount: format_amount(t.amount),
            category: ledger.category_name(t.category_id).to_string(),
            profile: ledger.profile_name(t.profile_id).to_string(),
            memo: t.memo.clone(),
        })
        .collect())
}
