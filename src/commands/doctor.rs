// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::utils::pretty_table;
use anyhow::Result;

/// Collects `(issue, detail)` pairs for records whose references no longer
/// resolve or whose category belongs to the other type.
pub fn diagnose(ledger: &Ledger) -> Vec<(String, String)> {
    let mut rows = Vec::new();

    // 1) Dangling or mismatched category references
    for t in ledger.transactions() {
        match t.category_id.map(|id| (id, ledger.category(id))) {
            Some((id, None)) => rows.push((
                "tx_missing_category".into(),
                format!("tx {} -> category {}", t.id, id),
            )),
            Some((_, Some(c))) if c.tx_type != t.tx_type => rows.push((
                "tx_category_type_mismatch".into(),
                format!("tx {} is {} but '{}' is {}", t.id, t.tx_type, c.name, c.tx_type),
            )),
            _ => {}
        }
        if let Some(pid) = t.profile_id {
            if ledger.profile(pid).is_none() {
                rows.push((
                    "tx_missing_profile".into(),
                    format!("tx {} -> profile {}", t.id, pid),
                ));
            }
        }
    }

    // 2) Same checks for fixed items
    for f in ledger.fixed_items() {
        if let Some(cid) = f.category_id {
            if ledger.category(cid).is_none() {
                rows.push((
                    "fixed_missing_category".into(),
                    format!("fixed {} -> category {}", f.id, cid),
                ));
            }
        }
        if let Some(pid) = f.profile_id {
            if ledger.profile(pid).is_none() {
                rows.push((
                    "fixed_missing_profile".into(),
                    format!("fixed {} -> profile {}", f.id, pid),
                ));
            }
        }
    }
    rows
}

pub fn handle(ledger: &Ledger) -> Result<()> {
    let rows = diagnose(ledger);
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        let data = rows.into_iter().map(|(a, b)| vec![a, b]).collect();
        println!("{}", pretty_table(&["Issue", "Detail"], data));
    }
    Ok(())
}
