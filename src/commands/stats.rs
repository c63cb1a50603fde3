// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::view_from_args;
use crate::ledger::Ledger;
use crate::stats::{MonthlyStats, monthly_stats};
use crate::utils::{format_amount, format_signed, maybe_print_json, pretty_table};
use crate::view::Tab;
use anyhow::Result;
use chrono::NaiveDate;

const BAR_WIDTH: usize = 20;

pub fn handle(ledger: &Ledger, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let mut view = view_from_args(sub, today)?;
    view.set_tab(Tab::Statistics);
    let stats = monthly_stats(ledger.transactions(), ledger.categories(), view.cursor());
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &stats)? {
        return Ok(());
    }
    print!("{}", render(&stats));
    Ok(())
}

fn bar(ratio: f64) -> String {
    let filled = (ratio * BAR_WIDTH as f64).round() as usize;
    format!(
        "{}{}",
        "█".repeat(filled.min(BAR_WIDTH)),
        "░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH))
    )
}

fn trend(diff: i64) -> String {
    if diff > 0 {
        format!("▲ {} up", format_amount(diff.unsigned_abs()))
    } else {
        format!("▼ {} down", format_amount(diff.unsigned_abs()))
    }
}

/// Text rendering of the statistics screen: totals, ranking, and deltas.
pub fn render(stats: &MonthlyStats) -> String {
    let mut out = String::new();
    let totals = pretty_table(
        &["", stats.previous_month.as_str(), stats.month.as_str()],
        vec![vec![
            "Total expense".to_string(),
            format_amount(stats.previous_total),
            format_amount(stats.current_total),
        ]],
    );
    out.push_str(&format!("{}\n{}\n\n", totals, trend(stats.total_diff)));

    if stats.categories.is_empty() {
        out.push_str("No spending to compare.\n");
        return out;
    }

    let ranking = stats
        .categories
        .iter()
        .enumerate()
        .map(|(i, s)| {
            vec![
                (i + 1).to_string(),
                s.name.clone(),
                format_amount(s.current),
                bar(stats.bar_ratio(s)),
            ]
        })
        .collect();
    out.push_str(&format!(
        "{}\n",
        pretty_table(&["#", "Category", "Spent", ""], ranking)
    ));

    let mut deltas: Vec<Vec<String>> = stats
        .categories
        .iter()
        .map(|s| {
            vec![
                s.name.clone(),
                format_amount(s.previous),
                format_amount(s.current),
                format_signed(s.diff),
            ]
        })
        .collect();
    if stats.unassigned.current > 0 || stats.unassigned.previous > 0 {
        deltas.push(vec![
            crate::models::UNCATEGORIZED_LABEL.to_string(),
            format_amount(stats.unassigned.previous),
            format_amount(stats.unassigned.current),
            format_signed(stats.unassigned.diff()),
        ]);
    }
    out.push_str(&format!(
        "{}\n",
        pretty_table(&["Category", "Previous", "Current", "Change"], deltas)
    ));
    out
}
