// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month-over-month expense statistics.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::ledger::Ledger;
use crate::models::{Category, Transaction, TxType};
use crate::utils::{month_key, prev_month, same_month};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStat {
    pub category_id: i64,
    pub name: String,
    pub current: u64,
    pub previous: u64,
    pub diff: i64,
}

/// Expense that could not be attributed to an expense category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Unassigned {
    pub current: u64,
    pub previous: u64,
}

impl Unassigned {
    pub fn diff(&self) -> i64 {
        signed_diff(self.current, self.previous)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyStats {
    pub month: String,
    pub previous_month: String,
    pub current_total: u64,
    pub previous_total: u64,
    pub total_diff: i64,
    pub categories: Vec<CategoryStat>,
    pub unassigned: Unassigned,
    /// Largest per-category current sum, never below 1.
    pub max_current: u64,
}

impl MonthlyStats {
    /// Width of a category's bar relative to the largest one, in `0.0..=1.0`.
    pub fn bar_ratio(&self, stat: &CategoryStat) -> f64 {
        stat.current as f64 / self.max_current as f64
    }
}

fn signed_diff(current: u64, previous: u64) -> i64 {
    let diff = i128::from(current) - i128::from(previous);
    diff.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

fn total<'a>(txs: impl Iterator<Item = &'a Transaction>) -> u64 {
    txs.fold(0, |acc, t| acc.saturating_add(t.amount))
}

pub fn monthly_stats(
    transactions: &[Transaction],
    categories: &[Category],
    reference: NaiveDate,
) -> MonthlyStats {
    let previous = prev_month(reference);
    let expenses = || transactions.iter().filter(|t| t.tx_type == TxType::Expense);
    let in_month = |m: NaiveDate| expenses().filter(move |t| same_month(t.date, m));

    let current_total = total(in_month(reference));
    let previous_total = total(in_month(previous));

    let mut ranking: Vec<CategoryStat> = categories
        .iter()
        .filter(|c| c.tx_type == TxType::Expense)
        .map(|c| {
            let cur = total(in_month(reference).filter(|t| t.category_id == Some(c.id)));
            let prev = total(in_month(previous).filter(|t| t.category_id == Some(c.id)));
            CategoryStat {
                category_id: c.id,
                name: c.name.clone(),
                current: cur,
                previous: prev,
                diff: signed_diff(cur, prev),
            }
        })
        .collect();

    let attributed_current = ranking.iter().fold(0u64, |acc, s| acc.saturating_add(s.current));
    let attributed_previous = ranking.iter().fold(0u64, |acc, s| acc.saturating_add(s.previous));

    ranking.retain(|s| s.current > 0 || s.previous > 0);
    // stable: ties keep catalog order
    ranking.sort_by(|a, b| b.current.cmp(&a.current));

    let max_current = ranking.iter().map(|s| s.current).max().unwrap_or(0).max(1);

    debug!(
        month = %month_key(reference),
        current_total,
        previous_total,
        ranked = ranking.len(),
        "monthly stats computed"
    );

    MonthlyStats {
        month: month_key(reference),
        previous_month: month_key(previous),
        current_total,
        previous_total,
        total_diff: signed_diff(current_total, previous_total),
        categories: ranking,
        unassigned: Unassigned {
            current: current_total.saturating_sub(attributed_current),
            previous: previous_total.saturating_sub(attributed_previous),
        },
        max_current,
    }
}

/// Memoizes [`monthly_stats`] on the ledger revision and the month shown.
#[derive(Debug, Default)]
pub struct StatsCache {
    key: Option<(u64, String)>,
    value: Option<MonthlyStats>,
}

impl StatsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, ledger: &Ledger, reference: NaiveDate) -> &MonthlyStats {
        let key = (ledger.revision(), month_key(reference));
        if self.key.as_ref() != Some(&key) {
            self.value = None;
            self.key = Some(key);
        }
        self.value.get_or_insert_with(|| {
            monthly_stats(ledger.transactions(), ledger.categories(), reference)
        })
    }

    pub fn is_cached(&self, ledger: &Ledger, reference: NaiveDate) -> bool {
        self.value.is_some() && self.key == Some((ledger.revision(), month_key(reference)))
    }
}
