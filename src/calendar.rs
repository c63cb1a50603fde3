// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Calendar month grid and per-day income/expense buckets.
//!
//! The grid always spans whole Sunday-first weeks, so the first and last
//! rows include days from the neighbouring months. Those days are flagged
//! with `in_month = false` and still carry their own totals.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::ledger::Ledger;
use crate::models::{Transaction, TxType};
use crate::utils::{month_end, month_key, month_start, same_month};

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DayTotals {
    pub income: u64,
    pub expense: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub totals: DayTotals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarMonth {
    pub month: String,
    pub weeks: Vec<Vec<CalendarDay>>,
}

impl CalendarMonth {
    /// Index of the week row containing `date`, if it is on the grid.
    pub fn week_of(&self, date: NaiveDate) -> Option<usize> {
        self.weeks
            .iter()
            .position(|w| w.iter().any(|d| d.date == date))
    }
}

/// Income and expense totals for transactions dated exactly `date`.
pub fn daily_totals(transactions: &[Transaction], date: NaiveDate) -> DayTotals {
    transactions
        .iter()
        .filter(|t| t.date == date)
        .fold(DayTotals::default(), |mut acc, t| {
            match t.tx_type {
                TxType::Income => acc.income = acc.income.saturating_add(t.amount),
                TxType::Expense => acc.expense = acc.expense.saturating_add(t.amount),
            }
            acc
        })
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

fn week_end(date: NaiveDate) -> NaiveDate {
    date + Duration::days(6 - date.weekday().num_days_from_sunday() as i64)
}

pub fn month_grid(
    month: NaiveDate,
    transactions: &[Transaction],
    today: NaiveDate,
    selected: Option<NaiveDate>,
) -> CalendarMonth {
    let start = week_start(month_start(month));
    let end = week_end(month_end(month));

    let mut weeks = Vec::new();
    let mut week = Vec::with_capacity(7);
    for date in start.iter_days().take_while(|d| *d <= end) {
        week.push(CalendarDay {
            date,
            in_month: same_month(date, month),
            is_today: date == today,
            is_selected: selected == Some(date),
            totals: daily_totals(transactions, date),
        });
        if week.len() == 7 {
            weeks.push(std::mem::replace(&mut week, Vec::with_capacity(7)));
        }
    }
    debug!(month = %month_key(month), weeks = weeks.len(), "calendar grid built");
    CalendarMonth {
        month: month_key(month),
        weeks,
    }
}

/// One row of the details panel for a selected day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailLine {
    pub id: i64,
    pub category: String,
    pub profile: String,
    pub amount: u64,
    #[serde(rename = "type")]
    pub tx_type: TxType,
    pub memo: String,
}

impl DetailLine {
    pub fn signed_amount(&self) -> String {
        format!(
            "{}{}",
            self.tx_type.sign(),
            crate::utils::format_amount(self.amount)
        )
    }
}

pub fn day_details(ledger: &Ledger, date: NaiveDate) -> Vec<DetailLine> {
    ledger
        .transactions_on(date)
        .into_iter()
        .map(|t| DetailLine {
            id: t.id,
            category: ledger.category_name(t.category_id).to_string(),
            profile: ledger.profile_name(t.profile_id).to_string(),
            amount: t.amount,
            tx_type: t.tx_type,
            memo: t.memo.clone(),
        })
        .collect()
}
