// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate, Weekday};
use daybook::calendar::{DayTotals, daily_totals, day_details, month_grid};
use daybook::ledger::Ledger;
use daybook::models::{NewTransaction, Transaction, TxType};
use daybook::view::ViewState;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn entry(amount: u64, date: NaiveDate, category_id: i64, tx_type: TxType) -> NewTransaction {
    NewTransaction {
        amount,
        date,
        category_id: Some(category_id),
        profile_id: Some(1),
        memo: "memo".into(),
        tx_type,
    }
}

fn march_ledger() -> Ledger {
    let mut ledger = Ledger::with_defaults();
    ledger
        .add_transaction(entry(1_000, d(2024, 3, 5), 1, TxType::Income))
        .unwrap();
    ledger
        .add_transaction(entry(500, d(2024, 3, 5), 2, TxType::Expense))
        .unwrap();
    ledger
}

#[test]
fn daily_bucket_sums_by_type() {
    let ledger = march_ledger();
    assert_eq!(
        daily_totals(ledger.transactions(), d(2024, 3, 5)),
        DayTotals {
            income: 1_000,
            expense: 500
        }
    );
    assert_eq!(
        daily_totals(ledger.transactions(), d(2024, 3, 6)),
        DayTotals::default()
    );
}

#[test]
fn grid_spans_full_sunday_weeks() {
    let ledger = march_ledger();
    let today = d(2024, 3, 20);
    let grid = month_grid(d(2024, 3, 1), ledger.transactions(), today, None);

    // March 2024 starts on a Friday and ends on a Sunday.
    assert_eq!(grid.weeks.len(), 6);
    assert!(grid.weeks.iter().all(|w| w.len() == 7));
    let first = &grid.weeks[0][0];
    assert_eq!(first.date, d(2024, 2, 25));
    assert_eq!(first.date.weekday(), Weekday::Sun);
    assert!(!first.in_month);
    let last = grid.weeks.last().unwrap().last().unwrap();
    assert_eq!(last.date, d(2024, 4, 6));
    assert!(!last.in_month);

    let in_month = grid.weeks.iter().flatten().filter(|c| c.in_month).count();
    assert_eq!(in_month, 31);

    let fifth = grid
        .weeks
        .iter()
        .flatten()
        .find(|c| c.date == d(2024, 3, 5))
        .unwrap();
    assert_eq!(fifth.totals.income, 1_000);
    assert_eq!(fifth.totals.expense, 500);
    assert_eq!(grid.week_of(today), Some(3));
    assert!(grid.weeks[3].iter().any(|c| c.is_today));
}

#[test]
fn month_starting_on_sunday_has_no_leading_days() {
    // September 2024 starts on a Sunday.
    let grid = month_grid(d(2024, 9, 1), &[], d(2024, 9, 1), None);
    assert_eq!(grid.weeks[0][0].date, d(2024, 9, 1));
    assert!(grid.weeks[0][0].in_month);
    assert_eq!(grid.weeks.len(), 5);
}

#[test]
fn selection_toggles_and_needs_entries() {
    let ledger = march_ledger();
    let mut view = ViewState::new(d(2024, 3, 17));
    assert_eq!(view.cursor(), d(2024, 3, 1));

    view.select_date(d(2024, 3, 5));
    assert!(view.shows_details(&ledger));
    view.select_date(d(2024, 3, 5));
    assert_eq!(view.selected(), None);

    view.select_date(d(2024, 3, 6));
    assert!(!view.shows_details(&ledger));

    view.prev_month();
    assert_eq!(view.cursor(), d(2024, 2, 1));
    view.next_month();
    view.next_month();
    assert_eq!(view.cursor(), d(2024, 4, 1));
}

#[test]
fn details_fall_back_for_missing_category() {
    let mut ledger = march_ledger();
    ledger
        .add_transaction(entry(250, d(2024, 3, 5), 77, TxType::Expense))
        .unwrap();
    let lines = day_details(&ledger, d(2024, 3, 5));
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].category, "💰 Living");
    assert_eq!(lines[0].signed_amount(), "+1,000");
    assert_eq!(lines[1].signed_amount(), "-500");
    assert_eq!(lines[2].category, "Uncategorized");
    assert_eq!(lines[2].profile, "Me");
}

#[test]
fn daily_bucket_saturates() {
    let big = |id| Transaction {
        id,
        amount: u64::MAX,
        date: d(2024, 3, 5),
        category_id: Some(2),
        profile_id: Some(1),
        memo: String::new(),
        tx_type: TxType::Expense,
    };
    let totals = daily_totals(&[big(1), big(2)], d(2024, 3, 5));
    assert_eq!(totals.expense, u64::MAX);
    assert_eq!(totals.income, 0);
}
