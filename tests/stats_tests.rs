// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use daybook::ledger::Ledger;
use daybook::models::{Category, NewTransaction, Transaction, TxType};
use daybook::stats::{StatsCache, monthly_stats};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn cat(id: i64, name: &str, tx_type: TxType) -> Category {
    Category {
        id,
        name: name.to_string(),
        tx_type,
        is_default: false,
    }
}

fn tx(id: i64, amount: u64, date: NaiveDate, category_id: i64, tx_type: TxType) -> Transaction {
    Transaction {
        id,
        amount,
        date,
        category_id: Some(category_id),
        profile_id: Some(1),
        memo: String::new(),
        tx_type,
    }
}

fn abc() -> Vec<Category> {
    vec![
        cat(1, "A", TxType::Expense),
        cat(2, "B", TxType::Expense),
        cat(3, "C", TxType::Expense),
        cat(4, "Salary", TxType::Income),
    ]
}

#[test]
fn ranking_excludes_unused_and_keeps_order_on_ties() {
    let txs = vec![
        tx(1, 100, d(2024, 2, 10), 1, TxType::Expense),
        tx(2, 300, d(2024, 3, 1), 1, TxType::Expense),
        tx(3, 200, d(2024, 2, 29), 2, TxType::Expense),
        tx(4, 300, d(2024, 3, 31), 2, TxType::Expense),
        tx(5, 5_000, d(2024, 3, 15), 4, TxType::Income),
    ];
    let stats = monthly_stats(&txs, &abc(), d(2024, 3, 20));

    let names: Vec<_> = stats.categories.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["A", "B"]);
    assert_eq!(stats.categories[0].diff, 200);
    assert_eq!(stats.categories[1].diff, 100);
    assert_eq!(stats.current_total, 600);
    assert_eq!(stats.previous_total, 300);
    assert_eq!(stats.total_diff, 300);
    assert_eq!(stats.max_current, 300);
    assert_eq!(stats.month, "2024-03");
    assert_eq!(stats.previous_month, "2024-02");
}

#[test]
fn category_sums_match_total() {
    let txs = vec![
        tx(1, 1_200, d(2024, 3, 2), 1, TxType::Expense),
        tx(2, 800, d(2024, 3, 2), 2, TxType::Expense),
        tx(3, 50, d(2024, 3, 9), 3, TxType::Expense),
        tx(4, 999, d(2024, 4, 1), 3, TxType::Expense),
    ];
    let stats = monthly_stats(&txs, &abc(), d(2024, 3, 1));
    let sum: u64 = stats.categories.iter().map(|s| s.current).sum();
    assert_eq!(sum, stats.current_total);
    assert_eq!(stats.unassigned.current, 0);
}

#[test]
fn previous_only_category_is_ranked_with_zero_current() {
    let txs = vec![
        tx(1, 400, d(2024, 3, 3), 2, TxType::Expense),
        tx(2, 700, d(2024, 2, 3), 3, TxType::Expense),
    ];
    let stats = monthly_stats(&txs, &abc(), d(2024, 3, 3));
    assert_eq!(stats.categories.len(), 2);
    let c = &stats.categories[1];
    assert_eq!(c.name, "C");
    assert_eq!(c.current, 0);
    assert_eq!(c.previous, 700);
    assert_eq!(c.diff, -700);
    assert_eq!(stats.bar_ratio(c), 0.0);
    assert_eq!(stats.bar_ratio(&stats.categories[0]), 1.0);
}

#[test]
fn empty_input_yields_zeroes() {
    let stats = monthly_stats(&[], &abc(), d(2024, 3, 3));
    assert_eq!(stats.current_total, 0);
    assert_eq!(stats.previous_total, 0);
    assert_eq!(stats.total_diff, 0);
    assert!(stats.categories.is_empty());
    assert_eq!(stats.max_current, 1);
}

#[test]
fn january_compares_against_previous_december() {
    let txs = vec![
        tx(1, 100, d(2023, 12, 31), 1, TxType::Expense),
        tx(2, 250, d(2024, 1, 1), 1, TxType::Expense),
    ];
    let stats = monthly_stats(&txs, &abc(), d(2024, 1, 15));
    assert_eq!(stats.previous_month, "2023-12");
    assert_eq!(stats.previous_total, 100);
    assert_eq!(stats.current_total, 250);
}

#[test]
fn orphaned_expense_is_reported_as_unassigned() {
    let txs = vec![
        tx(1, 300, d(2024, 3, 1), 1, TxType::Expense),
        tx(2, 120, d(2024, 3, 1), 42, TxType::Expense),
        tx(3, 80, d(2024, 3, 1), 4, TxType::Expense),
    ];
    let stats = monthly_stats(&txs, &abc(), d(2024, 3, 1));
    assert_eq!(stats.current_total, 500);
    assert_eq!(stats.unassigned.current, 200);
    let sum: u64 = stats.categories.iter().map(|s| s.current).sum();
    assert_eq!(sum + stats.unassigned.current, stats.current_total);
}

#[test]
fn cache_invalidates_on_mutation_and_month_change() {
    let mut ledger = Ledger::with_defaults();
    let march = d(2024, 3, 1);
    let mut cache = StatsCache::new();
    assert_eq!(cache.get(&ledger, march).current_total, 0);
    assert!(cache.is_cached(&ledger, march));
    assert!(!cache.is_cached(&ledger, d(2024, 4, 1)));

    ledger
        .add_transaction(NewTransaction {
            amount: 9_000,
            date: d(2024, 3, 8),
            category_id: Some(2),
            profile_id: Some(1),
            memo: String::new(),
            tx_type: TxType::Expense,
        })
        .unwrap();
    assert!(!cache.is_cached(&ledger, march));
    assert_eq!(cache.get(&ledger, march).current_total, 9_000);
    assert_eq!(cache.get(&ledger, d(2024, 4, 1)).previous_total, 9_000);
}

#[test]
fn oversized_sums_saturate() {
    let txs = vec![
        tx(1, u64::MAX, d(2024, 3, 3), 2, TxType::Expense),
        tx(2, u64::MAX, d(2024, 3, 4), 2, TxType::Expense),
        tx(3, 5, d(2024, 2, 4), 2, TxType::Expense),
    ];
    let stats = monthly_stats(&txs, &abc(), d(2024, 3, 3));
    assert_eq!(stats.current_total, u64::MAX);
    assert_eq!(stats.total_diff, i64::MAX);
    assert_eq!(stats.categories[0].current, u64::MAX);
    assert_eq!(stats.categories[0].diff, i64::MAX);
    assert_eq!(stats.unassigned.current, 0);
    assert_eq!(stats.bar_ratio(&stats.categories[0]), 1.0);
}
