// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use daybook::db;
use daybook::models::{
    FixedDay, MAX_AMOUNT, NewFixedItem, NewTransaction, OrphanPolicy, TxType,
};
use rusqlite::Connection;
use tempfile::tempdir;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    db::seed_defaults(&mut conn).unwrap();
    conn
}

#[test]
fn seeding_happens_once() {
    let mut conn = setup();
    let ledger = db::load_ledger(&conn).unwrap();
    assert_eq!(ledger.categories().len(), 12);
    assert_eq!(ledger.profiles().len(), 1);

    db::seed_defaults(&mut conn).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 12);
}

#[test]
fn save_and_load_round_trip() {
    let mut conn = setup();
    let mut ledger = db::load_ledger(&conn).unwrap();
    let partner = ledger.add_profile("Partner").unwrap();
    ledger
        .set_profile_image(partner, Some("data:image/png;base64,AAAA".into()))
        .unwrap();
    let tx_id = ledger
        .add_transaction(NewTransaction {
            amount: 12_000,
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            category_id: Some(3),
            profile_id: Some(partner),
            memo: "birthday cake".into(),
            tx_type: TxType::Expense,
        })
        .unwrap()
        .id;
    ledger
        .add_fixed_item(NewFixedItem {
            amount: 55_000,
            day: FixedDay::LastDay,
            category_id: Some(5),
            profile_id: None,
            memo: "power".into(),
            tx_type: TxType::Expense,
        })
        .unwrap();
    ledger.set_orphan_policy(OrphanPolicy::Detach);
    db::save_ledger(&mut conn, &ledger).unwrap();

    let loaded = db::load_ledger(&conn).unwrap();
    assert_eq!(loaded.transactions(), ledger.transactions());
    assert_eq!(loaded.categories(), ledger.categories());
    assert_eq!(loaded.profiles(), ledger.profiles());
    assert_eq!(loaded.fixed_items(), ledger.fixed_items());
    assert_eq!(loaded.orphan_policy(), OrphanPolicy::Detach);
    assert_eq!(loaded.transaction(tx_id).unwrap().memo, "birthday cake");
}

#[test]
fn deletes_are_persisted() {
    let mut conn = setup();
    let mut ledger = db::load_ledger(&conn).unwrap();
    let id = ledger.add_category("Pets", TxType::Expense).unwrap();
    db::save_ledger(&mut conn, &ledger).unwrap();
    ledger.delete_category(id).unwrap();
    db::save_ledger(&mut conn, &ledger).unwrap();

    let loaded = db::load_ledger(&conn).unwrap();
    assert!(loaded.category(id).is_none());
    assert_eq!(loaded.categories().len(), 12);
}

#[test]
fn file_backed_database_reopens() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("book.sqlite");
    {
        let mut conn = db::open_or_init(Some(&path)).unwrap();
        let mut ledger = db::load_ledger(&conn).unwrap();
        ledger.add_profile("Kid").unwrap();
        db::save_ledger(&mut conn, &ledger).unwrap();
    }
    let conn = db::open_or_init(Some(&path)).unwrap();
    let ledger = db::load_ledger(&conn).unwrap();
    assert_eq!(ledger.profiles().len(), 2);
    assert_eq!(db::get_setting(&conn, "seeded").unwrap().as_deref(), Some("1"));
}

#[test]
fn empty_profile_table_is_topped_up() {
    let conn = setup();
    conn.execute("DELETE FROM profiles", []).unwrap();
    let ledger = db::load_ledger(&conn).unwrap();
    assert_eq!(ledger.profiles().len(), 1);
}

#[test]
fn ceiling_amount_survives_save() {
    let mut conn = setup();
    let mut ledger = db::load_ledger(&conn).unwrap();
    for day in [1, 2] {
        ledger
            .add_transaction(NewTransaction {
                amount: MAX_AMOUNT,
                date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
                category_id: Some(2),
                profile_id: Some(1),
                memo: String::new(),
                tx_type: TxType::Expense,
            })
            .unwrap();
    }
    db::save_ledger(&mut conn, &ledger).unwrap();

    let loaded = db::load_ledger(&conn).unwrap();
    assert_eq!(loaded.transactions(), ledger.transactions());
    let stats = daybook::stats::monthly_stats(
        loaded.transactions(),
        loaded.categories(),
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    );
    assert_eq!(stats.current_total, 2 * MAX_AMOUNT);
}
