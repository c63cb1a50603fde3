// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use daybook::error::LedgerError;
use daybook::form::TransactionForm;
use daybook::ledger::Ledger;
use daybook::models::{MAX_AMOUNT, Transaction, TxType};
use daybook::utils::{format_amount, normalize_amount_input, parse_amount, split_icon};

fn march_5() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
}

#[test]
fn amount_parsing_accepts_separators() {
    assert_eq!(parse_amount("12,000"), Ok(12_000));
    assert_eq!(parse_amount("12000"), Ok(12_000));
    assert_eq!(parse_amount(" 1,234,567 "), Ok(1_234_567));
    assert_eq!(parse_amount("007"), Ok(7));
    assert_eq!(parse_amount("999,999,999,999"), Ok(MAX_AMOUNT));
}

#[test]
fn amount_parsing_rejects_malformed_input() {
    for bad in [
        "",
        "0",
        "000",
        "abc",
        "12abc",
        "-5",
        "1.5",
        ",100",
        "1,000,000,000,000",
        "18446744073709551615",
        "99999999999999999999999",
    ] {
        assert!(
            matches!(parse_amount(bad), Err(LedgerError::InvalidAmount(_))),
            "accepted {:?}",
            bad
        );
    }
}

#[test]
fn live_amount_input_is_regrouped() {
    assert_eq!(normalize_amount_input("12a3,4567"), "1,234,567");
    assert_eq!(normalize_amount_input("abc"), "");
    assert_eq!(format_amount(999), "999");
    assert_eq!(format_amount(1_000), "1,000");
}

#[test]
fn submit_round_trips_through_ledger() {
    let mut ledger = Ledger::with_defaults();
    let partner = ledger.add_profile("Partner").unwrap();

    let mut form = TransactionForm::new(march_5(), &ledger);
    form.set_amount("12,000");
    form.select_category(3);
    form.set_profile(partner);
    form.set_memo("cake");
    let submitted = form.submit(&ledger).unwrap();

    let stored = ledger.add_transaction(submitted.clone()).unwrap().clone();
    let read_back = ledger.transaction(stored.id).unwrap();
    assert_eq!(read_back.amount, 12_000);
    assert_eq!(read_back.date, march_5());
    assert_eq!(read_back.category_id, Some(3));
    assert_eq!(read_back.profile_id, Some(partner));
    assert_eq!(read_back.memo, "cake");
    assert_eq!(read_back.tx_type, TxType::Expense);
    assert_eq!(submitted.amount, read_back.amount);
}

#[test]
fn missing_category_defaults_to_first_of_type() {
    let ledger = Ledger::with_defaults();
    let mut form = TransactionForm::new(march_5(), &ledger);
    form.set_type(TxType::Income);
    form.set_amount("3,000,000");
    let tx = form.submit(&ledger).unwrap();
    assert_eq!(tx.category_id, Some(1));
    assert_eq!(tx.profile_id, Some(1));
}

#[test]
fn switching_type_clears_category() {
    let ledger = Ledger::with_defaults();
    let mut form = TransactionForm::new(march_5(), &ledger);
    form.select_category(5);
    form.set_type(TxType::Income);
    assert_eq!(form.category_id(), None);
    assert!(
        form.available_categories(&ledger)
            .iter()
            .all(|c| c.tx_type == TxType::Income)
    );
}

#[test]
fn no_category_of_type_rejects_submission() {
    let ledger = Ledger::with_defaults();
    let empty = Ledger::from_parts(
        Vec::new(),
        ledger.categories_of(TxType::Expense).into_iter().cloned().collect(),
        ledger.profiles().to_vec(),
        Vec::new(),
        Default::default(),
    );

    let mut form = TransactionForm::new(march_5(), &empty);
    form.set_type(TxType::Income);
    form.set_amount("1000");
    assert_eq!(
        form.submit(&empty),
        Err(LedgerError::NoCategoryForType(TxType::Income))
    );
}

#[test]
fn invalid_amount_rejects_submission() {
    let ledger = Ledger::with_defaults();
    let mut form = TransactionForm::new(march_5(), &ledger);
    form.type_amount("abc");
    assert_eq!(form.amount_input(), "");
    assert!(matches!(
        form.submit(&ledger),
        Err(LedgerError::InvalidAmount(_))
    ));
}

#[test]
fn icons_split_from_category_names() {
    assert_eq!(split_icon("🍚 Food"), (Some("🍚"), "Food"));
    assert_eq!(split_icon("✈️ Travel").1, "Travel");
    assert_eq!(split_icon("Pets"), (None, "Pets"));
}

#[test]
fn existing_entry_keeps_cleared_references() {
    let ledger = Ledger::with_defaults();
    let stored = Transaction {
        id: 4,
        amount: 2_500,
        date: march_5(),
        category_id: None,
        profile_id: None,
        memo: "orphan".into(),
        tx_type: TxType::Expense,
    };
    let mut form = TransactionForm::from_existing(&stored);
    form.set_memo("still orphan");
    let tx = form.submit(&ledger).unwrap();
    assert_eq!(tx.category_id, None);
    assert_eq!(tx.profile_id, None);
    assert_eq!(tx.amount, 2_500);

    form.set_type(TxType::Income);
    assert_eq!(form.submit(&ledger).unwrap().category_id, Some(1));
}
