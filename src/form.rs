// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::{Category, NewTransaction, Transaction, TxType};
use crate::utils::{normalize_amount_input, parse_amount};

/// Entry form for a single transaction.
#[derive(Debug, Clone)]
pub struct TransactionForm {
    date: NaiveDate,
    tx_type: TxType,
    amount: String,
    category_id: Option<i64>,
    profile_id: Option<i64>,
    memo: String,
    // Fall back to the first category of the type when none is chosen.
    default_category: bool,
}

impl TransactionForm {
    /// Opens the form on `date` as an expense, attributed to the first profile.
    pub fn new(date: NaiveDate, ledger: &Ledger) -> Self {
        Self {
            date,
            tx_type: TxType::Expense,
            amount: String::new(),
            category_id: None,
            profile_id: ledger.profiles().first().map(|p| p.id),
            memo: String::new(),
            default_category: true,
        }
    }

    /// Opens the form on a stored transaction. References are carried over
    /// as they are, including cleared ones; only a type switch brings back
    /// the default category.
    pub fn from_existing(tx: &Transaction) -> Self {
        Self {
            date: tx.date,
            tx_type: tx.tx_type,
            amount: tx.amount.to_string(),
            category_id: tx.category_id,
            profile_id: tx.profile_id,
            memo: tx.memo.clone(),
            default_category: false,
        }
    }

    pub fn tx_type(&self) -> TxType {
        self.tx_type
    }

    pub fn amount_input(&self) -> &str {
        &self.amount
    }

    pub fn category_id(&self) -> Option<i64> {
        self.category_id
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    /// Switching type clears the chosen category, since categories are
    /// partitioned by type.
    pub fn set_type(&mut self, tx_type: TxType) {
        self.tx_type = tx_type;
        self.category_id = None;
        self.default_category = true;
    }

    pub fn set_amount(&mut self, raw: &str) {
        self.amount = raw.to_string();
    }

    /// Live-formatting variant of [`set_amount`](Self::set_amount): drops
    /// non-digits and regroups thousands.
    pub fn type_amount(&mut self, raw: &str) {
        self.amount = normalize_amount_input(raw);
    }

    pub fn select_category(&mut self, id: i64) {
        self.category_id = Some(id);
    }

    pub fn set_profile(&mut self, id: i64) {
        self.profile_id = Some(id);
    }

    pub fn set_memo(&mut self, memo: &str) {
        self.memo = memo.to_string();
    }

    pub fn available_categories<'a>(&self, ledger: &'a Ledger) -> Vec<&'a Category> {
        ledger.categories_of(self.tx_type)
    }

    /// Validates the form and produces the record to store.
    pub fn submit(&self, ledger: &Ledger) -> LedgerResult<NewTransaction> {
        let amount = parse_amount(&self.amount)?;
        let category_id = match self.category_id {
            Some(id) => Some(id),
            None if self.default_category => Some(
                self.available_categories(ledger)
                    .first()
                    .map(|c| c.id)
                    .ok_or(LedgerError::NoCategoryForType(self.tx_type))?,
            ),
            None => None,
        };
        debug!(amount, ?category_id, date = %self.date, "form submitted");
        Ok(NewTransaction {
            amount,
            date: self.date,
            category_id,
            profile_id: self.profile_id,
            memo: self.memo.clone(),
            tx_type: self.tx_type,
        })
    }
}
