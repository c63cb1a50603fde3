// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TxType {
    Income,
    Expense,
}

impl TxType {
    pub fn as_str(self) -> &'static str {
        match self {
            TxType::Income => "INCOME",
            TxType::Expense => "EXPENSE",
        }
    }

    /// Sign used when rendering an amount of this type.
    pub fn sign(self) -> char {
        match self {
            TxType::Income => '+',
            TxType::Expense => '-',
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INCOME" => Ok(TxType::Income),
            "EXPENSE" => Ok(TxType::Expense),
            _ => Err(LedgerError::InvalidType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub amount: u64,
    pub date: NaiveDate,
    pub category_id: Option<i64>,
    pub profile_id: Option<i64>,
    pub memo: String,
    #[serde(rename = "type")]
    pub tx_type: TxType,
}

/// A transaction as submitted by the entry form, before the ledger assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: u64,
    pub date: NaiveDate,
    pub category_id: Option<i64>,
    pub profile_id: Option<i64>,
    pub memo: String,
    #[serde(rename = "type")]
    pub tx_type: TxType,
}

impl NewTransaction {
    pub(crate) fn into_transaction(self, id: i64) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            date: self.date,
            category_id: self.category_id,
            profile_id: self.profile_id,
            memo: self.memo,
            tx_type: self.tx_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub tx_type: TxType,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub image: Option<String>, // data URL
    pub color: String,
}

/// Day of month a fixed item falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FixedDay {
    Day(u8),
    LastDay,
}

impl FixedDay {
    pub fn new(day: u8) -> Result<Self, LedgerError> {
        if (1..=31).contains(&day) {
            Ok(FixedDay::Day(day))
        } else {
            Err(LedgerError::InvalidFixedDay(day.to_string()))
        }
    }
}

impl fmt::Display for FixedDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixedDay::Day(d) => write!(f, "{}", d),
            FixedDay::LastDay => f.write_str("last"),
        }
    }
}

impl FromStr for FixedDay {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("last") {
            return Ok(FixedDay::LastDay);
        }
        let day: u8 = s
            .parse()
            .map_err(|_| LedgerError::InvalidFixedDay(s.to_string()))?;
        FixedDay::new(day)
    }
}

impl TryFrom<String> for FixedDay {
    type Error = LedgerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<FixedDay> for String {
    fn from(d: FixedDay) -> Self {
        d.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedItem {
    pub id: i64,
    pub amount: u64,
    pub day: FixedDay,
    pub category_id: Option<i64>,
    pub profile_id: Option<i64>,
    pub memo: String,
    #[serde(rename = "type")]
    pub tx_type: TxType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFixedItem {
    pub amount: u64,
    pub day: FixedDay,
    pub category_id: Option<i64>,
    pub profile_id: Option<i64>,
    pub memo: String,
    #[serde(rename = "type")]
    pub tx_type: TxType,
}

impl NewFixedItem {
    pub(crate) fn into_fixed_item(self, id: i64) -> FixedItem {
        FixedItem {
            id,
            amount: self.amount,
            day: self.day,
            category_id: self.category_id,
            profile_id: self.profile_id,
            memo: self.memo,
            tx_type: self.tx_type,
        }
    }
}

/// What deleting a category or profile does to records that still reference it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanPolicy {
    /// Leave the dangling id in place; readers fall back to a placeholder label.
    #[default]
    Keep,
    /// Refuse the delete while anything references the record.
    Forbid,
    /// Clear the reference on every dependent record.
    Detach,
}

impl OrphanPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            OrphanPolicy::Keep => "keep",
            OrphanPolicy::Forbid => "forbid",
            OrphanPolicy::Detach => "detach",
        }
    }
}

impl fmt::Display for OrphanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrphanPolicy {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep" => Ok(OrphanPolicy::Keep),
            "forbid" => Ok(OrphanPolicy::Forbid),
            "detach" => Ok(OrphanPolicy::Detach),
            _ => Err(LedgerError::InvalidPolicy(s.to_string())),
        }
    }
}

pub const PROFILE_COLORS: [&str; 8] = [
    "blue", "pink", "green", "yellow", "purple", "orange", "gray", "teal",
];

pub const DEFAULT_INCOME_CATEGORIES: &[&str] = &["💰 Living"];

pub const DEFAULT_EXPENSE_CATEGORIES: &[&str] = &[
    "🍚 Food",
    "🍰 Dessert",
    "🛒 Groceries",
    "💡 Utilities",
    "🏠 Housing",
    "🍻 Drinks",
    "💕 Dates",
    "💊 Health",
    "🚌 Transport",
    "✈️ Travel",
    "🎸 Misc",
];

pub const DEFAULT_PROFILE: &str = "Me";

/// Largest amount a single transaction or fixed item may carry. Sums of
/// many such amounts still fit the signed 64-bit columns in storage.
pub const MAX_AMOUNT: u64 = 999_999_999_999;

pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";
pub const UNKNOWN_PROFILE_LABEL: &str = "Unknown";
