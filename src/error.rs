// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TxType;

/// Reasons a ledger operation is declined. A declined operation never
/// changes the ledger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Invalid amount '{0}', expected a positive whole number")]
    InvalidAmount(String),
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("No {0} category available")]
    NoCategoryForType(TxType),
    #[error("At least one profile must remain")]
    LastProfile,
    #[error("Category {0} is a default category and cannot be deleted")]
    DefaultCategory(i64),
    #[error("Still referenced by {count} record(s)")]
    InUse { count: usize },
    #[error("Transaction {0} not found")]
    UnknownTransaction(i64),
    #[error("Category {0} not found")]
    UnknownCategory(i64),
    #[error("Profile {0} not found")]
    UnknownProfile(i64),
    #[error("Fixed item {0} not found")]
    UnknownFixedItem(i64),
    #[error("Invalid day '{0}', expected 1-31 or 'last'")]
    InvalidFixedDay(String),
    #[error("Invalid type '{0}', expected income or expense")]
    InvalidType(String),
    #[error("Invalid orphan policy '{0}', expected keep, forbid or detach")]
    InvalidPolicy(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
