// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod calendar;
pub mod categories;
pub mod config;
pub mod doctor;
pub mod exporter;
pub mod fixed;
pub mod profiles;
pub mod stats;
pub mod transactions;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::warn;

use crate::error::LedgerError;
use crate::models::TxType;
use crate::utils::parse_month;
use crate::view::ViewState;

/// Declined edits are logged and otherwise have no effect. Removing the
/// last profile is the one refusal that is reported as an error.
pub(crate) fn declined(action: &str, err: LedgerError) -> Result<()> {
    match err {
        LedgerError::LastProfile => Err(LedgerError::LastProfile.into()),
        other => {
            warn!(action, reason = %other, "declined");
            Ok(())
        }
    }
}

pub(crate) fn tx_type_arg(sub: &clap::ArgMatches) -> Result<Option<TxType>> {
    match sub.get_one::<String>("type") {
        Some(s) => Ok(Some(s.parse()?)),
        None => Ok(None),
    }
}

/// Builds the month cursor from `--month`, `--prev` and `--next`.
pub fn view_from_args(sub: &clap::ArgMatches, today: NaiveDate) -> Result<ViewState> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => today,
    };
    let mut view = ViewState::new(month);
    if sub.get_flag("prev") {
        view.prev_month();
    }
    if sub.get_flag("next") {
        view.next_month();
    }
    Ok(view)
}
