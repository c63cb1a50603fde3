// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::Serialize;

use crate::ledger::Ledger;
use crate::utils::{month_start, next_month, prev_month};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Tab {
    #[default]
    Calendar,
    Statistics,
    Settings,
}

/// Navigation state shared by the calendar and statistics screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub tab: Tab,
    cursor: NaiveDate,
    selected: Option<NaiveDate>,
}

impl ViewState {
    pub fn new(month: NaiveDate) -> Self {
        Self {
            tab: Tab::default(),
            cursor: month_start(month),
            selected: None,
        }
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn prev_month(&mut self) {
        self.cursor = prev_month(self.cursor);
    }

    pub fn next_month(&mut self) {
        self.cursor = next_month(self.cursor);
    }

    /// Selecting the already-selected date clears the selection.
    pub fn select_date(&mut self, date: NaiveDate) {
        if self.selected == Some(date) {
            self.selected = None;
        } else {
            self.selected = Some(date);
        }
    }

    /// The details panel is only shown for a selected day that has entries.
    pub fn shows_details(&self, ledger: &Ledger) -> bool {
        self.selected
            .is_some_and(|d| !ledger.transactions_on(d).is_empty())
    }
}
