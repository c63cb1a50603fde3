// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use comfy_table::{Attribute, Cell, CellAlignment, Table, presets::UTF8_FULL};
use serde::Serialize;

use crate::calendar::{CalendarDay, CalendarMonth, DetailLine, WEEKDAY_LABELS, day_details, month_grid};
use crate::commands::view_from_args;
use crate::ledger::Ledger;
use crate::utils::{format_amount, maybe_print_json, parse_date, pretty_table};
use crate::view::Tab;

pub fn handle_calendar(ledger: &Ledger, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let mut view = view_from_args(sub, today)?;
    view.set_tab(Tab::Calendar);
    if let Some(d) = sub.get_one::<String>("select") {
        view.select_date(parse_date(d)?);
    }
    let grid = month_grid(view.cursor(), ledger.transactions(), today, view.selected());

    #[derive(Serialize)]
    struct CalendarOut<'a> {
        calendar: &'a CalendarMonth,
        details: Vec<DetailLine>,
    }
    let details = match view.selected() {
        Some(d) if view.shows_details(ledger) => day_details(ledger, d),
        _ => Vec::new(),
    };
    let out = CalendarOut {
        calendar: &grid,
        details,
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &out)? {
        return Ok(());
    }

    println!("{}", view.cursor().format("%B %Y"));
    println!("{}", render_grid(&grid));
    if let Some(date) = view.selected().filter(|_| view.shows_details(ledger)) {
        println!("{}", date.format("%Y-%m-%d (%a)"));
        println!("{}", details_table(&out.details));
    }
    Ok(())
}

pub fn handle_day(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").context("--date is required")?)?;
    let lines = day_details(ledger, date);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &lines)? {
        return Ok(());
    }
    println!("{}", date.format("%Y-%m-%d (%a)"));
    if lines.is_empty() {
        println!("No entries.");
    } else {
        println!("{}", details_table(&lines));
    }
    Ok(())
}

fn day_cell(day: &CalendarDay) -> Cell {
    let mut text = if day.is_today {
        format!("{}*", day.date.day())
    } else {
        day.date.day().to_string()
    };
    if day.totals.income > 0 {
        text.push_str(&format!("\n+{}", format_amount(day.totals.income)));
    }
    if day.totals.expense > 0 {
        text.push_str(&format!("\n-{}", format_amount(day.totals.expense)));
    }
    let mut cell = Cell::new(text).set_alignment(CellAlignment::Right);
    if !day.in_month {
        cell = cell.add_attribute(Attribute::Dim);
    }
    if day.is_selected {
        cell = cell.add_attribute(Attribute::Bold).add_attribute(Attribute::Reverse);
    }
    cell
}

/// Sunday-first month grid; days outside the month are dimmed.
pub fn render_grid(grid: &CalendarMonth) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(WEEKDAY_LABELS.iter().map(|h| Cell::new(*h)));
    for week in &grid.weeks {
        t.add_row(week.iter().map(day_cell));
    }
    t
}

pub fn details_table(lines: &[DetailLine]) -> Table {
    let rows = lines
        .iter()
        .map(|l| {
            vec![
                l.id.to_string(),
                l.category.clone(),
                l.profile.clone(),
                l.signed_amount(),
                l.memo.clone(),
            ]
        })
        .collect();
    pretty_table(&["ID", "Category", "Profile", "Amount", "Memo"], rows)
}

