// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{Datelike, Months, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::MAX_AMOUNT;

static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9][0-9,]*$").unwrap());

static ICON_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\p{Extended_Pictographic}[\x{FE0F}\x{200D}\p{Extended_Pictographic}]*)\s*(.*)$")
        .unwrap()
});

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Parses `YYYY-MM` into the first day of that month.
pub fn parse_month(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    let start = month_start(date);
    start
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .unwrap_or(start)
}

pub fn prev_month(date: NaiveDate) -> NaiveDate {
    let start = month_start(date);
    start.checked_sub_months(Months::new(1)).unwrap_or(start)
}

pub fn next_month(date: NaiveDate) -> NaiveDate {
    let start = month_start(date);
    start.checked_add_months(Months::new(1)).unwrap_or(start)
}

pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Parses a user-typed amount. Thousands separators are ignored. Anything
/// that is not a digit is rejected, as are empty input, zero, and values
/// above [`MAX_AMOUNT`].
pub fn parse_amount(s: &str) -> LedgerResult<u64> {
    let trimmed = s.trim();
    if !AMOUNT_RE.is_match(trimmed) {
        return Err(LedgerError::InvalidAmount(s.to_string()));
    }
    let digits: String = trimmed.chars().filter(|c| *c != ',').collect();
    match digits.parse::<u64>() {
        Ok(v) if (1..=MAX_AMOUNT).contains(&v) => Ok(v),
        _ => Err(LedgerError::InvalidAmount(s.to_string())),
    }
}

/// Reformats raw keystrokes into a separator-grouped amount, dropping
/// every non-digit. Returns an empty string when no digits remain.
pub fn normalize_amount_input(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.parse::<u64>() {
        Ok(v) => format_amount(v),
        Err(_) => String::new(),
    }
}

pub fn format_amount(v: u64) -> String {
    let s = v.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);
    for (i, ch) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_signed(v: i64) -> String {
    let abs = format_amount(v.unsigned_abs());
    if v > 0 {
        format!("+{}", abs)
    } else if v < 0 {
        format!("-{}", abs)
    } else {
        abs
    }
}

/// Splits a leading emoji glyph off a category name.
pub fn split_icon(name: &str) -> (Option<&str>, &str) {
    match ICON_RE.captures(name) {
        Some(caps) => {
            let icon = caps.get(1).map(|m| m.as_str());
            let rest = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            (icon, rest)
        }
        None => (None, name),
    }
}

/// Resolves a category given as an id or a name. A name matches with or
/// without its leading icon.
pub fn id_for_category(ledger: &Ledger, key: &str) -> Result<i64> {
    let key = key.trim();
    if let Ok(id) = key.parse::<i64>() {
        if ledger.category(id).is_some() {
            return Ok(id);
        }
    }
    ledger
        .categories()
        .iter()
        .find(|c| c.name == key || split_icon(&c.name).1 == key)
        .map(|c| c.id)
        .with_context(|| format!("Category '{}' not found", key))
}

pub fn id_for_profile(ledger: &Ledger, key: &str) -> Result<i64> {
    let key = key.trim();
    if let Ok(id) = key.parse::<i64>() {
        if ledger.profile(id).is_some() {
            return Ok(id);
        }
    }
    ledger
        .profiles()
        .iter()
        .find(|p| p.name == key)
        .map(|p| p.id)
        .with_context(|| format!("Profile '{}' not found", key))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Reads a local image into an inline `data:` URL.
pub fn image_data_url(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Read image at {}", path.display()))?;
    Ok(format!(
        "data:{};base64,{}",
        image_mime(path),
        STANDARD.encode(bytes)
    ))
}
