// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::ledger::Ledger;
use crate::models::{Category, FixedDay, FixedItem, OrphanPolicy, Profile, Transaction, TxType};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Daybook", "daybook"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("daybook.sqlite"))
}

/// Opens the database at `path`, or the platform data dir when `None`.
pub fn open_or_init(path: Option<&Path>) -> Result<Connection> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => db_path()?,
    };
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    seed_defaults(&mut conn)?;
    debug!(path = %path.display(), "database ready");
    Ok(conn)
}

// No foreign keys: dangling references are a policy decision made by the ledger.
pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('INCOME','EXPENSE')),
        is_default INTEGER NOT NULL DEFAULT 0,
        position INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS profiles(
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        image TEXT,
        color TEXT NOT NULL,
        position INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY,
        amount INTEGER NOT NULL CHECK(amount > 0),
        date TEXT NOT NULL,
        category_id INTEGER,
        profile_id INTEGER,
        memo TEXT NOT NULL DEFAULT '',
        type TEXT NOT NULL CHECK(type IN ('INCOME','EXPENSE')),
        position INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

    CREATE TABLE IF NOT EXISTS fixed_items(
        id INTEGER PRIMARY KEY,
        amount INTEGER NOT NULL CHECK(amount > 0),
        day TEXT NOT NULL,
        category_id INTEGER,
        profile_id INTEGER,
        memo TEXT NOT NULL DEFAULT '',
        type TEXT NOT NULL CHECK(type IN ('INCOME','EXPENSE')),
        position INTEGER NOT NULL
    );
    "#,
    )?;
    Ok(())
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn get_orphan_policy(conn: &Connection) -> Result<OrphanPolicy> {
    match get_setting(conn, "orphan_policy")? {
        Some(v) => Ok(v.parse()?),
        None => Ok(OrphanPolicy::default()),
    }
}

/// Writes the stock catalog the first time a database is opened.
pub fn seed_defaults(conn: &mut Connection) -> Result<()> {
    if get_setting(conn, "seeded")?.is_some() {
        return Ok(());
    }
    let defaults = Ledger::with_defaults();
    save_ledger(conn, &defaults)?;
    set_setting(conn, "seeded", "1")?;
    info!(
        categories = defaults.categories().len(),
        "seeded default catalog"
    );
    Ok(())
}

fn parse_type(s: &str) -> rusqlite::Result<TxType> {
    s.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn parse_day(s: &str) -> rusqlite::Result<FixedDay> {
    s.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn amount_column(v: u64) -> Result<i64> {
    i64::try_from(v).with_context(|| format!("Amount {} is out of storage range", v))
}

fn to_amount(v: i64) -> rusqlite::Result<u64> {
    u64::try_from(v).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Integer, Box::new(e))
    })
}

pub fn load_ledger(conn: &Connection) -> Result<Ledger> {
    let mut stmt = conn.prepare(
        "SELECT id, amount, date, category_id, profile_id, memo, type FROM transactions ORDER BY position",
    )?;
    let transactions = stmt
        .query_map([], |r| {
            Ok(Transaction {
                id: r.get(0)?,
                amount: to_amount(r.get(1)?)?,
                date: r.get(2)?,
                category_id: r.get(3)?,
                profile_id: r.get(4)?,
                memo: r.get(5)?,
                tx_type: parse_type(&r.get::<_, String>(6)?)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Load transactions")?;

    let mut stmt =
        conn.prepare("SELECT id, name, type, is_default FROM categories ORDER BY position")?;
    let categories = stmt
        .query_map([], |r| {
            Ok(Category {
                id: r.get(0)?,
                name: r.get(1)?,
                tx_type: parse_type(&r.get::<_, String>(2)?)?,
                is_default: r.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Load categories")?;

    let mut stmt = conn.prepare("SELECT id, name, image, color FROM profiles ORDER BY position")?;
    let profiles = stmt
        .query_map([], |r| {
            Ok(Profile {
                id: r.get(0)?,
                name: r.get(1)?,
                image: r.get(2)?,
                color: r.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Load profiles")?;

    let mut stmt = conn.prepare(
        "SELECT id, amount, day, category_id, profile_id, memo, type FROM fixed_items ORDER BY position",
    )?;
    let fixed_items = stmt
        .query_map([], |r| {
            Ok(FixedItem {
                id: r.get(0)?,
                amount: to_amount(r.get(1)?)?,
                day: parse_day(&r.get::<_, String>(2)?)?,
                category_id: r.get(3)?,
                profile_id: r.get(4)?,
                memo: r.get(5)?,
                tx_type: parse_type(&r.get::<_, String>(6)?)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Load fixed items")?;

    let policy = get_orphan_policy(conn)?;
    debug!(
        transactions = transactions.len(),
        categories = categories.len(),
        profiles = profiles.len(),
        fixed_items = fixed_items.len(),
        "ledger loaded"
    );
    Ok(Ledger::from_parts(
        transactions,
        categories,
        profiles,
        fixed_items,
        policy,
    ))
}

/// Replaces every stored collection with the ledger's contents in one
/// SQL transaction.
pub fn save_ledger(conn: &mut Connection, ledger: &Ledger) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(
        "DELETE FROM transactions; DELETE FROM categories; DELETE FROM profiles; DELETE FROM fixed_items;",
    )?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO transactions(id, amount, date, category_id, profile_id, memo, type, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        for (pos, t) in ledger.transactions().iter().enumerate() {
            stmt.execute(params![
                t.id,
                amount_column(t.amount)?,
                t.date,
                t.category_id,
                t.profile_id,
                t.memo,
                t.tx_type.as_str(),
                pos as i64
            ])?;
        }

        let mut stmt = tx.prepare(
            "INSERT INTO categories(id, name, type, is_default, position) VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for (pos, c) in ledger.categories().iter().enumerate() {
            stmt.execute(params![
                c.id,
                c.name,
                c.tx_type.as_str(),
                c.is_default,
                pos as i64
            ])?;
        }

        let mut stmt = tx.prepare(
            "INSERT INTO profiles(id, name, image, color, position) VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for (pos, p) in ledger.profiles().iter().enumerate() {
            stmt.execute(params![p.id, p.name, p.image, p.color, pos as i64])?;
        }

        let mut stmt = tx.prepare(
            "INSERT INTO fixed_items(id, amount, day, category_id, profile_id, memo, type, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        for (pos, f) in ledger.fixed_items().iter().enumerate() {
            stmt.execute(params![
                f.id,
                amount_column(f.amount)?,
                f.day.to_string(),
                f.category_id,
                f.profile_id,
                f.memo,
                f.tx_type.as_str(),
                pos as i64
            ])?;
        }
    }
    tx.execute(
        "INSERT INTO settings(key, value) VALUES('orphan_policy', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![ledger.orphan_policy().as_str()],
    )?;
    tx.commit()?;
    debug!(revision = ledger.revision(), "ledger saved");
    Ok(())
}
