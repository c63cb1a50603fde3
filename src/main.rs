// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use tracing::debug;

use daybook::{cli, commands, db, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    logging::init(matches.get_count("verbose"));

    let db_arg = matches.get_one::<PathBuf>("db").cloned();
    let mut conn = db::open_or_init(db_arg.as_deref())?;
    let mut ledger = db::load_ledger(&conn)?;
    let start_revision = ledger.revision();
    let today = Local::now().date_naive();

    match matches.subcommand() {
        Some(("init", _)) => match db_arg {
            Some(p) => println!("Database initialized at {}", p.display()),
            None => println!("Database initialized at {}", db::db_path()?.display()),
        },
        Some(("tx", sub)) => commands::transactions::handle(&mut ledger, sub)?,
        Some(("day", sub)) => commands::calendar::handle_day(&ledger, sub)?,
        Some(("calendar", sub)) => commands::calendar::handle_calendar(&ledger, sub, today)?,
        Some(("stats", sub)) => commands::stats::handle(&ledger, sub, today)?,
        Some(("category", sub)) => commands::categories::handle(&mut ledger, sub)?,
        Some(("profile", sub)) => commands::profiles::handle(&mut ledger, sub)?,
        Some(("fixed", sub)) => commands::fixed::handle(&mut ledger, sub)?,
        Some(("config", sub)) => commands::config::handle(&mut ledger, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ledger, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&ledger)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }

    if ledger.revision() != start_revision {
        db::save_ledger(&mut conn, &ledger)?;
    } else {
        debug!("no changes to save");
    }
    Ok(())
}
