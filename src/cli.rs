// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command, value_parser};

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    ]
}

fn type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_parser(["income", "expense", "INCOME", "EXPENSE"])
        .help("income or expense")
}

fn month_nav_args() -> [Arg; 3] {
    [
        Arg::new("month").long("month").help("Month to show (YYYY-MM), defaults to the current month"),
        Arg::new("prev")
            .long("prev")
            .action(ArgAction::SetTrue)
            .conflicts_with("next")
            .help("Step back one month from --month"),
        Arg::new("next")
            .long("next")
            .action(ArgAction::SetTrue)
            .help("Step forward one month from --month"),
    ]
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn tx_fields(required: bool) -> [Arg; 6] {
    [
        Arg::new("date").long("date").required(required).help("YYYY-MM-DD"),
        type_arg(),
        Arg::new("amount")
            .long("amount")
            .required(required)
            .help("Whole amount, separators allowed (e.g. 12,000)"),
        Arg::new("category").long("category").help("Category id or name"),
        Arg::new("profile").long("profile").help("Profile id or name"),
        Arg::new("memo").long("memo"),
    ]
}

fn fixed_fields(required: bool) -> [Arg; 6] {
    [
        Arg::new("amount").long("amount").required(required),
        Arg::new("day")
            .long("day")
            .required(required)
            .help("Day of month 1-31, or 'last'"),
        type_arg(),
        Arg::new("category").long("category").help("Category id or name"),
        Arg::new("profile").long("profile").help("Profile id or name"),
        Arg::new("memo").long("memo"),
    ]
}

pub fn build_cli() -> Command {
    command!()
        .name("daybook")
        .about("Calendar household budget tracker")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("DAYBOOK_DB")
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Path to the SQLite database"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug)"),
        )
        .subcommand(Command::new("init").about("Create the database and default catalog"))
        .subcommand(
            Command::new("tx")
                .about("Record, list, edit and delete transactions")
                .subcommand(Command::new("add").args(tx_fields(true)))
                .subcommand(
                    Command::new("list")
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .args(json_args()),
                )
                .subcommand(Command::new("edit").arg(id_arg()).args(tx_fields(false)))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("day")
                .about("Show the entries recorded on one day")
                .arg(Arg::new("date").long("date").required(true))
                .args(json_args()),
        )
        .subcommand(
            Command::new("calendar")
                .about("Month grid with daily income and expense")
                .args(month_nav_args())
                .arg(
                    Arg::new("select")
                        .long("select")
                        .help("Open the details of one day (YYYY-MM-DD)"),
                )
                .args(json_args()),
        )
        .subcommand(
            Command::new("stats")
                .about("Month-over-month expense by category")
                .args(month_nav_args())
                .args(json_args()),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("icon").long("icon").help("Emoji shown before the name"))
                        .arg(type_arg()),
                )
                .subcommand(Command::new("list").arg(type_arg()).args(json_args()))
                .subcommand(
                    Command::new("rename")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("profile")
                .about("Manage profiles")
                .subcommand(Command::new("add").arg(Arg::new("name").long("name").required(true)))
                .subcommand(Command::new("list").args(json_args()))
                .subcommand(
                    Command::new("rename")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("set-image").arg(id_arg()).arg(
                        Arg::new("file")
                            .long("file")
                            .required(true)
                            .value_parser(value_parser!(std::path::PathBuf)),
                    ),
                )
                .subcommand(Command::new("clear-image").arg(id_arg()))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("fixed")
                .about("Manage fixed (recurring) items")
                .subcommand(Command::new("add").args(fixed_fields(true)))
                .subcommand(Command::new("list").args(json_args()))
                .subcommand(Command::new("edit").arg(id_arg()).args(fixed_fields(false)))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("config")
                .about("Read or change settings")
                .subcommand(
                    Command::new("get").arg(
                        Arg::new("key")
                            .required(true)
                            .value_parser(["orphan-policy"]),
                    ),
                )
                .subcommand(
                    Command::new("set")
                        .arg(
                            Arg::new("key")
                                .required(true)
                                .value_parser(["orphan-policy"]),
                        )
                        .arg(Arg::new("value").required(true)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .value_parser(["csv", "json"]),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Report dangling references and mismatches"))
}
