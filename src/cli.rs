// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn filter_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("query")
            .long("query")
            .help("Case-insensitive match against description or category"),
    )
    .arg(
        Arg::new("account")
            .long("account")
            .help("Restrict to one account (Cash, Debit Card, Credit Card, Savings)"),
    )
}

pub fn build_cli() -> Command {
    Command::new("findash")
        .about("Personal finance ledger, budgets, goals, and AI spending advice")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the local store"))
        .subcommand(
            Command::new("tx")
                .about("Record and inspect ledger entries")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("expense")
                                .help("income or expense"),
                        )
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today"))
                        .arg(Arg::new("description").long("description"))
                        .arg(
                            Arg::new("account")
                                .long("account")
                                .default_value("Debit Card"),
                        )
                        .arg(
                            Arg::new("recurring")
                                .long("recurring")
                                .action(ArgAction::SetTrue)
                                .help("Mark as recurring (descriptive only)"),
                        )
                        .arg(
                            Arg::new("frequency")
                                .long("frequency")
                                .help("once, weekly, monthly or yearly"),
                        ),
                )
                .subcommand(json_flags(filter_args(
                    Command::new("list").about("List entries, newest first").arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
                )))
                .subcommand(
                    Command::new("delete")
                        .about("Delete one entry by id")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(
                    Command::new("clear").about("Delete every entry").arg(
                        Arg::new("yes")
                            .long("yes")
                            .action(ArgAction::SetTrue)
                            .help("Required confirmation; this cannot be undone"),
                    ),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Per-category spending caps")
                .subcommand(
                    Command::new("set")
                        .about("Set the cap for a category")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("limit").long("limit").required(true)),
                )
                .subcommand(json_flags(Command::new("list").about("List budgets")))
                .subcommand(json_flags(
                    Command::new("report").about("Utilization against the full ledger"),
                )),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings targets")
                .subcommand(
                    Command::new("add")
                        .about("Add a goal")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("deadline").long("deadline").help("YYYY-MM-DD")),
                )
                .subcommand(json_flags(Command::new("list").about("List goals with progress")))
                .subcommand(
                    Command::new("set-current")
                        .about("Set the saved-so-far amount")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Derived statistics")
                .subcommand(json_flags(filter_args(
                    Command::new("summary")
                        .about("Income, expenses, balance, tax estimate and savings rate"),
                )))
                .subcommand(json_flags(filter_args(
                    Command::new("by-category").about("Expense totals per category"),
                ))),
        )
        .subcommand(
            Command::new("export").about("Export the ledger").subcommand(
                Command::new("transactions")
                    .about("Write the ledger as CSV")
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(
            Command::new("advice")
                .about("AI-generated spending advice")
                .subcommand(
                    Command::new("insight").about("Generate a short cost-saving insight"),
                )
                .subcommand(
                    Command::new("scan-receipt")
                        .about("Extract a transaction from a receipt image")
                        .arg(Arg::new("image").long("image").required(true)),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Display settings")
                .subcommand(
                    Command::new("currency")
                        .about("Set the display currency label (no conversion)")
                        .arg(Arg::new("label").required(true).help("USD or BRL")),
                )
                .subcommand(
                    Command::new("secure-mode")
                        .about("Mask monetary output")
                        .arg(Arg::new("state").required(true).help("on or off")),
                )
                .subcommand(Command::new("show").about("Show current settings")),
        )
        .subcommand(Command::new("doctor").about("Audit store invariants"))
}
