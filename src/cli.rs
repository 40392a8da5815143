// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command};

const STATES: [&str; 3] = ["bought", "sold", "scammed"];

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_name("ID")
        .help("Phone id")
}

fn phone_cmd() -> Command {
    Command::new("phone")
        .about("Record purchases, sales and scams")
        .subcommand_required(true)
        .subcommand(json_flags(
            Command::new("add")
                .about("Record a bought phone; its price is taken from the budget")
                .arg(Arg::new("model").long("model").required(true))
                .arg(Arg::new("brand").long("brand").required(true))
                .arg(
                    Arg::new("buy_price")
                        .long("buy-price")
                        .required(true)
                        .value_name("AMOUNT"),
                )
                .arg(Arg::new("notes").long("notes")),
        ))
        .subcommand(json_flags(
            Command::new("list")
                .about("List phones, newest first")
                .arg(Arg::new("state").long("state").value_parser(STATES))
                .arg(
                    Arg::new("match")
                        .long("match")
                        .value_name("REGEX")
                        .help("Case-insensitive filter on \"brand model\""),
                ),
        ))
        .subcommand(json_flags(
            Command::new("show").about("Show one phone").arg(id_arg()),
        ))
        .subcommand(json_flags(
            Command::new("state")
                .about("Move a phone to another state")
                .arg(id_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .required(true)
                        .value_parser(STATES),
                )
                .arg(
                    Arg::new("sell_price")
                        .long("sell-price")
                        .value_name("AMOUNT")
                        .allow_hyphen_values(true)
                        .help("Required when moving to sold"),
                ),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete a phone record")
                .arg(id_arg())
                .arg(
                    Arg::new("reverse")
                        .long("reverse")
                        .action(ArgAction::SetTrue)
                        .help("Undo the phone's whole budget impact, not just an unsold purchase"),
                ),
        )
}

fn budget_cmd() -> Command {
    Command::new("budget")
        .about("Running cash balance")
        .subcommand_required(true)
        .subcommand(json_flags(Command::new("show").about("Show the balance")))
        .subcommand(
            Command::new("set").about("Overwrite the balance").arg(
                Arg::new("amount")
                    .long("amount")
                    .required(true)
                    .allow_hyphen_values(true),
            ),
        )
}

fn export_cmd() -> Command {
    Command::new("export")
        .about("Export data")
        .subcommand_required(true)
        .subcommand(
            Command::new("phones")
                .about("Export all phones")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .required(true)
                        .help("csv|json"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
}

pub fn build_cli() -> Command {
    Command::new("phoneledger")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Phone resale inventory with deal advice and a running budget")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_name("PATH")
                .help("SQLite file (defaults to $PHONELEDGER_DB, then the platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(phone_cmd())
        .subcommand(budget_cmd())
        .subcommand(json_flags(
            Command::new("stats").about("Inventory and profit totals"),
        ))
        .subcommand(export_cmd())
        .subcommand(Command::new("doctor").about("Check ledger consistency"))
}
