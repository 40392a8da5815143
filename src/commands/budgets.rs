// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table, required};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, sub)?,
        Some(("set", sub)) => set(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let budget = ledger::get_budget(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &budget)? {
        println!(
            "{}",
            pretty_table(
                &["Total Money", "Updated"],
                vec![vec![
                    fmt_money(&budget.total_money),
                    budget.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                ]],
            )
        );
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(required(sub, "amount")?)?;
    let budget = ledger::set_budget(conn, amount)?;
    println!("Budget set to {}", fmt_money(&budget.total_money));
    Ok(())
}
