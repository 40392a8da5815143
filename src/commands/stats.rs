// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger;
use crate::stats::aggregate;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let stats = aggregate(&ledger::all_phones(conn)?);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &stats)? {
        let data = vec![
            vec!["Phones bought".into(), stats.total_bought.to_string()],
            vec!["In stock".into(), stats.in_stock.to_string()],
            vec!["Sold".into(), stats.total_sold.to_string()],
            vec!["Scammed".into(), stats.total_scammed.to_string()],
            vec!["Invested".into(), fmt_money(&stats.total_invested)],
            vec!["Revenue".into(), fmt_money(&stats.total_revenue)],
            vec!["Profit".into(), fmt_money(&stats.total_profit)],
            vec!["Lost to scams".into(), fmt_money(&stats.total_lost)],
        ];
        println!("{}", pretty_table(&["Metric", "Value"], data));
    }
    Ok(())
}
