// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::phones::PhoneView;
use crate::ledger;
use crate::utils::required;
use anyhow::{Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("phones", sub)) => export_phones(conn, sub),
        _ => Ok(()),
    }
}

fn export_phones(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = required(sub, "format")?.trim().to_lowercase();
    let out = required(sub, "out")?.trim();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    // Oldest first, the order they were bought in
    let mut phones = ledger::all_phones(conn)?;
    phones.reverse();

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out)?;
        wtr.write_record([
            "id",
            "brand",
            "model",
            "state",
            "buy_price",
            "sell_price",
            "profit",
            "notes",
            "created_at",
            "updated_at",
        ])?;
        for p in &phones {
            wtr.write_record([
                p.id.to_string(),
                p.brand.clone(),
                p.model.clone(),
                p.state.to_string(),
                p.buy_price.to_string(),
                p.sell_price.map(|d| d.to_string()).unwrap_or_default(),
                p.profit().map(|d| d.to_string()).unwrap_or_default(),
                p.notes.clone().unwrap_or_default(),
                p.created_at.to_rfc3339(),
                p.updated_at.to_rfc3339(),
            ])?;
        }
        wtr.flush()?;
    } else {
        let items: Vec<PhoneView<'_>> = phones.iter().map(PhoneView::from).collect();
        std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
    }
    println!("Exported {} phones to {}", phones.len(), out);
    Ok(())
}
