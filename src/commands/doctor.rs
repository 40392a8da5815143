// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger;
use crate::models::{Phone, PhoneState};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

/// Returns `(issue, detail)` pairs; empty means the ledger is consistent.
pub fn find_issues(conn: &Connection) -> Result<Vec<(String, String)>> {
    let mut rows = Vec::new();

    let budget_rows: i64 = conn.query_row("SELECT COUNT(*) FROM budget", [], |r| r.get(0))?;
    if budget_rows != 1 {
        rows.push(("budget_rows".into(), format!("{} rows, expected 1", budget_rows)));
    }

    for p in ledger::all_phones(conn)? {
        rows.extend(phone_issues(&p));
    }
    Ok(rows)
}

fn phone_issues(p: &Phone) -> Vec<(String, String)> {
    let mut out = Vec::new();
    if p.buy_price <= Decimal::ZERO {
        out.push(("non_positive_buy_price".into(), format!("phone {} ({})", p.id, p.buy_price)));
    }
    match (p.state, p.sell_price) {
        (PhoneState::Sold, None) => {
            out.push(("sold_without_price".into(), format!("phone {}", p.id)));
        }
        (PhoneState::Sold, Some(s)) if s <= Decimal::ZERO => {
            out.push(("non_positive_sell_price".into(), format!("phone {} ({})", p.id, s)));
        }
        (PhoneState::Bought | PhoneState::Scammed, Some(s)) => {
            out.push((
                "stale_sell_price".into(),
                format!("phone {} is {} but has sell price {}", p.id, p.state, s),
            ));
        }
        _ => {}
    }
    out
}

pub fn handle(conn: &Connection) -> Result<()> {
    let issues = find_issues(conn)?;
    if issues.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        let rows = issues.into_iter().map(|(i, d)| vec![i, d]).collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
