// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{self, PhoneFilter};
use crate::models::{DeletePolicy, NewPhone, Phone, PhoneState};
use crate::utils::{
    fmt_money, fmt_opt_money, maybe_print_json, parse_decimal, parse_id, parse_pattern,
    pretty_table, print_messages, required,
};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("state", sub)) => change_state(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// A phone plus its derived profit, the shape `--json` prints.
#[derive(Serialize)]
pub struct PhoneView<'a> {
    #[serde(flatten)]
    pub phone: &'a Phone,
    pub profit: Option<Decimal>,
}

impl<'a> From<&'a Phone> for PhoneView<'a> {
    fn from(phone: &'a Phone) -> Self {
        PhoneView {
            phone,
            profit: phone.profit(),
        }
    }
}

fn phone_rows(phones: &[Phone]) -> Vec<Vec<String>> {
    phones
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.brand.clone(),
                p.model.clone(),
                p.state.to_string(),
                fmt_money(&p.buy_price),
                fmt_opt_money(p.sell_price),
                fmt_opt_money(p.profit()),
                p.created_at.format("%Y-%m-%d").to_string(),
                p.notes.clone().unwrap_or_default(),
            ]
        })
        .collect()
}

const PHONE_HEADERS: [&str; 9] = [
    "ID", "Brand", "Model", "State", "Bought", "Sold", "Profit", "Added", "Notes",
];

fn add(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let new = NewPhone {
        model: required(sub, "model")?.to_string(),
        brand: required(sub, "brand")?.to_string(),
        buy_price: parse_decimal(required(sub, "buy_price")?)?,
        notes: sub.get_one::<String>("notes").cloned(),
    };
    let purchase = ledger::add_phone(conn, new)?;
    let out = json!({
        "phone": PhoneView::from(&purchase.phone),
        "budget": purchase.budget,
        "messages": purchase.messages,
    });
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &out)? {
        println!(
            "Recorded phone {}: {} for {} (budget now {})",
            purchase.phone.id,
            purchase.phone.label(),
            fmt_money(&purchase.phone.buy_price),
            fmt_money(&purchase.budget.total_money)
        );
        print_messages(&purchase.messages);
    }
    Ok(())
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Phone>> {
    let state = match sub.get_one::<String>("state") {
        Some(s) => Some(s.parse::<PhoneState>()?),
        None => None,
    };
    let pattern = match sub.get_one::<String>("match") {
        Some(p) => Some(parse_pattern(p)?),
        None => None,
    };
    ledger::list_phones(conn, &PhoneFilter { state, pattern })
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let phones = query_rows(conn, sub)?;
    let views: Vec<PhoneView<'_>> = phones.iter().map(PhoneView::from).collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &views)? {
        println!("{}", pretty_table(&PHONE_HEADERS, phone_rows(&phones)));
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let phone = ledger::get_phone(conn, parse_id(required(sub, "id")?)?)?;
    if !maybe_print_json(
        sub.get_flag("json"),
        sub.get_flag("jsonl"),
        &PhoneView::from(&phone),
    )? {
        println!(
            "{}",
            pretty_table(&PHONE_HEADERS, phone_rows(std::slice::from_ref(&phone)))
        );
    }
    Ok(())
}

fn change_state(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(required(sub, "id")?)?;
    let to = required(sub, "to")?.parse::<PhoneState>()?;
    let sell_price = match sub.get_one::<String>("sell_price") {
        Some(s) => Some(parse_decimal(s)?),
        None => None,
    };
    let outcome = ledger::change_state(conn, id, to, sell_price)?;
    let out = json!({
        "phone": PhoneView::from(&outcome.phone),
        "budget": outcome.budget,
        "budget_delta": outcome.budget_delta,
        "messages": outcome.messages,
    });
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &out)? {
        println!(
            "Phone {} is now {} (budget {} -> {})",
            id,
            outcome.phone.state,
            fmt_money(&outcome.budget_delta),
            fmt_money(&outcome.budget.total_money)
        );
        print_messages(&outcome.messages);
    }
    Ok(())
}

fn remove(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(required(sub, "id")?)?;
    let policy = if sub.get_flag("reverse") {
        DeletePolicy::Reverse
    } else {
        DeletePolicy::Observed
    };
    let deletion = ledger::delete_phone(conn, id, policy)?;
    if deletion.budget_delta.is_zero() {
        println!("Removed phone {} ({})", id, deletion.phone.label());
    } else {
        println!(
            "Removed phone {} ({}); budget adjusted by {} to {}",
            id,
            deletion.phone.label(),
            fmt_money(&deletion.budget_delta),
            fmt_money(&deletion.budget.total_money)
        );
    }
    Ok(())
}
