// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use phoneledger::commands::{budgets, doctor, phones};
use phoneledger::error::LedgerError;
use phoneledger::models::PhoneState;
use phoneledger::{cli, db, ledger};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn run_phone(conn: &mut Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["phoneledger", "phone"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("phone", phone_m)) = matches.subcommand() {
        phones::handle(conn, phone_m)
    } else {
        panic!("no phone subcommand");
    }
}

#[test]
fn add_sell_and_list_through_cli() {
    let mut conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "phoneledger",
        "budget",
        "set",
        "--amount",
        " 1000 ",
    ]);
    if let Some(("budget", budget_m)) = matches.subcommand() {
        budgets::handle(&conn, budget_m).unwrap();
    } else {
        panic!("no budget subcommand");
    }

    run_phone(
        &mut conn,
        &["add", "--brand", "Apple", "--model", "iPhone 11", "--buy-price", "150", "--json"],
    )
    .unwrap();
    run_phone(
        &mut conn,
        &["add", "--brand", "Samsung", "--model", "S20", "--buy-price", "300"],
    )
    .unwrap();
    run_phone(&mut conn, &["state", "--id", " 1 ", "--to", "sold", "--sell-price", "210"]).unwrap();

    assert_eq!(
        ledger::get_budget(&conn).unwrap().total_money,
        "760".parse::<Decimal>().unwrap()
    );

    let matches = cli::build_cli().get_matches_from([
        "phoneledger",
        "phone",
        "list",
        "--state",
        "sold",
    ]);
    let Some(("phone", phone_m)) = matches.subcommand() else {
        panic!("no phone subcommand");
    };
    let Some(("list", list_m)) = phone_m.subcommand() else {
        panic!("no list subcommand");
    };
    let rows = phones::query_rows(&conn, list_m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].brand, "Apple");
    assert_eq!(rows[0].state, PhoneState::Sold);
    assert!(doctor::find_issues(&conn).unwrap().is_empty());
}

#[test]
fn state_change_without_price_fails() {
    let mut conn = setup();
    run_phone(
        &mut conn,
        &["add", "--brand", "Apple", "--model", "iPhone 11", "--buy-price", "150"],
    )
    .unwrap();
    let err = run_phone(&mut conn, &["state", "--id", "1", "--to", "sold"]).unwrap_err();
    assert!(err.to_string().contains("sell_price"));
}

#[test]
fn rm_with_reverse_flag_restores_budget() {
    let mut conn = setup();
    run_phone(
        &mut conn,
        &["add", "--brand", "Apple", "--model", "iPhone 11", "--buy-price", "150"],
    )
    .unwrap();
    run_phone(&mut conn, &["state", "--id", "1", "--to", "sold", "--sell-price", "200"]).unwrap();
    assert_eq!(
        ledger::get_budget(&conn).unwrap().total_money,
        Decimal::from(50)
    );
    run_phone(&mut conn, &["rm", "--id", "1", "--reverse"]).unwrap();
    assert!(ledger::get_budget(&conn).unwrap().total_money.is_zero());
}

#[test]
fn bad_list_pattern_is_rejected() {
    let conn = setup();
    let matches =
        cli::build_cli().get_matches_from(["phoneledger", "phone", "list", "--match", "(?P<"]);
    let Some(("phone", phone_m)) = matches.subcommand() else {
        panic!("no phone subcommand");
    };
    let Some(("list", list_m)) = phone_m.subcommand() else {
        panic!("no list subcommand");
    };
    let err = phones::query_rows(&conn, list_m).unwrap_err();
    assert!(err.to_string().contains("Invalid regex pattern"));
}

#[test]
fn doctor_flags_inconsistent_rows() {
    let conn = setup();
    conn.execute(
        "INSERT INTO phones(model, brand, buy_price, sell_price, state, created_at, updated_at)
         VALUES ('X', 'Y', '100', NULL, 'sold', datetime('now'), datetime('now'))",
        [],
    )
    .unwrap();
    let issues = doctor::find_issues(&conn).unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].0, "sold_without_price");
}

#[test]
fn negative_sell_price_reaches_domain_validation() {
    let mut conn = setup();
    run_phone(
        &mut conn,
        &["add", "--brand", "Apple", "--model", "iPhone 11", "--buy-price", "150"],
    )
    .unwrap();
    let err = run_phone(
        &mut conn,
        &["state", "--id", "1", "--to", "sold", "--sell-price", "-5"],
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::InvalidValue(_))
    ));
    let phone = ledger::get_phone(&conn, 1).unwrap();
    assert_eq!(phone.state, PhoneState::Bought);
    assert_eq!(phone.sell_price, None);
}
