// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use phoneledger::models::{NewPhone, PhoneState};
use phoneledger::{cli, commands::exporter, db, ledger};
use rusqlite::Connection;
use rust_decimal::Decimal;
use tempfile::tempdir;

fn seeded_conn() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    for (brand, model, price) in [("Apple", "iPhone X", "250"), ("Nokia", "3310", "20")] {
        ledger::add_phone(
            &mut conn,
            NewPhone {
                model: model.into(),
                brand: brand.into(),
                buy_price: price.parse().unwrap(),
                notes: Some("box, charger".into()),
            },
        )
        .unwrap();
    }
    ledger::change_state(&mut conn, 1, PhoneState::Sold, Some("300".parse().unwrap())).unwrap();
    conn
}

fn run_export(conn: &Connection, format: &str, out: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from([
        "phoneledger",
        "export",
        "phones",
        "--format",
        format,
        "--out",
        out,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(conn, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_phones_json_includes_profit() {
    let conn = seeded_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("phones.json");
    run_export(&conn, "json", &out_path.to_string_lossy()).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["id"], 1);
    assert_eq!(arr[0]["state"], "sold");
    assert_eq!(arr[0]["profit"], "50");
    assert_eq!(arr[1]["profit"], serde_json::Value::Null);
    assert_eq!(arr[1]["notes"], "box, charger");
}

#[test]
fn export_phones_csv_quotes_notes() {
    let conn = seeded_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("phones.csv");
    run_export(&conn, "CSV", &out_path.to_string_lossy()).unwrap();

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[0], "id");
    let recs: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(recs.len(), 2);
    assert_eq!(&recs[0][4], "250");
    assert_eq!(&recs[0][5], "300");
    assert_eq!(
        recs[1][5].parse::<Decimal>().ok(),
        None,
        "unsold phone has no sell price"
    );
    assert_eq!(&recs[1][7], "box, charger");
}

#[test]
fn export_phones_rejects_unknown_format() {
    let conn = seeded_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("phones.xml");
    assert!(run_export(&conn, "xml", &out_path.to_string_lossy()).is_err());
    assert!(!out_path.exists());
}
