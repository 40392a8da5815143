// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Utc;
use phoneledger::models::{Phone, PhoneState};
use phoneledger::stats::{aggregate, Stats};
use rust_decimal::Decimal;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn phone(id: i64, state: PhoneState, buy: &str, sell: Option<&str>) -> Phone {
    let now = Utc::now();
    Phone {
        id,
        model: format!("Model {}", id),
        brand: "Brand".into(),
        buy_price: d(buy),
        sell_price: sell.map(d),
        state,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn empty_inventory_is_all_zero() {
    assert_eq!(aggregate(&[]), Stats::default());
}

#[test]
fn totals_follow_states() {
    let phones = vec![
        phone(1, PhoneState::Bought, "300", None),
        phone(2, PhoneState::Sold, "200", Some("260.50")),
        phone(3, PhoneState::Sold, "100", Some("90")),
        phone(4, PhoneState::Scammed, "150", None),
    ];
    let s = aggregate(&phones);

    assert_eq!(s.total_bought, 4);
    assert_eq!(s.in_stock, 1);
    assert_eq!(s.total_sold, 2);
    assert_eq!(s.total_scammed, 1);
    assert_eq!(s.total_invested, d("750"));
    assert_eq!(s.total_revenue, d("350.50"));
    assert_eq!(s.total_profit, d("50.50"));
    assert_eq!(s.total_lost, d("150"));
}

#[test]
fn oversized_totals_saturate() {
    let mut big = phone(1, PhoneState::Sold, "1", Some("1"));
    big.sell_price = Some(Decimal::MAX);
    let mut other = big.clone();
    other.id = 2;
    let mut scammed = phone(3, PhoneState::Scammed, "1", None);
    scammed.buy_price = Decimal::MAX;
    let mut scammed_too = scammed.clone();
    scammed_too.id = 4;

    let s = aggregate(&[big, other, scammed, scammed_too]);
    assert_eq!(s.total_revenue, Decimal::MAX);
    assert_eq!(s.total_lost, Decimal::MAX);
    assert_eq!(s.total_invested, Decimal::MAX);
    assert_eq!(s.total_profit, Decimal::MAX - d("2"));
}
