// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Phone, PhoneState};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    pub total_bought: usize,
    pub in_stock: usize,
    pub total_sold: usize,
    pub total_scammed: usize,
    pub total_invested: Decimal,
    pub total_revenue: Decimal,
    pub total_profit: Decimal,
    pub total_lost: Decimal,
}

/// Recomputes the inventory totals from scratch. Money sums saturate instead of overflowing.
pub fn aggregate(phones: &[Phone]) -> Stats {
    let mut s = Stats::default();
    let mut sold_cost = Decimal::ZERO;
    for p in phones {
        s.total_bought += 1;
        s.total_invested = s.total_invested.saturating_add(p.buy_price);
        if let Some(sell) = p.sell_price {
            s.total_revenue = s.total_revenue.saturating_add(sell);
        }
        match p.state {
            PhoneState::Bought => s.in_stock += 1,
            PhoneState::Sold => {
                s.total_sold += 1;
                sold_cost = sold_cost.saturating_add(p.buy_price);
            }
            PhoneState::Scammed => {
                s.total_scammed += 1;
                s.total_lost = s.total_lost.saturating_add(p.buy_price);
            }
        }
    }
    s.total_profit = s.total_revenue.saturating_sub(sold_cost);
    s
}
