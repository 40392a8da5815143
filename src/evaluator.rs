// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Advisory messages for purchases, sales and scams.
//!
//! Everything here is a pure function of prices: no storage, no clock.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

const CHEAP_BUY: Decimal = Decimal::from_parts(200, 0, 0, false, 0);
const PRICEY_BUY: Decimal = Decimal::from_parts(800, 0, 0, false, 0);
const EXCELLENT_PCT: Decimal = Decimal::from_parts(30, 0, 0, false, 0);
const GOOD_PCT: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub message: String,
}

impl Advice {
    fn new(severity: Severity, message: String) -> Self {
        Advice { severity, message }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealAction {
    Buy,
    Sell,
    Scam,
}

/// Rounds half away from zero, so 0.125 reads as 0.13.
fn round_to(d: Decimal, dp: u32) -> Decimal {
    d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

pub fn fmt_usd(d: Decimal) -> String {
    format!("${:.2}", round_to(d, 2))
}

/// Profit as a percentage of the buy price; zero when there is no buy price to divide by.
/// `None` when the ratio does not fit in a `Decimal`.
pub fn profit_pct(buy_price: Decimal, sell_price: Decimal) -> Option<Decimal> {
    if buy_price.is_zero() {
        return Some(Decimal::ZERO);
    }
    sell_price
        .checked_sub(buy_price)?
        .checked_div(buy_price)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

pub fn evaluate(
    action: DealAction,
    buy_price: Decimal,
    sell_price: Option<Decimal>,
    label: &str,
) -> Vec<Advice> {
    match action {
        DealAction::Buy => vec![evaluate_buy(buy_price, label)],
        DealAction::Sell => match sell_price {
            Some(sell) => vec![evaluate_sell(buy_price, sell, label)],
            None => Vec::new(),
        },
        DealAction::Scam => vec![Advice::new(
            Severity::Error,
            format!(
                "Sorry for your loss! You lost {} to a scam. Be more careful with future transactions.",
                fmt_usd(buy_price)
            ),
        )],
    }
}

fn evaluate_buy(buy_price: Decimal, label: &str) -> Advice {
    if buy_price < CHEAP_BUY {
        Advice::new(
            Severity::Success,
            format!(
                "Great deal! {} for {} is below market average.",
                label,
                fmt_usd(buy_price)
            ),
        )
    } else if buy_price > PRICEY_BUY {
        Advice::new(
            Severity::Warning,
            format!(
                "High investment! Make sure you can sell this {} for a good profit.",
                label
            ),
        )
    } else {
        Advice::new(
            Severity::Info,
            format!(
                "Fair price for {}. Check market trends before buying.",
                label
            ),
        )
    }
}

fn evaluate_sell(buy_price: Decimal, sell_price: Decimal, label: &str) -> Advice {
    let Some((profit, pct)) = sell_price
        .checked_sub(buy_price)
        .zip(profit_pct(buy_price, sell_price))
    else {
        return evaluate_unmeasurable_sell(buy_price, sell_price, label);
    };
    let pct_s = format!("{:.1}", round_to(pct, 1));

    if pct > EXCELLENT_PCT {
        Advice::new(
            Severity::Success,
            format!(
                "Excellent! You made {} ({}%) profit on this {}!",
                fmt_usd(profit),
                pct_s,
                label
            ),
        )
    } else if pct > GOOD_PCT {
        Advice::new(
            Severity::Success,
            format!(
                "Good profit! You made {} ({}%) on this sale.",
                fmt_usd(profit),
                pct_s
            ),
        )
    } else if profit > Decimal::ZERO {
        Advice::new(
            Severity::Info,
            format!(
                "Small profit of {}. Consider if it was worth your time and effort.",
                fmt_usd(profit)
            ),
        )
    } else {
        Advice::new(
            Severity::Warning,
            format!(
                "You lost {} on this sale. Review your buying strategy.",
                fmt_usd(profit.abs())
            ),
        )
    }
}

/// Amounts too large to express; only the direction of the sale is reported.
fn evaluate_unmeasurable_sell(buy_price: Decimal, sell_price: Decimal, label: &str) -> Advice {
    if sell_price > buy_price {
        Advice::new(
            Severity::Success,
            format!(
                "Excellent! You made a profit too large to express on this {}!",
                label
            ),
        )
    } else {
        Advice::new(
            Severity::Warning,
            "You lost more than can be expressed on this sale. Review your buying strategy."
                .to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_goes_away_from_zero() {
        assert_eq!(fmt_usd(Decimal::new(125, 3)), "$0.13");
        assert_eq!(fmt_usd(Decimal::new(40, 0)), "$40.00");
    }

    #[test]
    fn zero_buy_price_does_not_divide() {
        assert_eq!(profit_pct(Decimal::ZERO, Decimal::TEN), Some(Decimal::ZERO));
    }

    #[test]
    fn oversized_ratio_is_none() {
        let cent = Decimal::new(1, 2);
        assert_eq!(profit_pct(cent, Decimal::MAX), None);
        assert_eq!(
            profit_pct(Decimal::new(100, 0), Decimal::new(130, 0)),
            Some(Decimal::new(30, 0))
        );
    }
}
