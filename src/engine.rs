// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Phone state transitions and the budget movement each one causes.
//!
//! | From    | To      | Needs      | Budget delta        |
//! |---------|---------|------------|---------------------|
//! | bought  | sold    | sell price | `+sell_price`       |
//! | bought  | scammed |            | `0`                 |
//! | sold    | scammed |            | `-previous sell`    |
//! | scammed | sold    | sell price | `+sell_price`       |
//!
//! Every other pair is rejected and nothing changes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::LedgerError;
use crate::evaluator::{self, Advice, DealAction};
use crate::models::{Budget, Phone, PhoneState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Sell,
    ScamUnsold,
    ScamSold,
}

fn rule_for(from: PhoneState, to: PhoneState) -> Option<Rule> {
    use PhoneState::*;
    match (from, to) {
        (Bought, Sold) | (Scammed, Sold) => Some(Rule::Sell),
        (Bought, Scammed) => Some(Rule::ScamUnsold),
        (Sold, Scammed) => Some(Rule::ScamSold),
        (Bought, Bought) | (Sold, Sold) | (Scammed, Scammed) => None,
        (Sold, Bought) | (Scammed, Bought) => None,
    }
}

pub fn is_allowed(from: PhoneState, to: PhoneState) -> bool {
    rule_for(from, to).is_some()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransitionOutcome {
    pub phone: Phone,
    pub budget: Budget,
    pub budget_delta: Decimal,
    pub messages: Vec<Advice>,
}

/// Validates `phone.state -> to` and computes the resulting phone, budget and advice.
///
/// Inputs are borrowed and never modified; on error the caller still holds the
/// untouched originals.
pub fn apply_transition(
    phone: &Phone,
    budget: &Budget,
    to: PhoneState,
    sell_price: Option<Decimal>,
    now: DateTime<Utc>,
) -> Result<TransitionOutcome, LedgerError> {
    let rule = rule_for(phone.state, to).ok_or(LedgerError::InvalidTransition {
        from: phone.state,
        to,
    })?;

    let mut updated = phone.clone();
    let (delta, action) = match rule {
        Rule::Sell => {
            let price = require_positive_price(sell_price)?;
            updated.sell_price = Some(price);
            (price, DealAction::Sell)
        }
        Rule::ScamUnsold => (Decimal::ZERO, DealAction::Scam),
        Rule::ScamSold => {
            let reversed = phone.sell_price.unwrap_or(Decimal::ZERO);
            updated.sell_price = None;
            (-reversed, DealAction::Scam)
        }
    };
    updated.state = to;
    updated.updated_at = now;

    let messages = evaluator::evaluate(
        action,
        updated.buy_price,
        updated.sell_price,
        &updated.label(),
    );

    Ok(TransitionOutcome {
        budget: budget.apply(delta, now)?,
        phone: updated,
        budget_delta: delta,
        messages,
    })
}

fn require_positive_price(price: Option<Decimal>) -> Result<Decimal, LedgerError> {
    let price = price.ok_or(LedgerError::MissingRequiredField("sell_price"))?;
    if price <= Decimal::ZERO {
        return Err(LedgerError::InvalidValue(format!(
            "sell_price must be positive, got {}",
            price
        )));
    }
    Ok(price)
}
