// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneState {
    Bought,
    Sold,
    Scammed,
}

impl PhoneState {
    pub const ALL: [PhoneState; 3] = [PhoneState::Bought, PhoneState::Sold, PhoneState::Scammed];

    pub fn as_str(&self) -> &'static str {
        match self {
            PhoneState::Bought => "bought",
            PhoneState::Sold => "sold",
            PhoneState::Scammed => "scammed",
        }
    }
}

impl fmt::Display for PhoneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhoneState {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bought" => Ok(PhoneState::Bought),
            "sold" => Ok(PhoneState::Sold),
            "scammed" => Ok(PhoneState::Scammed),
            other => Err(LedgerError::InvalidValue(format!(
                "unknown phone state '{}' (use bought|sold|scammed)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phone {
    pub id: i64,
    pub model: String,
    pub brand: String,
    pub buy_price: Decimal,
    pub sell_price: Option<Decimal>,
    pub state: PhoneState,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Phone {
    /// `sell_price - buy_price`, only while a sale is on record.
    pub fn profit(&self) -> Option<Decimal> {
        self.sell_price.and_then(|s| s.checked_sub(self.buy_price))
    }

    /// "Brand Model", the label advisory messages refer to.
    pub fn label(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

/// Input for recording a purchase; the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewPhone {
    pub model: String,
    pub brand: String,
    pub buy_price: Decimal,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub total_money: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Returns the budget moved by `delta`. A zero delta leaves the timestamp alone.
    pub fn apply(&self, delta: Decimal, now: DateTime<Utc>) -> Result<Budget, LedgerError> {
        if delta.is_zero() {
            return Ok(self.clone());
        }
        let total_money = self.total_money.checked_add(delta).ok_or_else(|| {
            LedgerError::InvalidValue(format!(
                "budget {} cannot move by {} without overflowing",
                self.total_money, delta
            ))
        })?;
        Ok(Budget {
            total_money,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// Refund the purchase only while the phone is still in stock.
    #[default]
    Observed,
    /// Undo everything the phone did to the budget.
    Reverse,
}
