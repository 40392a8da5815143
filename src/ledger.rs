// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! SQLite-backed phone inventory and the budget row.
//!
//! Every mutating call runs inside one database transaction, so a rejected
//! transition or a failed write leaves both tables as they were.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, info};
use regex::Regex;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

use crate::engine::{self, TransitionOutcome};
use crate::error::LedgerError;
use crate::evaluator::{self, Advice, DealAction};
use crate::models::{Budget, DeletePolicy, NewPhone, Phone, PhoneState};

const PHONE_COLS: &str =
    "id, model, brand, buy_price, sell_price, state, notes, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct Purchase {
    pub phone: Phone,
    pub budget: Budget,
    pub messages: Vec<Advice>,
}

#[derive(Debug, Clone)]
pub struct Deletion {
    pub phone: Phone,
    pub budget: Budget,
    pub budget_delta: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct PhoneFilter {
    pub state: Option<PhoneState>,
    /// Matched against "brand model".
    pub pattern: Option<Regex>,
}

impl PhoneFilter {
    fn matches(&self, phone: &Phone) -> bool {
        if self.state.is_some_and(|s| s != phone.state) {
            return false;
        }
        match &self.pattern {
            Some(re) => re.is_match(&phone.label()),
            None => true,
        }
    }
}

struct RawPhone {
    id: i64,
    model: String,
    brand: String,
    buy_price: String,
    sell_price: Option<String>,
    state: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn raw_phone(r: &Row<'_>) -> rusqlite::Result<RawPhone> {
    Ok(RawPhone {
        id: r.get(0)?,
        model: r.get(1)?,
        brand: r.get(2)?,
        buy_price: r.get(3)?,
        sell_price: r.get(4)?,
        state: r.get(5)?,
        notes: r.get(6)?,
        created_at: r.get(7)?,
        updated_at: r.get(8)?,
    })
}

impl RawPhone {
    fn into_phone(self) -> Result<Phone> {
        let buy_price = self
            .buy_price
            .parse::<Decimal>()
            .with_context(|| {
                format!("Invalid buy price '{}' for phone {}", self.buy_price, self.id)
            })?;
        let sell_price = match self.sell_price {
            Some(s) => Some(
                s.parse::<Decimal>()
                    .with_context(|| format!("Invalid sell price '{}' for phone {}", s, self.id))?,
            ),
            None => None,
        };
        let state = self
            .state
            .parse::<PhoneState>()
            .with_context(|| format!("Invalid state for phone {}", self.id))?;
        Ok(Phone {
            id: self.id,
            model: self.model,
            brand: self.brand,
            buy_price,
            sell_price,
            state,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

pub fn get_budget(conn: &Connection) -> Result<Budget> {
    let row: Option<(String, DateTime<Utc>)> = conn
        .query_row(
            "SELECT total_money, updated_at FROM budget WHERE id=1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;
    match row {
        Some((total, updated_at)) => {
            let total_money = total
                .parse::<Decimal>()
                .with_context(|| format!("Invalid budget amount '{}'", total))?;
            Ok(Budget {
                total_money,
                updated_at,
            })
        }
        None => {
            let budget = Budget {
                total_money: Decimal::ZERO,
                updated_at: Utc::now(),
            };
            debug!("budget row missing, recreating at zero");
            write_budget(conn, &budget)?;
            Ok(budget)
        }
    }
}

fn write_budget(conn: &Connection, budget: &Budget) -> Result<()> {
    conn.execute(
        "INSERT INTO budget(id, total_money, updated_at) VALUES (1, ?1, ?2)
         ON CONFLICT(id) DO UPDATE SET total_money=excluded.total_money, updated_at=excluded.updated_at",
        params![budget.total_money.to_string(), budget.updated_at],
    )?;
    Ok(())
}

/// Overwrites the running balance.
pub fn set_budget(conn: &Connection, amount: Decimal) -> Result<Budget> {
    let budget = Budget {
        total_money: amount,
        updated_at: Utc::now(),
    };
    write_budget(conn, &budget)?;
    info!("budget set to {}", amount);
    Ok(budget)
}

pub fn get_phone(conn: &Connection, id: i64) -> Result<Phone> {
    let sql = format!("SELECT {} FROM phones WHERE id=?1", PHONE_COLS);
    let raw = conn
        .query_row(&sql, params![id], raw_phone)
        .optional()?
        .ok_or(LedgerError::PhoneNotFound(id))?;
    raw.into_phone()
}

/// Newest first.
pub fn list_phones(conn: &Connection, filter: &PhoneFilter) -> Result<Vec<Phone>> {
    let sql = format!(
        "SELECT {} FROM phones ORDER BY created_at DESC, id DESC",
        PHONE_COLS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], raw_phone)?;
    let mut out = Vec::new();
    for row in rows {
        let phone = row?.into_phone()?;
        if filter.matches(&phone) {
            out.push(phone);
        }
    }
    Ok(out)
}

pub fn all_phones(conn: &Connection) -> Result<Vec<Phone>> {
    list_phones(conn, &PhoneFilter::default())
}

fn non_empty(value: &str, field: &'static str) -> Result<String, LedgerError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(LedgerError::MissingRequiredField(field));
    }
    Ok(v.to_string())
}

/// Records a purchase: the phone starts out bought and its price leaves the budget.
pub fn add_phone(conn: &mut Connection, new: NewPhone) -> Result<Purchase> {
    let model = non_empty(&new.model, "model")?;
    let brand = non_empty(&new.brand, "brand")?;
    if new.buy_price <= Decimal::ZERO {
        return Err(LedgerError::InvalidValue(format!(
            "buy_price must be positive, got {}",
            new.buy_price
        ))
        .into());
    }
    let notes = new
        .notes
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let now = Utc::now();

    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO phones(model, brand, buy_price, sell_price, state, notes, created_at, updated_at)
         VALUES (?1, ?2, ?3, NULL, ?4, ?5, ?6, ?6)",
        params![
            model,
            brand,
            new.buy_price.to_string(),
            PhoneState::Bought.as_str(),
            notes,
            now
        ],
    )?;
    let id = tx.last_insert_rowid();
    let budget = get_budget(&tx)?.apply(-new.buy_price, now)?;
    write_budget(&tx, &budget)?;
    tx.commit()?;

    let phone = Phone {
        id,
        model,
        brand,
        buy_price: new.buy_price,
        sell_price: None,
        state: PhoneState::Bought,
        notes,
        created_at: now,
        updated_at: now,
    };
    info!("bought phone {} ({}) for {}", id, phone.label(), phone.buy_price);
    let messages = evaluator::evaluate(DealAction::Buy, phone.buy_price, None, &phone.label());
    Ok(Purchase {
        phone,
        budget,
        messages,
    })
}

fn write_phone(conn: &Connection, phone: &Phone) -> Result<()> {
    conn.execute(
        "UPDATE phones SET sell_price=?1, state=?2, updated_at=?3 WHERE id=?4",
        params![
            phone.sell_price.map(|d| d.to_string()),
            phone.state.as_str(),
            phone.updated_at,
            phone.id
        ],
    )?;
    Ok(())
}

/// Moves a phone to `to`, committing the phone and budget together or not at all.
pub fn change_state(
    conn: &mut Connection,
    id: i64,
    to: PhoneState,
    sell_price: Option<Decimal>,
) -> Result<TransitionOutcome> {
    let tx = conn.transaction()?;
    let phone = get_phone(&tx, id)?;
    let budget = get_budget(&tx)?;
    let outcome = engine::apply_transition(&phone, &budget, to, sell_price, Utc::now())?;
    write_phone(&tx, &outcome.phone)?;
    if outcome.budget != budget {
        write_budget(&tx, &outcome.budget)?;
    }
    tx.commit()?;
    info!(
        "phone {} moved {} -> {} (budget {:+})",
        id, phone.state, to, outcome.budget_delta
    );
    Ok(outcome)
}

/// Budget adjustment owed when a phone record is removed under `policy`.
pub fn deletion_delta(phone: &Phone, policy: DeletePolicy) -> Result<Decimal, LedgerError> {
    match (policy, phone.state) {
        (_, PhoneState::Bought) => Ok(phone.buy_price),
        (DeletePolicy::Observed, _) => Ok(Decimal::ZERO),
        (DeletePolicy::Reverse, PhoneState::Sold) => {
            let sell = phone.sell_price.unwrap_or(Decimal::ZERO);
            phone.buy_price.checked_sub(sell).ok_or_else(|| {
                LedgerError::InvalidValue(format!(
                    "cannot reverse phone {} (bought {}, sold {})",
                    phone.id, phone.buy_price, sell
                ))
            })
        }
        (DeletePolicy::Reverse, PhoneState::Scammed) => Ok(phone.buy_price),
    }
}

pub fn delete_phone(conn: &mut Connection, id: i64, policy: DeletePolicy) -> Result<Deletion> {
    let tx = conn.transaction()?;
    let phone = get_phone(&tx, id)?;
    let delta = deletion_delta(&phone, policy)?;
    let budget = get_budget(&tx)?.apply(delta, Utc::now())?;
    tx.execute("DELETE FROM phones WHERE id=?1", params![id])?;
    if !delta.is_zero() {
        write_budget(&tx, &budget)?;
    }
    tx.commit()?;
    info!("deleted phone {} ({:?} policy, budget {:+})", id, policy, delta);
    Ok(Deletion {
        phone,
        budget,
        budget_delta: delta,
    })
}
