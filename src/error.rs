// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

use crate::models::PhoneState;

/// User-facing failures of ledger operations. None of them leaves a partial write behind.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("cannot move a phone from {from} to {to}")]
    InvalidTransition { from: PhoneState, to: PhoneState },

    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("phone {0} not found")]
    PhoneNotFound(i64),
}
