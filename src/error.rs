// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

use crate::models::{MetalType, WeightUnit};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Transaction '{0}' not found")]
    NotFound(String),

    #[error("No user is logged in")]
    NotLoggedIn,

    #[error("No price for {metal} per {unit}")]
    MissingPrice { metal: MetalType, unit: WeightUnit },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0} is too large to compute")]
    Overflow(&'static str),
}

impl LedgerError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        LedgerError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
