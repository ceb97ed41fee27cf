// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only summaries over a snapshot of transactions.
//!
//! Amounts are summed as stored: no currency conversion and, outside of
//! [`crate::valuation`], no unit conversion.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{LedgerError, Result};
use crate::models::{Currency, MetalType, Transaction, WeightUnit};
use crate::valuation::Valuation;

/// Multiplier applied to total cost when no market valuation is configured.
pub const RETURN_MULTIPLIER: Decimal = Decimal::from_parts(115, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetalFilter {
    All,
    Only(MetalType),
}

impl MetalFilter {
    pub fn matches(self, tx: &Transaction) -> bool {
        match self {
            MetalFilter::All => true,
            MetalFilter::Only(m) => tx.metal_type == m,
        }
    }
}

impl std::str::FromStr for MetalFilter {
    type Err = LedgerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") || s.trim() == "全部" {
            Ok(MetalFilter::All)
        } else {
            s.parse().map(MetalFilter::Only)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetalWeight {
    pub metal_type: MetalType,
    pub weight: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_cost: Decimal,
    pub estimated_return: Decimal,
    pub profit: Decimal,
    pub transaction_count: usize,
}

/// Adds up `values`, failing with [`LedgerError::Overflow`] naming `what`
/// instead of panicking.
pub fn checked_sum(
    values: impl IntoIterator<Item = Decimal>,
    what: &'static str,
) -> Result<Decimal> {
    values.into_iter().try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(v).ok_or(LedgerError::Overflow(what))
    })
}

/// Sum of `total_amount` over Buy transactions.
pub fn total_cost(txs: &[Transaction]) -> Result<Decimal> {
    // Sells are not netted out of cost basis. Realized gain tracking would
    // start from `sell_proceeds` and a lot-matching pass over buys.
    checked_sum(
        txs.iter().filter(|t| t.is_buy()).map(|t| t.total_amount),
        "total cost",
    )
}

/// Sum of `total_amount` over Sell transactions.
pub fn sell_proceeds(txs: &[Transaction]) -> Result<Decimal> {
    checked_sum(
        txs.iter().filter(|t| !t.is_buy()).map(|t| t.total_amount),
        "sell proceeds",
    )
}

/// Rounds half toward positive infinity.
pub fn round_half_up(value: Decimal) -> Result<Decimal> {
    value
        .checked_add(Decimal::new(5, 1))
        .map(|v| v.floor())
        .ok_or(LedgerError::Overflow("estimated return"))
}

pub fn estimated_return(total_cost: Decimal) -> Result<Decimal> {
    estimated_return_with(total_cost, RETURN_MULTIPLIER)
}

pub fn estimated_return_with(total_cost: Decimal, multiplier: Decimal) -> Result<Decimal> {
    let scaled = total_cost
        .checked_mul(multiplier)
        .ok_or(LedgerError::Overflow("estimated return"))?;
    round_half_up(scaled)
}

pub fn profit(estimated_return: Decimal, total_cost: Decimal) -> Result<Decimal> {
    estimated_return
        .checked_sub(total_cost)
        .ok_or(LedgerError::Overflow("profit"))
}

pub fn filter_by_metal(txs: &[Transaction], filter: MetalFilter) -> Vec<Transaction> {
    txs.iter().filter(|t| filter.matches(t)).cloned().collect()
}

/// Buy weight per metal, summed as raw numbers regardless of unit. Metals
/// with nothing bought are left out.
pub fn group_weight_by_metal(txs: &[Transaction]) -> Result<Vec<MetalWeight>> {
    let mut groups = Vec::new();
    for metal in MetalType::ALL {
        let weight = checked_sum(
            txs.iter()
                .filter(|t| t.metal_type == metal && t.is_buy())
                .map(|t| t.weight),
            "grouped weight",
        )?;
        if !weight.is_zero() {
            groups.push(MetalWeight {
                metal_type: metal,
                weight,
            });
        }
    }
    Ok(groups)
}

pub fn recent(txs: &[Transaction], n: usize) -> &[Transaction] {
    &txs[..n.min(txs.len())]
}

pub fn summarize(txs: &[Transaction], valuation: &Valuation<'_>) -> Result<Summary> {
    let total_cost = total_cost(txs)?;
    let estimated_return = valuation.estimated_return(txs, total_cost)?;
    Ok(Summary {
        total_cost,
        estimated_return,
        profit: profit(estimated_return, total_cost)?,
        transaction_count: txs.len(),
    })
}

/// Distinct currencies when more than one is present.
pub fn mixed_currencies(txs: &[Transaction]) -> Option<Vec<Currency>> {
    let set: BTreeSet<Currency> = txs.iter().map(|t| t.currency).collect();
    (set.len() > 1).then(|| set.into_iter().collect())
}

/// Distinct weight units when more than one is present.
pub fn mixed_units(txs: &[Transaction]) -> Option<Vec<WeightUnit>> {
    let set: BTreeSet<WeightUnit> = txs.iter().map(|t| t.weight_unit).collect();
    (set.len() > 1).then(|| set.into_iter().collect())
}
