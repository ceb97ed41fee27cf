// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pricing and unit conversion.
//!
//! The default [`Valuation::Multiplier`] is a fixed markup on cost. A
//! [`PriceSource`] lets real quotes value the held weight instead.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::aggregate::{
    MetalWeight, RETURN_MULTIPLIER, checked_sum, estimated_return_with, round_half_up,
};
use crate::error::{LedgerError, Result};
use crate::models::{MetalType, PriceQuote, Transaction, WeightUnit};

pub trait PriceSource {
    /// Price of one `unit` of `metal` as of `date`.
    fn price(&self, metal: MetalType, unit: WeightUnit, date: NaiveDate) -> Option<Decimal>;
}

/// Grams per unit. Ounce is the troy ounce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitTable {
    pub qian: Decimal,
    pub gram: Decimal,
    pub ounce: Decimal,
}

impl Default for UnitTable {
    fn default() -> Self {
        Self {
            qian: Decimal::new(375, 2),
            gram: Decimal::ONE,
            ounce: Decimal::new(311034768, 7),
        }
    }
}

impl UnitTable {
    pub fn grams_per(&self, unit: WeightUnit) -> Decimal {
        match unit {
            WeightUnit::Qian => self.qian,
            WeightUnit::Gram => self.gram,
            WeightUnit::Ounce => self.ounce,
        }
    }

    pub fn convert(&self, weight: Decimal, from: WeightUnit, to: WeightUnit) -> Result<Decimal> {
        if from == to {
            return Ok(weight);
        }
        weight
            .checked_mul(self.grams_per(from))
            .and_then(|grams| grams.checked_div(self.grams_per(to)))
            .ok_or(LedgerError::Overflow("converted weight"))
    }
}

/// Buy weight per metal converted into `unit`. Metals with nothing bought are
/// left out.
pub fn grouped_weight_in(
    txs: &[Transaction],
    unit: WeightUnit,
    table: &UnitTable,
) -> Result<Vec<MetalWeight>> {
    let mut groups = Vec::new();
    for metal in MetalType::ALL {
        let converted = txs
            .iter()
            .filter(|t| t.metal_type == metal && t.is_buy())
            .map(|t| table.convert(t.weight, t.weight_unit, unit))
            .collect::<Result<Vec<_>>>()?;
        let weight = checked_sum(converted, "grouped weight")?;
        if !weight.is_zero() {
            groups.push(MetalWeight {
                metal_type: metal,
                weight,
            });
        }
    }
    Ok(groups)
}

/// Bought minus sold weight per metal, in `unit`.
pub fn held_weight_in(
    txs: &[Transaction],
    metal: MetalType,
    unit: WeightUnit,
    table: &UnitTable,
) -> Result<Decimal> {
    let signed = txs
        .iter()
        .filter(|t| t.metal_type == metal)
        .map(|t| {
            let w = table.convert(t.weight, t.weight_unit, unit)?;
            Ok(if t.is_buy() { w } else { -w })
        })
        .collect::<Result<Vec<_>>>()?;
    checked_sum(signed, "held weight")
}

/// In-memory quotes; lookups use the latest quote on or before the date.
#[derive(Debug, Clone, Default)]
pub struct PriceBook {
    quotes: Vec<PriceQuote>,
    units: UnitTable,
}

impl PriceBook {
    pub fn new(units: UnitTable) -> Self {
        Self {
            quotes: Vec::new(),
            units,
        }
    }

    pub fn insert(&mut self, quote: PriceQuote) {
        self.quotes.push(quote);
    }

    pub fn quotes(&self) -> &[PriceQuote] {
        &self.quotes
    }
}

impl PriceSource for PriceBook {
    fn price(&self, metal: MetalType, unit: WeightUnit, date: NaiveDate) -> Option<Decimal> {
        let quote = self
            .quotes
            .iter()
            .filter(|q| q.metal_type == metal && q.date <= date)
            .fold(None::<&PriceQuote>, |best, q| match best {
                Some(b) if b.date > q.date => Some(b),
                _ => Some(q),
            })?;
        // price per quote unit -> price per requested unit
        quote
            .price
            .checked_mul(self.units.grams_per(unit))?
            .checked_div(self.units.grams_per(quote.weight_unit))
    }
}

pub enum Valuation<'a> {
    Multiplier(Decimal),
    Market {
        source: &'a dyn PriceSource,
        units: &'a UnitTable,
        as_of: NaiveDate,
    },
}

impl Default for Valuation<'_> {
    fn default() -> Self {
        Valuation::Multiplier(RETURN_MULTIPLIER)
    }
}

impl Valuation<'_> {
    pub fn estimated_return(&self, txs: &[Transaction], total_cost: Decimal) -> Result<Decimal> {
        match self {
            Valuation::Multiplier(m) => estimated_return_with(total_cost, *m),
            Valuation::Market {
                source,
                units,
                as_of,
            } => {
                let mut value = Decimal::ZERO;
                for metal in MetalType::ALL {
                    let held = held_weight_in(txs, metal, WeightUnit::Gram, units)?;
                    if held.is_zero() {
                        continue;
                    }
                    let price = source.price(metal, WeightUnit::Gram, *as_of).ok_or(
                        LedgerError::MissingPrice {
                            metal,
                            unit: WeightUnit::Gram,
                        },
                    )?;
                    value = held
                        .checked_mul(price)
                        .and_then(|v| value.checked_add(v))
                        .ok_or(LedgerError::Overflow("market value"))?;
                }
                round_half_up(value)
            }
        }
    }
}
