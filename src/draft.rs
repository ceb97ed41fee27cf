// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Partially filled transactions.
//!
//! A [`TransactionDraft`] is what the add and edit flows build up one field at
//! a time. The derived total is recomputed whenever weight, price per unit or
//! labor cost changes, and at no other time.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{LedgerError, Result};
use crate::models::{Currency, MetalType, Transaction, TransactionType, WeightUnit, line_total};

/// One field edit.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    Type(TransactionType),
    Metal(MetalType),
    Date(NaiveDate),
    Weight(Decimal),
    WeightUnit(WeightUnit),
    PricePerUnit(Decimal),
    Currency(Currency),
    LaborCost(Decimal),
    ExchangeRate(Decimal),
    Channel(String),
    Notes(String),
    ImageUrl(String),
}

impl FieldChange {
    pub fn affects_total(&self) -> bool {
        matches!(
            self,
            FieldChange::Weight(_) | FieldChange::PricePerUnit(_) | FieldChange::LaborCost(_)
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionDraft {
    pub r#type: Option<TransactionType>,
    pub metal_type: Option<MetalType>,
    pub date: Option<NaiveDate>,
    pub weight: Option<Decimal>,
    pub weight_unit: Option<WeightUnit>,
    pub price_per_unit: Option<Decimal>,
    pub currency: Option<Currency>,
    pub labor_cost: Option<Decimal>,
    pub exchange_rate: Option<Decimal>,
    pub channel: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    total_amount: Decimal,
    total_overflowed: bool,
}

impl TransactionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    fn recompute_total(&mut self) {
        let price = self.price_per_unit.unwrap_or(Decimal::ZERO);
        let weight = self.weight.unwrap_or(Decimal::ZERO);
        let labor = self.labor_cost.unwrap_or(Decimal::ZERO);
        match line_total(price, weight, labor) {
            Some(total) => {
                self.total_amount = total;
                self.total_overflowed = false;
            }
            None => self.total_overflowed = true,
        }
    }

    pub fn apply(&mut self, change: FieldChange) -> &mut Self {
        let recompute = change.affects_total();
        match change {
            FieldChange::Type(t) => self.r#type = Some(t),
            FieldChange::Metal(m) => self.metal_type = Some(m),
            FieldChange::Date(d) => self.date = Some(d),
            FieldChange::Weight(w) => self.weight = Some(w),
            FieldChange::WeightUnit(u) => self.weight_unit = Some(u),
            FieldChange::PricePerUnit(p) => self.price_per_unit = Some(p),
            FieldChange::Currency(c) => self.currency = Some(c),
            FieldChange::LaborCost(l) => self.labor_cost = Some(l),
            FieldChange::ExchangeRate(r) => self.exchange_rate = Some(r),
            FieldChange::Channel(c) => self.channel = Some(c),
            FieldChange::Notes(n) => self.notes = Some(n),
            FieldChange::ImageUrl(u) => self.image_url = Some(u),
        }
        if recompute {
            self.recompute_total();
        }
        self
    }

    pub fn apply_all(&mut self, changes: impl IntoIterator<Item = FieldChange>) -> &mut Self {
        for change in changes {
            self.apply(change);
        }
        self
    }

    pub fn transaction_type(mut self, t: TransactionType) -> Self {
        self.apply(FieldChange::Type(t));
        self
    }

    pub fn metal_type(mut self, m: MetalType) -> Self {
        self.apply(FieldChange::Metal(m));
        self
    }

    pub fn date(mut self, d: NaiveDate) -> Self {
        self.apply(FieldChange::Date(d));
        self
    }

    pub fn weight(mut self, w: Decimal) -> Self {
        self.apply(FieldChange::Weight(w));
        self
    }

    pub fn weight_unit(mut self, u: WeightUnit) -> Self {
        self.apply(FieldChange::WeightUnit(u));
        self
    }

    pub fn price_per_unit(mut self, p: Decimal) -> Self {
        self.apply(FieldChange::PricePerUnit(p));
        self
    }

    pub fn currency(mut self, c: Currency) -> Self {
        self.apply(FieldChange::Currency(c));
        self
    }

    pub fn labor_cost(mut self, l: Decimal) -> Self {
        self.apply(FieldChange::LaborCost(l));
        self
    }

    pub fn exchange_rate(mut self, r: Decimal) -> Self {
        self.apply(FieldChange::ExchangeRate(r));
        self
    }

    pub fn channel(mut self, c: impl Into<String>) -> Self {
        self.apply(FieldChange::Channel(c.into()));
        self
    }

    pub fn notes(mut self, n: impl Into<String>) -> Self {
        self.apply(FieldChange::Notes(n.into()));
        self
    }

    pub fn image_url(mut self, u: impl Into<String>) -> Self {
        self.apply(FieldChange::ImageUrl(u.into()));
        self
    }

    /// Rejects negative magnitudes, a non-positive exchange rate and a total
    /// that overflows.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("weight", self.weight),
            ("price per unit", self.price_per_unit),
            ("labor cost", self.labor_cost),
        ];
        for (field, value) in non_negative {
            if let Some(v) = value {
                if v < Decimal::ZERO {
                    return Err(LedgerError::validation(
                        field,
                        format!("{} must not be negative", v),
                    ));
                }
            }
        }
        if let Some(rate) = self.exchange_rate {
            if rate <= Decimal::ZERO {
                return Err(LedgerError::validation(
                    "exchange rate",
                    format!("{} must be greater than zero", rate),
                ));
            }
        }
        if self.total_overflowed {
            return Err(LedgerError::validation(
                "total amount",
                "price per unit times weight plus labor cost is out of range",
            ));
        }
        Ok(())
    }
}

impl From<&Transaction> for TransactionDraft {
    fn from(tx: &Transaction) -> Self {
        TransactionDraft {
            r#type: Some(tx.r#type),
            metal_type: Some(tx.metal_type),
            date: Some(tx.date),
            weight: Some(tx.weight),
            weight_unit: Some(tx.weight_unit),
            price_per_unit: Some(tx.price_per_unit),
            currency: Some(tx.currency),
            labor_cost: Some(tx.labor_cost),
            exchange_rate: Some(tx.exchange_rate),
            channel: Some(tx.channel.clone()),
            notes: tx.notes.clone(),
            image_url: tx.image_url.clone(),
            total_amount: tx.total_amount,
            total_overflowed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_follows_price_weight_and_labor() {
        let draft = TransactionDraft::new()
            .weight(Decimal::new(2, 0))
            .price_per_unit(Decimal::new(12000, 0));
        assert_eq!(draft.total_amount(), Decimal::new(24000, 0));

        let draft = draft.labor_cost(Decimal::new(500, 0));
        assert_eq!(draft.total_amount(), Decimal::new(24500, 0));
    }

    #[test]
    fn unrelated_fields_leave_total_alone() {
        let mut draft = TransactionDraft::new().weight(Decimal::new(15, 1));
        draft.total_amount = Decimal::new(7, 0);
        draft.apply(FieldChange::Channel("XX銀樓".into()));
        draft.apply(FieldChange::Currency(Currency::Usd));
        assert_eq!(draft.total_amount(), Decimal::new(7, 0));
    }

    #[test]
    fn validate_rejects_negative_weight() {
        let draft = TransactionDraft::new().weight(Decimal::new(-1, 0));
        assert_eq!(
            draft.validate(),
            Err(LedgerError::validation("weight", "-1 must not be negative"))
        );
    }

    #[test]
    fn validate_rejects_overflowing_total() {
        let draft = TransactionDraft::new()
            .weight(Decimal::from(100_000_000_000_000_i64))
            .price_per_unit(Decimal::from(100_000_000_000_000_000_i64));
        assert!(matches!(
            draft.validate(),
            Err(LedgerError::Validation { field: "total amount", .. })
        ));

        // bringing the price back into range clears the error
        let draft = draft.price_per_unit(Decimal::new(12000, 0));
        assert!(draft.validate().is_ok());
        assert_eq!(
            draft.total_amount(),
            Decimal::from(1_200_000_000_000_000_000_i64)
        );
    }

    #[test]
    fn validate_rejects_zero_exchange_rate() {
        let draft = TransactionDraft::new().exchange_rate(Decimal::ZERO);
        assert!(matches!(
            draft.validate(),
            Err(LedgerError::Validation { field: "exchange rate", .. })
        ));
    }
}
