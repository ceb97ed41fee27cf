// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Lowercases and drops separators so `K_GOLD`, `k-gold` and `KGold` compare equal.
fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetalType {
    Gold,
    KGold,
    Platinum,
}

impl MetalType {
    pub const ALL: [MetalType; 3] = [MetalType::Gold, MetalType::KGold, MetalType::Platinum];

    pub fn label(self) -> &'static str {
        match self {
            MetalType::Gold => "黃金",
            MetalType::KGold => "K金",
            MetalType::Platinum => "鉑金",
        }
    }
}

impl fmt::Display for MetalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MetalType::Gold => "Gold",
            MetalType::KGold => "K-Gold",
            MetalType::Platinum => "Platinum",
        };
        f.write_str(s)
    }
}

impl FromStr for MetalType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "gold" | "黃金" => Ok(MetalType::Gold),
            "kgold" | "k金" => Ok(MetalType::KGold),
            "platinum" | "鉑金" => Ok(MetalType::Platinum),
            _ => Err(LedgerError::validation(
                "metal type",
                format!("unknown value '{}' (use gold|k-gold|platinum)", s),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Buy,
    Sell,
}

impl TransactionType {
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Buy => "買入",
            TransactionType::Sell => "賣出",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Buy => f.write_str("Buy"),
            TransactionType::Sell => f.write_str("Sell"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "buy" | "買入" => Ok(TransactionType::Buy),
            "sell" | "賣出" => Ok(TransactionType::Sell),
            _ => Err(LedgerError::validation(
                "transaction type",
                format!("unknown value '{}' (use buy|sell)", s),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "TWD")]
    Twd,
    #[serde(rename = "RMB")]
    Rmb,
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Twd, Currency::Rmb, Currency::Usd];

    pub fn code(self) -> &'static str {
        match self {
            Currency::Twd => "TWD",
            Currency::Rmb => "RMB",
            Currency::Usd => "USD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "twd" | "ntd" => Ok(Currency::Twd),
            "rmb" | "cny" => Ok(Currency::Rmb),
            "usd" => Ok(Currency::Usd),
            _ => Err(LedgerError::validation(
                "currency",
                format!("unknown value '{}' (use TWD|RMB|USD)", s),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeightUnit {
    Qian,
    Gram,
    Ounce,
}

impl WeightUnit {
    pub const ALL: [WeightUnit; 3] = [WeightUnit::Qian, WeightUnit::Gram, WeightUnit::Ounce];

    pub fn symbol(self) -> &'static str {
        match self {
            WeightUnit::Qian => "台錢",
            WeightUnit::Gram => "g",
            WeightUnit::Ounce => "oz",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for WeightUnit {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "qian" | "mace" | "台錢" | "錢" => Ok(WeightUnit::Qian),
            "gram" | "grams" | "g" => Ok(WeightUnit::Gram),
            "ounce" | "ounces" | "oz" => Ok(WeightUnit::Ounce),
            _ => Err(LedgerError::validation(
                "weight unit",
                format!("unknown value '{}' (use qian|g|oz)", s),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub r#type: TransactionType,
    pub metal_type: MetalType,
    pub date: NaiveDate,
    pub weight: Decimal,
    pub weight_unit: WeightUnit,
    pub price_per_unit: Decimal,
    pub currency: Currency,
    #[serde(default)]
    pub labor_cost: Decimal,
    pub total_amount: Decimal,
    #[serde(default = "default_exchange_rate")]
    pub exchange_rate: Decimal,
    #[serde(default)]
    pub channel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub fn line_total(price: Decimal, weight: Decimal, labor: Decimal) -> Option<Decimal> {
    price.checked_mul(weight)?.checked_add(labor)
}

fn default_exchange_rate() -> Decimal {
    Decimal::ONE
}

impl Transaction {
    /// `price_per_unit * weight + labor_cost`, independent of the stored total.
    /// `None` when the result does not fit in a `Decimal`.
    pub fn expected_total(&self) -> Option<Decimal> {
        line_total(self.price_per_unit, self.weight, self.labor_cost)
    }

    pub fn is_buy(&self) -> bool {
        self.r#type == TransactionType::Buy
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub default_currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third_party_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Price of one `weight_unit` of a metal on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub metal_type: MetalType,
    pub date: NaiveDate,
    pub price: Decimal,
    pub currency: Currency,
    pub weight_unit: WeightUnit,
}
