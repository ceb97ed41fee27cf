// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::draft::{FieldChange, TransactionDraft};
use crate::error::{LedgerError, Result};
use crate::models::{Currency, MetalType, Transaction, TransactionType, WeightUnit};

pub const DEFAULT_CHANNEL: &str = "自訂";

/// Session ledger, most recent record first.
#[derive(Debug, Clone)]
pub struct TransactionStore {
    records: Vec<Transaction>,
    default_currency: Currency,
    channel_placeholder: String,
    last_id: i64,
}

impl Default for TransactionStore {
    fn default() -> Self {
        Self::new(Currency::Twd, DEFAULT_CHANNEL)
    }
}

impl TransactionStore {
    pub fn new(default_currency: Currency, channel_placeholder: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            default_currency,
            channel_placeholder: channel_placeholder.into(),
            last_id: 0,
        }
    }

    /// Replaces the contents with `records`, kept in the given order.
    pub fn with_records(mut self, records: Vec<Transaction>) -> Self {
        self.records = records;
        self
    }

    pub fn list(&self) -> &[Transaction] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.records.iter().find(|t| t.id == id)
    }

    /// Ids are the submission time in epoch milliseconds, bumped past any id
    /// already issued or present.
    fn next_id(&mut self, now: DateTime<Utc>) -> String {
        let mut candidate = now.timestamp_millis().max(self.last_id + 1);
        while self.get(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        self.last_id = candidate;
        candidate.to_string()
    }

    pub fn add(&mut self, user_id: &str, draft: TransactionDraft) -> Result<&Transaction> {
        draft.validate()?;
        let now = Utc::now();
        let id = self.next_id(now);
        let total_amount = draft.total_amount();
        let tx = Transaction {
            id,
            user_id: user_id.to_string(),
            r#type: draft.r#type.unwrap_or(TransactionType::Buy),
            metal_type: draft.metal_type.unwrap_or(MetalType::Gold),
            date: draft.date.unwrap_or_else(|| now.date_naive()),
            weight: draft.weight.unwrap_or(Decimal::ZERO),
            weight_unit: draft.weight_unit.unwrap_or(WeightUnit::Qian),
            price_per_unit: draft.price_per_unit.unwrap_or(Decimal::ZERO),
            currency: draft.currency.unwrap_or(self.default_currency),
            labor_cost: draft.labor_cost.unwrap_or(Decimal::ZERO),
            total_amount,
            exchange_rate: draft.exchange_rate.unwrap_or(Decimal::ONE),
            channel: draft
                .channel
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| self.channel_placeholder.clone()),
            notes: draft.notes.filter(|n| !n.is_empty()),
            image_url: draft.image_url.filter(|u| !u.is_empty()),
            created_at: now,
        };
        info!(id = %tx.id, metal = %tx.metal_type, total = %tx.total_amount, "transaction added");
        self.records.insert(0, tx);
        Ok(&self.records[0])
    }

    /// Removes the record if present; an unknown id is a no-op.
    pub fn remove(&mut self, id: &str) -> Option<Transaction> {
        let idx = self.records.iter().position(|t| t.id == id)?;
        let removed = self.records.remove(idx);
        debug!(id, "transaction removed");
        Some(removed)
    }

    pub fn delete(&mut self, id: &str) -> Result<Transaction> {
        self.remove(id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }

    /// Edits a stored record in place. Id, owner, creation time and position
    /// are kept; the total is recomputed only if a magnitude changed.
    pub fn update(
        &mut self,
        id: &str,
        changes: impl IntoIterator<Item = FieldChange>,
    ) -> Result<&Transaction> {
        let idx = self
            .records
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;

        let mut draft = TransactionDraft::from(&self.records[idx]);
        draft.apply_all(changes);
        draft.validate()?;

        let tx = &mut self.records[idx];
        tx.total_amount = draft.total_amount();
        if let Some(t) = draft.r#type {
            tx.r#type = t;
        }
        if let Some(m) = draft.metal_type {
            tx.metal_type = m;
        }
        if let Some(d) = draft.date {
            tx.date = d;
        }
        if let Some(w) = draft.weight {
            tx.weight = w;
        }
        if let Some(u) = draft.weight_unit {
            tx.weight_unit = u;
        }
        if let Some(p) = draft.price_per_unit {
            tx.price_per_unit = p;
        }
        if let Some(c) = draft.currency {
            tx.currency = c;
        }
        if let Some(l) = draft.labor_cost {
            tx.labor_cost = l;
        }
        if let Some(r) = draft.exchange_rate {
            tx.exchange_rate = r;
        }
        if let Some(c) = draft.channel {
            tx.channel = c;
        }
        tx.notes = draft.notes.filter(|n| !n.is_empty());
        tx.image_url = draft.image_url.filter(|u| !u.is_empty());
        debug!(id, total = %tx.total_amount, "transaction updated");
        Ok(&self.records[idx])
    }
}

/// Three sample purchases, one per metal, most recent first.
pub fn demo_transactions(user_id: &str) -> Vec<Transaction> {
    let rows = [
        ("1", "2025-06-01", MetalType::Gold, "XX銀樓"),
        ("2", "2025-05-03", MetalType::KGold, "XX銀行"),
        ("3", "2024-11-08", MetalType::Platinum, "XX銀樓"),
    ];
    rows.into_iter()
        .filter_map(|(id, date, metal, channel)| {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
            let created_at = date.and_hms_opt(10, 0, 0)?.and_utc();
            Some(Transaction {
                id: id.to_string(),
                user_id: user_id.to_string(),
                r#type: TransactionType::Buy,
                metal_type: metal,
                date,
                weight: Decimal::new(2, 0),
                weight_unit: WeightUnit::Qian,
                price_per_unit: Decimal::new(12000, 0),
                currency: Currency::Twd,
                labor_cost: Decimal::ZERO,
                total_amount: Decimal::new(24000, 0),
                exchange_rate: Decimal::ONE,
                channel: channel.to_string(),
                notes: None,
                image_url: None,
                created_at,
            })
        })
        .collect()
}
