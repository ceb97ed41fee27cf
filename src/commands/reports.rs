// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{self, MetalWeight, Summary};
use crate::models::WeightUnit;
use crate::session::{AppState, Tab};
use crate::utils::{fmt_date, maybe_print_json, pretty_table};
use crate::valuation::{UnitTable, grouped_weight_in};
use anyhow::Result;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::warn;

pub fn summary(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    state.require_user()?;
    state.navigate(Tab::Home);
    let data = compute_summary(state)?;
    if let Some(ccys) = aggregate::mixed_currencies(state.transactions()) {
        warn!(?ccys, "summing amounts across currencies without conversion");
    }
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!(
            "{}",
            pretty_table(
                &["Total cost", "Estimated return", "Profit", "Transactions"],
                vec![vec![
                    data.total_cost.normalize().to_string(),
                    data.estimated_return.normalize().to_string(),
                    data.profit.normalize().to_string(),
                    data.transaction_count.to_string(),
                ]],
            )
        );
    }
    Ok(())
}

pub fn compute_summary(state: &AppState) -> Result<Summary> {
    Ok(aggregate::summarize(state.transactions(), &state.valuation())?)
}

pub fn weights(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    state.require_user()?;
    state.navigate(Tab::Charts);
    let unit = sub
        .get_one::<String>("unit")
        .map(|u| u.parse::<WeightUnit>())
        .transpose()?;
    let data = compute_weights(state, unit)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let max = data.iter().map(|g| g.weight).max().unwrap_or_default();
        let rows = data
            .iter()
            .map(|g| {
                vec![
                    g.metal_type.label().to_string(),
                    g.weight.round_dp(4).normalize().to_string(),
                    bar(g.weight, max),
                ]
            })
            .collect();
        let hdr = format!("Weight ({})", unit.unwrap_or(WeightUnit::Qian));
        println!("{}", pretty_table(&["Metal", &hdr, ""], rows));
    }
    Ok(())
}

/// Without a unit, weights are summed as recorded.
pub fn compute_weights(state: &AppState, unit: Option<WeightUnit>) -> Result<Vec<MetalWeight>> {
    let txs = state.transactions();
    let groups = match unit {
        Some(u) => grouped_weight_in(txs, u, &UnitTable::default())?,
        None => {
            if let Some(units) = aggregate::mixed_units(txs) {
                warn!(?units, "summing weights across units without conversion");
            }
            aggregate::group_weight_by_metal(txs)?
        }
    };
    Ok(groups)
}

pub fn bar(value: Decimal, max: Decimal) -> String {
    const WIDTH: usize = 20;
    if max.is_zero() {
        return String::new();
    }
    let n = value
        .checked_div(max)
        .and_then(|ratio| ratio.checked_mul(Decimal::from(WIDTH)))
        .and_then(|scaled| scaled.round().to_usize())
        .unwrap_or(0);
    "█".repeat(n.min(WIDTH))
}

pub fn recent(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    state.require_user()?;
    state.navigate(Tab::Home);
    let n = sub
        .get_one::<usize>("limit")
        .copied()
        .unwrap_or(state.config.recent_limit);
    let rows = aggregate::recent(state.transactions(), n)
        .iter()
        .map(|t| {
            vec![
                fmt_date(&t.date),
                format!("{} - {}{}", t.metal_type.label(), t.weight.normalize(), t.weight_unit),
                format!("{} {}", t.currency, t.total_amount.normalize()),
                t.r#type.label().to_string(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Date", "Item", "Amount", "Type"], rows));
    Ok(())
}
