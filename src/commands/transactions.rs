// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{MetalFilter, filter_by_metal};
use crate::draft::{FieldChange, TransactionDraft};
use crate::models::Transaction;
use crate::session::{AppState, Tab};
use crate::utils::{fmt_date, fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle(state: &mut AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(state, sub)?,
        Some(("list", sub)) => list(state, sub)?,
        Some(("show", sub)) => show(state, sub)?,
        Some(("rm", sub)) => remove(state, sub)?,
        Some(("edit", sub)) => edit(state, sub)?,
        _ => {}
    }
    Ok(())
}

/// Field edits named on the command line, in flag order of the form.
pub fn changes_from_matches(sub: &clap::ArgMatches) -> Result<Vec<FieldChange>> {
    let get = |name: &str| sub.get_one::<String>(name).map(|s| s.as_str());
    let mut changes = Vec::new();
    if let Some(v) = get("type") {
        changes.push(FieldChange::Type(v.parse()?));
    }
    if let Some(v) = get("metal") {
        changes.push(FieldChange::Metal(v.parse()?));
    }
    if let Some(v) = get("date") {
        changes.push(FieldChange::Date(parse_date(v)?));
    }
    if let Some(v) = get("weight") {
        changes.push(FieldChange::Weight(parse_decimal(v)?));
    }
    if let Some(v) = get("unit") {
        changes.push(FieldChange::WeightUnit(v.parse()?));
    }
    if let Some(v) = get("price") {
        changes.push(FieldChange::PricePerUnit(parse_decimal(v)?));
    }
    if let Some(v) = get("labor") {
        changes.push(FieldChange::LaborCost(parse_decimal(v)?));
    }
    if let Some(v) = get("currency") {
        changes.push(FieldChange::Currency(v.parse()?));
    }
    if let Some(v) = get("rate") {
        changes.push(FieldChange::ExchangeRate(parse_decimal(v)?));
    }
    if let Some(v) = get("channel") {
        changes.push(FieldChange::Channel(v.trim().to_string()));
    }
    if let Some(v) = get("note") {
        changes.push(FieldChange::Notes(v.to_string()));
    }
    if let Some(v) = get("image") {
        changes.push(FieldChange::ImageUrl(v.trim().to_string()));
    }
    Ok(changes)
}

fn add(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    state.require_user()?;
    let mut draft = TransactionDraft::new();
    draft.apply_all(changes_from_matches(sub)?);
    let tx = state.add_transaction(draft)?;
    println!(
        "Recorded {} {} {}{} for {} (id {})",
        tx.r#type,
        tx.metal_type,
        tx.weight.normalize(),
        tx.weight_unit,
        fmt_money(&tx.total_amount, tx.currency),
        tx.id
    );
    Ok(())
}

fn edit(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    state.require_user()?;
    let id = sub.get_one::<String>("id").map(|s| s.trim()).unwrap_or_default();
    let changes = changes_from_matches(sub)?;
    if changes.is_empty() {
        println!("Nothing to change for {}", id);
        return Ok(());
    }
    let tx = state.store_mut().update(id, changes)?;
    println!(
        "Updated {}: total {}",
        tx.id,
        fmt_money(&tx.total_amount, tx.currency)
    );
    Ok(())
}

fn remove(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    state.require_user()?;
    let id = sub.get_one::<String>("id").map(|s| s.trim()).unwrap_or_default();
    let removed = state.store_mut().delete(id)?;
    println!("Removed {} ({} {})", removed.id, removed.metal_type, fmt_date(&removed.date));
    Ok(())
}

fn show(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    state.require_user()?;
    let id = sub.get_one::<String>("id").map(|s| s.trim()).unwrap_or_default();
    let tx = state
        .store()
        .get(id)
        .ok_or_else(|| crate::error::LedgerError::NotFound(id.to_string()))?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), tx)? {
        let rows = vec![
            vec!["Id".into(), tx.id.clone()],
            vec!["Type".into(), format!("{} ({})", tx.r#type, tx.r#type.label())],
            vec!["Metal".into(), format!("{} ({})", tx.metal_type, tx.metal_type.label())],
            vec!["Date".into(), fmt_date(&tx.date)],
            vec!["Weight".into(), format!("{}{}", tx.weight.normalize(), tx.weight_unit)],
            vec!["Price".into(), fmt_money(&tx.price_per_unit, tx.currency)],
            vec!["Labor".into(), fmt_money(&tx.labor_cost, tx.currency)],
            vec!["Total".into(), fmt_money(&tx.total_amount, tx.currency)],
            vec!["Rate".into(), tx.exchange_rate.normalize().to_string()],
            vec!["Channel".into(), tx.channel.clone()],
            vec!["Note".into(), tx.notes.clone().unwrap_or_default()],
            vec!["Image".into(), tx.image_url.clone().unwrap_or_default()],
            vec!["Created".into(), tx.created_at.to_rfc3339()],
        ];
        println!("{}", pretty_table(&["Field", "Value"], rows));
    }
    Ok(())
}

fn list(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    state.require_user()?;
    state.navigate(Tab::Records);
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(state, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data.iter().map(TransactionRow::cells).collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Type", "Metal", "Weight", "Price", "Total", "Channel"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(transparent)]
pub struct TransactionRow(pub Transaction);

impl TransactionRow {
    fn cells(&self) -> Vec<String> {
        let t = &self.0;
        let sign = if t.is_buy() { "-" } else { "+" };
        let mut total = format!("{}{}", sign, fmt_money(&t.total_amount, t.currency));
        if !t.labor_cost.is_zero() {
            total.push_str(&format!(" (labor {})", t.labor_cost.normalize()));
        }
        vec![
            t.id.clone(),
            t.date.to_string(),
            t.r#type.label().to_string(),
            t.metal_type.label().to_string(),
            format!("{}{}", t.weight.normalize(), t.weight_unit),
            t.price_per_unit.normalize().to_string(),
            total,
            t.channel.clone(),
        ]
    }
}

pub fn query_rows(state: &AppState, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let filter = match sub.get_one::<String>("metal") {
        Some(m) => m.parse::<MetalFilter>()?,
        None => MetalFilter::All,
    };
    let mut rows = filter_by_metal(state.transactions(), filter);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows.into_iter().map(TransactionRow).collect())
}
