// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use goldbook::aggregate::{
    self, MetalFilter, MetalWeight, estimated_return, filter_by_metal, group_weight_by_metal,
    profit, recent, total_cost,
};
use goldbook::draft::TransactionDraft;
use goldbook::error::LedgerError;
use goldbook::models::{Currency, MetalType, PriceQuote, TransactionType, WeightUnit};
use goldbook::store::{TransactionStore, demo_transactions};
use goldbook::valuation::{PriceBook, UnitTable, Valuation, grouped_weight_in};
use rust_decimal::Decimal;

fn dec(n: i64) -> Decimal {
    Decimal::new(n, 0)
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn demo_ledger_summary_matches_home_screen() {
    let txs = demo_transactions("u1");
    let cost = total_cost(&txs).unwrap();
    let ret = estimated_return(cost).unwrap();
    assert_eq!(cost, dec(72000));
    assert_eq!(ret, dec(82800));
    assert_eq!(profit(ret, cost).unwrap(), dec(10800));

    let summary = aggregate::summarize(&txs, &Valuation::default()).unwrap();
    assert_eq!(summary.transaction_count, 3);
    assert_eq!(summary.profit, dec(10800));
}

#[test]
fn sell_does_not_change_total_cost() {
    let mut store = TransactionStore::default().with_records(demo_transactions("u1"));
    let before = total_cost(store.list()).unwrap();
    store
        .add(
            "u1",
            TransactionDraft::new()
                .transaction_type(TransactionType::Sell)
                .weight(dec(1))
                .price_per_unit(dec(13000)),
        )
        .unwrap();
    assert_eq!(total_cost(store.list()).unwrap(), before);
    assert_eq!(aggregate::sell_proceeds(store.list()).unwrap(), dec(13000));
}

#[test]
fn near_max_totals_overflow_as_an_error() {
    let huge = Decimal::from_str_exact("50000000000000000000000000000").unwrap();
    let mut store = TransactionStore::default();
    for _ in 0..2 {
        store
            .add("u1", TransactionDraft::new().weight(dec(1)).price_per_unit(huge))
            .unwrap();
    }

    assert_eq!(
        total_cost(store.list()),
        Err(LedgerError::Overflow("total cost"))
    );
    assert_eq!(
        aggregate::summarize(store.list(), &Valuation::default()).unwrap_err(),
        LedgerError::Overflow("total cost")
    );
}

#[test]
fn estimated_return_overflow_is_an_error() {
    let huge = Decimal::from_str_exact("70000000000000000000000000000").unwrap();
    assert_eq!(
        estimated_return(huge),
        Err(LedgerError::Overflow("estimated return"))
    );
}

#[test]
fn estimated_return_rounds_half_up() {
    // 10 * 1.15 = 11.5
    assert_eq!(estimated_return(dec(10)), Ok(dec(12)));
    // 3 * 1.15 = 3.45
    assert_eq!(estimated_return(dec(3)), Ok(dec(3)));
    assert_eq!(estimated_return(Decimal::ZERO), Ok(Decimal::ZERO));
}

#[test]
fn recent_takes_the_newest_records() {
    let txs = demo_transactions("u1");
    assert!(recent(&txs, 0).is_empty());
    assert_eq!(recent(&txs, 2).len(), 2);
    assert_eq!(recent(&txs, 2)[0].id, "1");
    assert_eq!(recent(&txs, 10), &txs[..]);
    assert!(recent(&[], 3).is_empty());
}

#[test]
fn filter_all_is_identity() {
    let txs = demo_transactions("u1");
    assert_eq!(filter_by_metal(&txs, MetalFilter::All), txs);
}

#[test]
fn filter_by_metal_preserves_order() {
    let mut store = TransactionStore::default().with_records(demo_transactions("u1"));
    store
        .add("u1", TransactionDraft::new().metal_type(MetalType::Gold))
        .unwrap();
    let gold = filter_by_metal(store.list(), MetalFilter::Only(MetalType::Gold));
    assert_eq!(gold.len(), 2);
    assert_eq!(gold[1].id, "1");
    assert!(gold.iter().all(|t| t.metal_type == MetalType::Gold));
}

#[test]
fn group_weight_has_one_entry_per_bought_metal() {
    let txs = demo_transactions("u1");
    let groups = group_weight_by_metal(&txs).unwrap();
    assert_eq!(
        groups,
        vec![
            MetalWeight {
                metal_type: MetalType::Gold,
                weight: dec(2),
            },
            MetalWeight {
                metal_type: MetalType::KGold,
                weight: dec(2),
            },
            MetalWeight {
                metal_type: MetalType::Platinum,
                weight: dec(2),
            },
        ]
    );

    let without_platinum: Vec<_> = txs
        .into_iter()
        .filter(|t| t.metal_type != MetalType::Platinum)
        .collect();
    let groups = group_weight_by_metal(&without_platinum).unwrap();
    assert_eq!(groups.len(), 2);
    assert!(groups.iter().all(|g| g.metal_type != MetalType::Platinum));
}

#[test]
fn group_weight_ignores_sells() {
    let mut store = TransactionStore::default();
    store
        .add(
            "u1",
            TransactionDraft::new()
                .transaction_type(TransactionType::Sell)
                .metal_type(MetalType::Platinum)
                .weight(dec(5)),
        )
        .unwrap();
    assert!(group_weight_by_metal(store.list()).unwrap().is_empty());
}

#[test]
fn mixed_units_are_reported_and_converted_on_request() {
    let mut store = TransactionStore::default();
    store
        .add(
            "u1",
            TransactionDraft::new()
                .weight(dec(2))
                .weight_unit(WeightUnit::Qian),
        )
        .unwrap();
    store
        .add(
            "u1",
            TransactionDraft::new()
                .weight(Decimal::new(75, 1))
                .weight_unit(WeightUnit::Gram)
                .currency(Currency::Usd),
        )
        .unwrap();

    assert_eq!(
        aggregate::mixed_units(store.list()),
        Some(vec![WeightUnit::Qian, WeightUnit::Gram])
    );
    assert_eq!(
        aggregate::mixed_currencies(store.list()),
        Some(vec![Currency::Twd, Currency::Usd])
    );
    assert_eq!(
        group_weight_by_metal(store.list()).unwrap()[0].weight,
        Decimal::new(95, 1)
    );
    let in_qian =
        grouped_weight_in(store.list(), WeightUnit::Qian, &UnitTable::default()).unwrap();
    assert_eq!(in_qian[0].weight, dec(4));
}

fn quote(metal: MetalType, price: i64) -> PriceQuote {
    PriceQuote {
        metal_type: metal,
        date: date("2025-06-01"),
        price: dec(price),
        currency: Currency::Twd,
        weight_unit: WeightUnit::Qian,
    }
}

#[test]
fn market_valuation_prices_held_weight() {
    let txs = demo_transactions("u1");
    let units = UnitTable::default();
    let mut book = PriceBook::new(units);
    book.insert(quote(MetalType::Gold, 13000));
    book.insert(quote(MetalType::KGold, 10000));
    book.insert(quote(MetalType::Platinum, 8000));

    let valuation = Valuation::Market {
        source: &book,
        units: &units,
        as_of: date("2025-07-01"),
    };
    let summary = aggregate::summarize(&txs, &valuation).unwrap();
    assert_eq!(summary.estimated_return, dec(62000));
    assert_eq!(summary.profit, dec(-10000));
}

#[test]
fn market_valuation_requires_a_price_for_held_metal() {
    let txs = demo_transactions("u1");
    let units = UnitTable::default();
    let mut book = PriceBook::new(units);
    book.insert(quote(MetalType::Gold, 13000));

    let valuation = Valuation::Market {
        source: &book,
        units: &units,
        as_of: date("2025-07-01"),
    };
    assert_eq!(
        aggregate::summarize(&txs, &valuation).unwrap_err(),
        LedgerError::MissingPrice {
            metal: MetalType::KGold,
            unit: WeightUnit::Gram,
        }
    );
}
