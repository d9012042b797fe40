// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use std::borrow::Cow;
use warungboard::filter::{filter_by_date, filter_by_direction};
use warungboard::models::{DateRange, StockDirection, StockMovement, Transaction, TransactionType};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx_at(day: &str, h: u32, m: u32) -> Transaction {
    Transaction {
        id: format!("{}-{}{}", day, h, m),
        date: d(day).and_hms_opt(h, m, 0).unwrap(),
        product_id: "P1".into(),
        product_name: "Kopi".into(),
        category: "Umum".into(),
        quantity: 1,
        price: 1000.0,
        total: 1000.0,
        r#type: TransactionType::Sale,
    }
}

fn january() -> Vec<Transaction> {
    vec![
        tx_at("2024-12-31", 23, 59),
        tx_at("2025-01-01", 0, 0),
        tx_at("2025-01-15", 12, 0),
        tx_at("2025-01-31", 23, 30),
        tx_at("2025-02-01", 0, 1),
    ]
}

fn ids(records: &[Transaction]) -> Vec<String> {
    records.iter().map(|t| t.id.clone()).collect()
}

#[test]
fn unbounded_range_returns_input_untouched() {
    let records = january();
    let out = filter_by_date(&records, &DateRange::all());
    assert!(matches!(out, Cow::Borrowed(_)));
    assert_eq!(out.len(), records.len());
}

#[test]
fn both_bounds_are_inclusive_by_calendar_day() {
    let records = january();
    let range = DateRange::new(Some(d("2025-01-01")), Some(d("2025-01-31")));
    let out = filter_by_date(&records, &range);
    assert_eq!(
        ids(&out),
        vec!["2025-01-01-00", "2025-01-15-120", "2025-01-31-2330"]
    );
}

#[test]
fn open_ended_ranges() {
    let records = january();
    let from = filter_by_date(&records, &DateRange::new(Some(d("2025-01-15")), None));
    assert_eq!(from.len(), 3);
    let until = filter_by_date(&records, &DateRange::new(None, Some(d("2025-01-01"))));
    assert_eq!(until.len(), 2);
}

#[test]
fn inverted_range_is_empty() {
    let records = january();
    let range = DateRange::new(Some(d("2025-02-01")), Some(d("2025-01-01")));
    assert!(filter_by_date(&records, &range).is_empty());
}

#[test]
fn output_is_an_ordered_subset() {
    let records = january();
    let range = DateRange::new(Some(d("2024-12-31")), Some(d("2025-01-15")));
    let out = filter_by_date(&records, &range);
    assert_eq!(ids(&out), ids(&records[..3]));
    assert!(out.iter().all(|t| range.contains(t)));
}

#[test]
fn presets_cover_the_trailing_window() {
    let today = d("2025-01-31");
    let week = DateRange::last_days(7, today);
    assert_eq!(week.start_date, Some(d("2025-01-24")));
    assert_eq!(week.end_date, Some(today));
    let only_today = DateRange::today(today);
    let txs = january();
    let out = filter_by_date(&txs, &only_today);
    assert_eq!(ids(&out), vec!["2025-01-31-2330"]);
}

#[test]
fn direction_filter_keeps_matching_movements() {
    let mv = |id: &str, dir: StockDirection| StockMovement {
        id: id.into(),
        date: d("2025-01-10").and_hms_opt(0, 0, 0).unwrap(),
        product_id: "P1".into(),
        product_name: "Beras".into(),
        r#type: dir,
        quantity: 3,
        reason: String::new(),
        reference: None,
    };
    let records = vec![
        mv("a", StockDirection::In),
        mv("b", StockDirection::Out),
        mv("c", StockDirection::In),
    ];
    assert!(matches!(filter_by_direction(&records, None), Cow::Borrowed(_)));
    let ins: Vec<String> = filter_by_direction(&records, Some(StockDirection::In))
        .iter()
        .map(|m| m.id.clone())
        .collect();
    assert_eq!(ins, vec!["a", "c"]);
}
