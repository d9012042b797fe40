// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use warungboard::models::{
    FishStock, FishType, StockDirection, StockMovement, Transaction, TransactionType,
};
use warungboard::validate::{
    MAX_QUANTITY, validate_fish_stock, validate_stock_movements, validate_transactions,
};

fn tx(name: &str, quantity: i64, price: f64, total: f64) -> Transaction {
    Transaction {
        id: "t".into(),
        date: NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
        product_id: "P1".into(),
        product_name: name.into(),
        category: "Umum".into(),
        quantity,
        price,
        total,
        r#type: TransactionType::Sale,
    }
}

fn fish(quantity: f64, price: Option<f64>) -> FishStock {
    FishStock {
        id: "f".into(),
        date: NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
        fish_type: FishType::Lele,
        r#type: StockDirection::In,
        quantity,
        weight: None,
        total_fish: None,
        price,
        total: None,
        reason: String::new(),
        supplier: None,
        reference: None,
    }
}

#[test]
fn well_formed_transaction_is_valid() {
    let res = validate_transactions(&[tx("Kopi", 5, 4000.0, 20000.0)]);
    assert_eq!(res.valid.len(), 1);
    assert!(res.invalid.is_empty());
}

#[test]
fn zero_quantity_is_rejected_with_reason() {
    let res = validate_transactions(&[tx("Kopi", 0, 4000.0, 20000.0)]);
    assert!(res.valid.is_empty());
    assert_eq!(res.invalid.len(), 1);
    assert_eq!(res.invalid[0].row, 1);
    assert!(res.invalid[0].reason.contains("Jumlah"));
}

#[test]
fn every_failed_rule_is_listed_in_order() {
    let res = validate_transactions(&[tx("  ", 0, 0.0, -1.0)]);
    assert_eq!(
        res.invalid[0].reason,
        "Produk kosong, Jumlah harus > 0, Harga harus > 0, Total harus > 0"
    );
}

#[test]
fn rows_are_one_based_positions_in_the_input() {
    let records = vec![
        tx("Kopi", 1, 4000.0, 4000.0),
        tx("Teh", 1, 0.0, 3000.0),
        tx("Gula", 2, 15000.0, 30000.0),
        tx("Roti", -3, 5000.0, 5000.0),
    ];
    let res = validate_transactions(&records);
    assert_eq!(res.valid.len(), 2);
    assert_eq!(res.valid[0].product_name, "Kopi");
    assert_eq!(res.valid[1].product_name, "Gula");
    let rows: Vec<usize> = res.invalid.iter().map(|r| r.row).collect();
    assert_eq!(rows, vec![2, 4]);
    assert_eq!(res.invalid[0].reason, "Harga harus > 0");
    assert_eq!(res.invalid[1].reason, "Jumlah harus > 0");
    // each input lands in exactly one bucket
    assert_eq!(res.valid.len() + res.invalid.len(), records.len());
}

#[test]
fn nan_amounts_are_rejected() {
    let res = validate_transactions(&[tx("Kopi", 1, f64::NAN, f64::NAN)]);
    assert_eq!(res.invalid[0].reason, "Harga harus > 0, Total harus > 0");
}

#[test]
fn fish_stock_rules() {
    let records = vec![
        fish(50.0, Some(25000.0)),
        fish(10.0, None),
        fish(0.0, None),
        fish(5.0, Some(-100.0)),
    ];
    let res = validate_fish_stock(&records);
    assert_eq!(res.valid.len(), 2);
    assert_eq!(res.invalid.len(), 2);
    assert_eq!(res.invalid[0].row, 3);
    assert_eq!(res.invalid[0].reason, "Berat (kg) harus > 0");
    assert_eq!(res.invalid[1].row, 4);
    assert_eq!(res.invalid[1].reason, "Harga per kg harus > 0");
}

#[test]
fn stock_movement_rules() {
    let mv = |name: &str, quantity: i64| StockMovement {
        id: "s".into(),
        date: NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
        product_id: "P1".into(),
        product_name: name.into(),
        r#type: StockDirection::Out,
        quantity,
        reason: "Manual Input".into(),
        reference: None,
    };
    let res = validate_stock_movements(&[mv("Beras", 10), mv("", 0), mv("Beras", i64::MAX)]);
    assert_eq!(res.valid.len(), 1);
    assert_eq!(res.invalid[0].row, 2);
    assert_eq!(res.invalid[0].reason, "Produk kosong, Jumlah harus > 0");
    assert_eq!(res.invalid[1].row, 3);
    assert_eq!(res.invalid[1].reason, "Jumlah terlalu besar");
}

#[test]
fn oversized_quantities_are_rejected() {
    let res = validate_transactions(&[
        tx("Kopi", MAX_QUANTITY, 1.0, 1.0),
        tx("Kopi", MAX_QUANTITY + 1, 1.0, 1.0),
        tx("Kopi", i64::MAX, 1.0, 1.0),
    ]);
    assert_eq!(res.valid.len(), 1);
    assert_eq!(res.invalid.len(), 2);
    assert_eq!(res.invalid[0].row, 2);
    assert_eq!(res.invalid[0].reason, "Jumlah terlalu besar");
    assert_eq!(res.invalid[1].row, 3);
}
