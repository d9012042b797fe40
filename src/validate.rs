// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Business rules applied to normalized records before they are saved.

use crate::models::{FishStock, InvalidRow, StockMovement, Transaction, ValidationResult};

pub const EMPTY_PRODUCT: &str = "Produk kosong";
pub const BAD_QUANTITY: &str = "Jumlah harus > 0";
pub const QUANTITY_TOO_LARGE: &str = "Jumlah terlalu besar";
pub const BAD_PRICE: &str = "Harga harus > 0";
pub const BAD_TOTAL: &str = "Total harus > 0";
pub const BAD_WEIGHT_KG: &str = "Berat (kg) harus > 0";
pub const BAD_PRICE_PER_KG: &str = "Harga per kg harus > 0";

/// Largest unit count a single transaction or stock movement may carry.
pub const MAX_QUANTITY: i64 = i32::MAX as i64;

// NaN fails every `> 0.0` check, so unreadable amounts are rejected too.
pub fn transaction_errors(t: &Transaction) -> Vec<&'static str> {
    let mut errors = Vec::new();
    if t.product_name.trim().is_empty() {
        errors.push(EMPTY_PRODUCT);
    }
    if t.quantity <= 0 {
        errors.push(BAD_QUANTITY);
    } else if t.quantity > MAX_QUANTITY {
        errors.push(QUANTITY_TOO_LARGE);
    }
    if !(t.price > 0.0) {
        errors.push(BAD_PRICE);
    }
    if !(t.total > 0.0) {
        errors.push(BAD_TOTAL);
    }
    errors
}

pub fn fish_stock_errors(s: &FishStock) -> Vec<&'static str> {
    let mut errors = Vec::new();
    if !(s.quantity > 0.0) {
        errors.push(BAD_WEIGHT_KG);
    }
    if let Some(price) = s.price {
        if !(price > 0.0) {
            errors.push(BAD_PRICE_PER_KG);
        }
    }
    errors
}

pub fn stock_movement_errors(m: &StockMovement) -> Vec<&'static str> {
    let mut errors = Vec::new();
    if m.product_name.trim().is_empty() {
        errors.push(EMPTY_PRODUCT);
    }
    if m.quantity <= 0 {
        errors.push(BAD_QUANTITY);
    } else if m.quantity > MAX_QUANTITY {
        errors.push(QUANTITY_TOO_LARGE);
    }
    errors
}

fn partition<T: Clone>(
    records: &[T],
    errors_of: impl Fn(&T) -> Vec<&'static str>,
) -> ValidationResult<T> {
    let mut out = ValidationResult::default();
    for (i, record) in records.iter().enumerate() {
        let errors = errors_of(record);
        if errors.is_empty() {
            out.valid.push(record.clone());
        } else {
            out.invalid.push(InvalidRow {
                row: i + 1,
                reason: errors.join(", "),
            });
        }
    }
    out
}

/// Splits records into valid ones and 1-based rejects with their reasons.
pub fn validate_transactions(records: &[Transaction]) -> ValidationResult<Transaction> {
    partition(records, transaction_errors)
}

pub fn validate_fish_stock(records: &[FishStock]) -> ValidationResult<FishStock> {
    partition(records, fish_stock_errors)
}

pub fn validate_stock_movements(records: &[StockMovement]) -> ValidationResult<StockMovement> {
    partition(records, stock_movement_errors)
}
