// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Turns loosely-typed spreadsheet rows into domain records.
//!
//! Every logical field is looked up through an ordered alias list; the first
//! alias holding a present value wins. Rows that cannot yield a record are
//! dropped with a warning, never an error.

use chrono::{DateTime, Local, NaiveDateTime};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

use crate::models::{FishStock, FishType, StockDirection, Transaction, TransactionType};
use crate::utils::{leading_float, leading_int, parse_datetime_loose};

/// One imported row: column name to untyped scalar.
pub type RawRow = Map<String, Value>;

pub const DATE_KEYS: &[&str] = &["tanggal", "date", "Tanggal", "Date"];
pub const PRODUCT_ID_KEYS: &[&str] = &["id_produk", "product_id", "productId", "ProductId"];
pub const PRODUCT_NAME_KEYS: &[&str] = &[
    "produk",
    "product",
    "Produk",
    "Product",
    "nama_produk",
    "productName",
];
pub const CATEGORY_KEYS: &[&str] = &["kategori", "category", "Kategori", "Category"];
pub const QUANTITY_KEYS: &[&str] = &["jumlah", "quantity", "Jumlah", "Quantity"];
pub const PRICE_KEYS: &[&str] = &["harga", "price", "Harga", "Price"];
pub const TOTAL_KEYS: &[&str] = &["total", "Total"];
pub const TYPE_KEYS: &[&str] = &["tipe", "type", "Tipe", "Type"];

pub const FISH_KG_KEYS: &[&str] = &["berat_kg", "quantity", "Berat", "Quantity"];
pub const FISH_WEIGHT_KEYS: &[&str] = &["berat_per_ekor", "weight", "Weight"];
pub const FISH_COUNT_KEYS: &[&str] = &["jumlah_ikan", "total_fish", "Jumlah", "TotalFish"];
pub const FISH_PRICE_KEYS: &[&str] = &["harga_per_kg", "price", "Harga", "Price"];
pub const REASON_KEYS: &[&str] = &["keterangan", "reason", "Keterangan", "Reason"];
pub const SUPPLIER_KEYS: &[&str] = &["supplier", "Supplier", "pemasok", "Pemasok"];
pub const REFERENCE_KEYS: &[&str] = &["referensi", "reference", "Referensi", "Reference"];

pub const DEFAULT_CATEGORY: &str = "Umum";

/// Days between the spreadsheet epoch (1899-12-30) and 1970-01-01.
const SERIAL_UNIX_OFFSET: f64 = 25569.0;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// `<prefix>-<unix millis>-<seq>`; the sequence is process-wide and never repeats.
pub fn next_id(prefix: &str) -> String {
    let seq = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!(
        "{}-{}-{}",
        prefix,
        chrono::Utc::now().timestamp_millis(),
        seq
    )
}

fn is_present(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// First alias in `keys` that carries a present value.
pub fn pick<'a>(row: &'a RawRow, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| row.get(*k))
        .find(|v| is_present(v))
}

fn value_to_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) => f.to_string(),
            None => n.to_string(),
        },
        other => other.to_string(),
    }
}

fn pick_string(row: &RawRow, keys: &[&str]) -> Option<String> {
    pick(row, keys).map(|v| value_to_string(v).trim().to_string())
}

fn pick_float(row: &RawRow, keys: &[&str]) -> Option<f64> {
    match pick(row, keys)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_float(s),
        _ => None,
    }
}

fn pick_int(row: &RawRow, keys: &[&str]) -> Option<i64> {
    match pick(row, keys)? {
        Value::Number(n) => n.as_f64().map(|f| f.trunc() as i64),
        Value::String(s) => leading_int(s),
        _ => None,
    }
}

fn non_zero(v: Option<f64>) -> Option<f64> {
    v.filter(|f| *f != 0.0 && f.is_finite())
}

/// Spreadsheet serial day number to midnight of the local calendar date of
/// the serial's UTC instant.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let days = (serial - SERIAL_UNIX_OFFSET).floor();
    let seconds = days * 86_400.0;
    if seconds.abs() > i64::MAX as f64 {
        return None;
    }
    let instant = DateTime::from_timestamp(seconds as i64, 0)?;
    instant.with_timezone(&Local).date_naive().and_hms_opt(0, 0, 0)
}

pub fn decode_date(v: &Value) -> Option<NaiveDateTime> {
    match v {
        Value::Number(n) => n.as_f64().and_then(serial_to_datetime),
        Value::String(s) => parse_datetime_loose(s),
        _ => None,
    }
}

pub fn transaction_type(raw: Option<&str>) -> TransactionType {
    match raw.map(|s| s.trim().to_lowercase()).as_deref() {
        Some("masuk") | Some("stock_in") => TransactionType::StockIn,
        Some("keluar") | Some("stock_out") => TransactionType::StockOut,
        _ => TransactionType::Sale,
    }
}

fn normalize_transaction(row: &RawRow, index: usize) -> Option<Transaction> {
    let line = index + 1;
    let date = pick(row, DATE_KEYS);
    let product_name = pick_string(row, PRODUCT_NAME_KEYS);
    let (Some(date), Some(product_name)) = (date, product_name) else {
        warn!(row = line, "missing required fields (tanggal, produk), row skipped");
        return None;
    };
    let Some(date) = decode_date(date) else {
        warn!(row = line, "invalid date format, row skipped");
        return None;
    };

    let product_id = pick_string(row, PRODUCT_ID_KEYS).unwrap_or_else(|| format!("PRD-{}", index));
    let category = pick_string(row, CATEGORY_KEYS).unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
    // Missing or unreadable numbers count as 0 and are left for the validator.
    let quantity = pick_int(row, QUANTITY_KEYS).unwrap_or(0);
    let price = pick_float(row, PRICE_KEYS)
        .filter(|p| p.is_finite())
        .unwrap_or(0.0);
    let total = non_zero(pick_float(row, TOTAL_KEYS)).unwrap_or(quantity as f64 * price);
    let kind = transaction_type(pick_string(row, TYPE_KEYS).as_deref());

    Some(Transaction {
        id: next_id("import"),
        date,
        product_id,
        product_name,
        category,
        quantity,
        price,
        total,
        r#type: kind,
    })
}

/// Rows that cannot be read are dropped; the rest keep their input order.
pub fn normalize_transactions(rows: &[RawRow]) -> Vec<Transaction> {
    rows.iter()
        .enumerate()
        .filter_map(|(i, row)| normalize_transaction(row, i))
        .collect()
}

fn normalize_fish(row: &RawRow, index: usize, fish_type: FishType) -> Option<FishStock> {
    let line = index + 1;
    let Some(date) = pick(row, DATE_KEYS) else {
        warn!(row = line, "missing required field (tanggal), row skipped");
        return None;
    };
    let raw_type = pick_string(row, TYPE_KEYS).unwrap_or_default();
    let Some(direction) = StockDirection::parse(&raw_type) else {
        warn!(
            row = line,
            tipe = %raw_type,
            "invalid type (must be in/out/masuk/keluar), row skipped"
        );
        return None;
    };
    let Some(date) = decode_date(date) else {
        warn!(row = line, "invalid date format, row skipped");
        return None;
    };

    let quantity = pick_float(row, FISH_KG_KEYS)
        .filter(|q| q.is_finite())
        .unwrap_or(0.0);
    let price = non_zero(pick_float(row, FISH_PRICE_KEYS));
    let total = non_zero(pick_float(row, TOTAL_KEYS))
        .or_else(|| non_zero(Some(quantity * price.unwrap_or(0.0))));

    Some(FishStock {
        id: next_id("import"),
        date,
        fish_type,
        r#type: direction,
        quantity,
        weight: non_zero(pick_float(row, FISH_WEIGHT_KEYS)),
        total_fish: pick_int(row, FISH_COUNT_KEYS).filter(|n| *n != 0),
        price,
        total,
        reason: pick_string(row, REASON_KEYS).unwrap_or_default(),
        supplier: pick_string(row, SUPPLIER_KEYS).filter(|s| !s.is_empty()),
        reference: pick_string(row, REFERENCE_KEYS).filter(|s| !s.is_empty()),
    })
}

pub fn normalize_fish_stock(rows: &[RawRow], fish_type: FishType) -> Vec<FishStock> {
    rows.iter()
        .enumerate()
        .filter_map(|(i, row)| normalize_fish(row, i, fish_type))
        .collect()
}
