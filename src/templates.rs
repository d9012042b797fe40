// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde_json::{Value, json};
use std::path::Path;

use crate::normalize::RawRow;

fn rows(v: Value) -> Vec<RawRow> {
    match v {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|i| match i {
                Value::Object(m) => Some(m),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Example rows for the shop sales import.
pub fn warung_template() -> Vec<RawRow> {
    rows(json!([
        {
            "tanggal": "2025-01-15",
            "produk": "Mie Instan",
            "kategori": "Makanan",
            "jumlah": 10,
            "harga": 3000,
            "total": 30000
        },
        {
            "tanggal": "2025-01-15",
            "produk": "Kopi",
            "kategori": "Minuman",
            "jumlah": 5,
            "harga": 4000,
            "total": 20000
        }
    ]))
}

/// Example rows for the fish-pond stock import.
pub fn fishing_template() -> Vec<RawRow> {
    rows(json!([
        {
            "tanggal": "2025-01-15",
            "tipe": "in",
            "berat_kg": 50,
            "berat_per_ekor": 120,
            "jumlah_ikan": 416,
            "harga_per_kg": 25000,
            "total": 1250000,
            "keterangan": "Pembelian bibit",
            "supplier": "CV Mina Jaya",
            "referensi": "INV-001"
        },
        {
            "tanggal": "2025-01-20",
            "tipe": "out",
            "berat_kg": 20,
            "berat_per_ekor": 150,
            "jumlah_ikan": 133,
            "harga_per_kg": 35000,
            "total": 700000,
            "keterangan": "Penjualan",
            "supplier": "",
            "referensi": "SO-001"
        }
    ]))
}

fn cell(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Writes template rows as CSV; columns follow the first row's key order.
pub fn write_template(rows: &[RawRow], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    let Some(first) = rows.first() else {
        wtr.flush()?;
        return Ok(());
    };
    let headers: Vec<&String> = first.keys().collect();
    wtr.write_record(headers.iter().map(|h| h.as_str()))?;
    for row in rows {
        wtr.write_record(
            headers
                .iter()
                .map(|h| row.get(h.as_str()).map(cell).unwrap_or_default()),
        )?;
    }
    wtr.flush()?;
    Ok(())
}
