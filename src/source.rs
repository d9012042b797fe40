// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use serde_json::{Number, Value};
use std::io::Read;
use std::path::Path;

use crate::normalize::RawRow;

/// Spreadsheet-style cell typing: plain numbers become JSON numbers, the rest stays text.
fn cell_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::String(String::new());
    }
    // Zero-padded codes such as "007" are identifiers, not numbers.
    let digits = trimmed.trim_start_matches(['+', '-']);
    if digits.len() > 1 && digits.starts_with('0') && digits.as_bytes()[1].is_ascii_digit() {
        return Value::String(raw.to_string());
    }
    match trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(n) if trimmed.chars().all(|c| c.is_ascii_digit() || "+-.eE".contains(c)) => {
            Value::Number(n)
        }
        _ => Value::String(raw.to_string()),
    }
}

pub fn read_csv_rows<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
        .collect();
    let mut rows = Vec::new();
    for result in rdr.records() {
        let rec = result?;
        let mut row = RawRow::new();
        for (key, cell) in headers.iter().zip(rec.iter()) {
            if key.is_empty() {
                continue;
            }
            row.insert(key.clone(), cell_value(cell));
        }
        rows.push(row);
    }
    Ok(rows)
}

pub fn read_json_rows(s: &str) -> Result<Vec<RawRow>> {
    let v: Value = serde_json::from_str(s)?;
    let Value::Array(items) = v else {
        return Err(anyhow!("Expected a JSON array of row objects"));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(map) => Ok(map),
            _ => Err(anyhow!("Row {} is not an object", i + 1)),
        })
        .collect()
}

/// Rows from a `.csv` or `.json` file, keyed by column name.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "csv" => {
            let f = std::fs::File::open(path)
                .with_context(|| format!("Open CSV {}", path.display()))?;
            read_csv_rows(f).with_context(|| format!("Read CSV {}", path.display()))
        }
        "json" => {
            let s = std::fs::read_to_string(path)
                .with_context(|| format!("Open JSON {}", path.display()))?;
            read_json_rows(&s).with_context(|| format!("Read JSON {}", path.display()))
        }
        other => Err(anyhow!(
            "Unsupported import format '{}' (use .csv or .json)",
            other
        )),
    }
}
