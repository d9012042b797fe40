// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{DateRange, FishType, Period, StockDirection};

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Best-effort parse of a date string as found in spreadsheets and CSV files.
/// RFC 3339 instants are converted to local wall-clock time.
pub fn parse_datetime_loose(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

static LEADING_FLOAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?").unwrap());
static LEADING_INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+").unwrap());

/// Numeric prefix of `s`, so `"12.5kg"` reads as 12.5. `None` when there is none.
pub fn leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    LEADING_FLOAT
        .find(s)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Integer prefix of `s`; `"5.9"` reads as 5.
pub fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    LEADING_INT.find(s).and_then(|m| m.as_str().parse::<i64>().ok())
}

/// Resolves `--from/--to/--preset` into a window. An explicit bound wins over the preset.
pub fn date_range_from_args(sub: &clap::ArgMatches, today: NaiveDate) -> Result<DateRange> {
    let mut range = match sub.get_one::<String>("preset").map(|s| s.as_str()) {
        None | Some("all") => DateRange::all(),
        Some("today") => DateRange::today(today),
        Some("week") => DateRange::last_days(7, today),
        Some("month") => DateRange::last_days(30, today),
        Some(other) => {
            return Err(anyhow!(
                "Unknown preset '{}' (use today|week|month|all)",
                other
            ));
        }
    };
    if let Some(from) = sub.get_one::<String>("from") {
        range.start_date = Some(parse_date(from)?);
    }
    if let Some(to) = sub.get_one::<String>("to") {
        range.end_date = Some(parse_date(to)?);
    }
    Ok(range)
}

pub fn parse_fish_type(s: &str) -> Result<FishType> {
    FishType::parse(s).ok_or_else(|| anyhow!("Invalid fish type '{}' (use lele|nila)", s))
}

pub fn parse_direction(s: &str) -> Result<StockDirection> {
    StockDirection::parse(s)
        .ok_or_else(|| anyhow!("Invalid stock type '{}' (use in|out|masuk|keluar)", s))
}

pub fn parse_period(s: &str) -> Result<Period> {
    Period::parse(s).ok_or_else(|| anyhow!("Invalid period '{}' (use weekly|monthly)", s))
}

/// `--type all|in|out` on the stock pages.
pub fn direction_filter(sub: &clap::ArgMatches) -> Result<Option<StockDirection>> {
    match sub.get_one::<String>("type").map(|s| s.as_str()) {
        None | Some("all") => Ok(None),
        Some(s) => parse_direction(s).map(Some),
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
