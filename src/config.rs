// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use rusqlite::{Connection, OptionalExtension, params};

use crate::models::Period;
use crate::utils::parse_period;

pub const TOP_LIMIT_KEY: &str = "top_limit";
pub const PERIOD_KEY: &str = "period";

pub const DEFAULT_TOP_LIMIT: usize = 5;
pub const MAX_TOP_LIMIT: usize = 50;

/// Keys accepted by `config set`.
pub const KNOWN_KEYS: &[&str] = &[TOP_LIMIT_KEY, PERIOD_KEY];

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    validate_setting(key, value)?;
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value.trim()],
    )?;
    Ok(())
}

fn validate_setting(key: &str, value: &str) -> Result<()> {
    match key {
        TOP_LIMIT_KEY => parse_top_limit(value).map(|_| ()),
        PERIOD_KEY => parse_period(value).map(|_| ()),
        other => Err(anyhow!(
            "Unknown setting '{}' (known: {})",
            other,
            KNOWN_KEYS.join(", ")
        )),
    }
}

pub fn parse_top_limit(s: &str) -> Result<usize> {
    let n: usize = s
        .trim()
        .parse()
        .with_context(|| format!("Invalid top limit '{}'", s))?;
    if n == 0 || n > MAX_TOP_LIMIT {
        return Err(anyhow!(
            "Top limit must be between 1 and {}, got {}",
            MAX_TOP_LIMIT,
            n
        ));
    }
    Ok(n)
}

pub fn top_limit(conn: &Connection) -> Result<usize> {
    match get_setting(conn, TOP_LIMIT_KEY)? {
        Some(v) => parse_top_limit(&v),
        None => Ok(DEFAULT_TOP_LIMIT),
    }
}

pub fn default_period(conn: &Connection) -> Result<Period> {
    match get_setting(conn, PERIOD_KEY)? {
        Some(v) => parse_period(&v),
        None => Ok(Period::Weekly),
    }
}
