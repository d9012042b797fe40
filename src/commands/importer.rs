// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::InvalidRow;
use crate::normalize::{normalize_fish_stock, normalize_transactions};
use crate::source::read_rows;
use crate::store::{self, SqliteStore};
use crate::utils::{parse_fish_type, pretty_table};
use crate::validate::{validate_fish_stock, validate_transactions};
use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

/// What an import run did; `saved` is 0 for dry runs and empty batches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub rows: usize,
    pub dropped: usize,
    pub valid: usize,
    pub invalid: Vec<InvalidRow>,
    pub saved: usize,
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let outcome = import_transactions(conn, sub)?;
            report(&outcome, "transaksi");
        }
        Some(("fish", sub)) => {
            let outcome = import_fish(conn, sub)?;
            report(&outcome, "stok ikan");
        }
        _ => {}
    }
    Ok(())
}

fn report(outcome: &ImportOutcome, what: &str) {
    println!(
        "Rows: {}  dropped: {}  valid: {}  invalid: {}",
        outcome.rows,
        outcome.dropped,
        outcome.valid,
        outcome.invalid.len()
    );
    if !outcome.invalid.is_empty() {
        let rows = outcome
            .invalid
            .iter()
            .map(|r| vec![r.row.to_string(), r.reason.clone()])
            .collect();
        println!("{}", pretty_table(&["Baris", "Error"], rows));
    }
    if outcome.valid == 0 {
        println!("Nothing to save: no valid rows");
    } else if outcome.saved == 0 {
        println!("Dry run: {} data {} would be saved", outcome.valid, what);
    } else {
        println!("{} data {} saved", outcome.saved, what);
    }
}

pub fn import_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<ImportOutcome> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let dry_run = sub.get_flag("dry_run");
    let rows = read_rows(Path::new(path))?;
    let records = normalize_transactions(&rows);
    let checked = validate_transactions(&records);

    let kv = SqliteStore::new(conn);
    let saved = if dry_run || checked.valid.is_empty() {
        0
    } else {
        store::transactions(&kv).append(&checked.valid)?;
        checked.valid.len()
    };
    Ok(ImportOutcome {
        rows: rows.len(),
        dropped: rows.len() - records.len(),
        valid: checked.valid.len(),
        invalid: checked.invalid,
        saved,
    })
}

pub fn import_fish(conn: &Connection, sub: &clap::ArgMatches) -> Result<ImportOutcome> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let fish_type = parse_fish_type(sub.get_one::<String>("fish").unwrap())?;
    let dry_run = sub.get_flag("dry_run");
    let rows = read_rows(Path::new(path))?;
    let records = normalize_fish_stock(&rows, fish_type);
    let checked = validate_fish_stock(&records);

    let kv = SqliteStore::new(conn);
    let saved = if dry_run || checked.valid.is_empty() {
        0
    } else {
        store::fish_stock(&kv, fish_type).append(&checked.valid)?;
        checked.valid.len()
    };
    Ok(ImportOutcome {
        rows: rows.len(),
        dropped: rows.len() - records.len(),
        valid: checked.valid.len(),
        invalid: checked.invalid,
        saved,
    })
}
