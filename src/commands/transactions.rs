// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::filter::filter_by_date;
use crate::format::{format_currency, format_date};
use crate::models::{Transaction, TransactionType};
use crate::normalize::{DEFAULT_CATEGORY, next_id, transaction_type};
use crate::store::{self, SqliteStore};
use crate::utils::{date_range_from_args, maybe_print_json, parse_date, pretty_table};
use crate::validate::transaction_errors;
use anyhow::{Result, anyhow};
use chrono::Local;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            add(conn, sub)?;
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("clear", _)) => {
            let kv = SqliteStore::new(conn);
            store::transactions(&kv).clear()?;
            println!("Removed all transactions");
        }
        _ => {}
    }
    Ok(())
}

pub fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<Transaction> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let product_name = sub.get_one::<String>("product").unwrap().trim().to_string();
    let quantity = *sub.get_one::<i64>("qty").unwrap();
    let price = *sub.get_one::<f64>("price").unwrap();
    let total = sub
        .get_one::<f64>("total")
        .copied()
        .unwrap_or(quantity as f64 * price);
    let kind = sub
        .get_one::<String>("type")
        .map(|s| transaction_type(Some(s)))
        .unwrap_or(TransactionType::Sale);
    let product_id = sub
        .get_one::<String>("product_id")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| next_id("PRD"));
    let category = sub
        .get_one::<String>("category")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    let tx = Transaction {
        id: next_id("TRX"),
        date: date.and_time(chrono::NaiveTime::MIN),
        product_id,
        product_name,
        category,
        quantity,
        price,
        total,
        r#type: kind,
    };
    let errors = transaction_errors(&tx);
    if !errors.is_empty() {
        return Err(anyhow!("Invalid transaction: {}", errors.join(", ")));
    }

    let kv = SqliteStore::new(conn);
    store::transactions(&kv).append(std::slice::from_ref(&tx))?;
    println!(
        "Recorded {} x {} on {} ({})",
        tx.quantity,
        tx.product_name,
        tx.date.date(),
        format_currency(tx.total)
    );
    Ok(tx)
}

/// Stored transactions inside the requested window, newest first.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let kv = SqliteStore::new(conn);
    let all = store::transactions(&kv).load()?;
    let range = date_range_from_args(sub, Local::now().date_naive())?;
    let mut data = filter_by_date(&all, &range).into_owned();
    data.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    format_date(t.date.date()),
                    t.id.clone(),
                    t.product_name.clone(),
                    t.category.clone(),
                    t.r#type.to_string(),
                    t.quantity.to_string(),
                    format_currency(t.price),
                    format_currency(t.total),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Tanggal", "ID", "Produk", "Kategori", "Tipe", "Qty", "Harga", "Total"],
                rows,
            )
        );
    }
    Ok(())
}
