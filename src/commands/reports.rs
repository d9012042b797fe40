// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{daily_report, period_report, product_report, report_summary, top_products};
use crate::config::{default_period, top_limit};
use crate::export::{
    TableData, TableSink, TerminalSink, daily_table, period_table, product_table, top_table,
};
use crate::filter::filter_by_date;
use crate::format::format_currency;
use crate::models::{Period, Transaction};
use crate::store::{self, SqliteStore};
use crate::utils::{date_range_from_args, maybe_print_json, parse_period, pretty_table};
use anyhow::Result;
use chrono::Local;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("daily", sub)) => daily(conn, sub)?,
        Some(("products", sub)) => products(conn, sub)?,
        Some(("top", sub)) => top(conn, sub)?,
        Some(("period", sub)) => period(conn, sub)?,
        Some(("summary", sub)) => summary(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Stored transactions narrowed to the `--from/--to/--preset` window.
pub fn filtered_transactions(
    conn: &Connection,
    sub: &clap::ArgMatches,
) -> Result<Vec<Transaction>> {
    let kv = SqliteStore::new(conn);
    let all = store::transactions(&kv).load()?;
    let range = date_range_from_args(sub, Local::now().date_naive())?;
    Ok(filter_by_date(&all, &range).into_owned())
}

pub fn limit_from_args(conn: &Connection, sub: &clap::ArgMatches) -> Result<usize> {
    match sub.get_one::<usize>("limit") {
        Some(n) => Ok(*n),
        None => top_limit(conn),
    }
}

pub fn period_from_args(conn: &Connection, sub: &clap::ArgMatches) -> Result<Period> {
    match sub.get_one::<String>("period") {
        Some(p) => parse_period(p),
        None => default_period(conn),
    }
}

fn print_table(
    json_flag: bool,
    jsonl_flag: bool,
    data: &impl serde::Serialize,
    table: impl FnOnce() -> TableData,
) -> Result<()> {
    if !maybe_print_json(json_flag, jsonl_flag, data)? {
        TerminalSink::new(std::io::stdout()).render_table(&table())?;
    }
    Ok(())
}

fn daily(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = daily_report(&filtered_transactions(conn, sub)?);
    print_table(sub.get_flag("json"), sub.get_flag("jsonl"), &data, || {
        daily_table(&data)
    })
}

fn products(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = product_report(&filtered_transactions(conn, sub)?);
    print_table(sub.get_flag("json"), sub.get_flag("jsonl"), &data, || {
        product_table(&data)
    })
}

fn top(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let limit = limit_from_args(conn, sub)?;
    let data = top_products(&filtered_transactions(conn, sub)?, limit);
    print_table(sub.get_flag("json"), sub.get_flag("jsonl"), &data, || {
        top_table(&data, limit)
    })
}

// The trailing 7/30-day window stacks on top of the --from/--to window.
fn period(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let period = period_from_args(conn, sub)?;
    let data = period_report(
        &filtered_transactions(conn, sub)?,
        period,
        Local::now().naive_local(),
    );
    print_table(sub.get_flag("json"), sub.get_flag("jsonl"), &data, || {
        period_table(period, &data)
    })
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let limit = limit_from_args(conn, sub)?;
    let data = report_summary(&filtered_transactions(conn, sub)?, limit);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!("Total Penjualan: {}", format_currency(data.total_sales));
        println!("Jumlah Transaksi: {}", data.total_transactions);
        println!(
            "Rata-rata Transaksi: {}",
            format_currency(data.average_transaction)
        );
        let rows = data
            .top_products
            .iter()
            .enumerate()
            .map(|(i, p)| {
                vec![
                    (i + 1).to_string(),
                    p.product_name.clone(),
                    p.total_quantity.to_string(),
                    format_currency(p.total_revenue),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["No", "Produk", "Qty", "Pendapatan"], rows)
        );
    }
    Ok(())
}
