// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::fish_stock_summary;
use crate::export::{TableSink, TerminalSink, fish_table};
use crate::filter::{filter_by_date, filter_by_direction};
use crate::format::{format_currency, format_number};
use crate::models::{FishStock, FishStockSummary, FishType};
use crate::store::{self, SqliteStore};
use crate::utils::{
    date_range_from_args, direction_filter, maybe_print_json, parse_fish_type, pretty_table,
};
use anyhow::Result;
use chrono::Local;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("report", sub)) => report(conn, sub)?,
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("clear", sub)) => {
            let fish_type = parse_fish_type(sub.get_one::<String>("fish").unwrap())?;
            let kv = SqliteStore::new(conn);
            store::fish_stock(&kv, fish_type).clear()?;
            println!("Removed all {} stock", fish_type);
        }
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct FishView {
    pub summary: FishStockSummary,
    pub stocks: Vec<FishStock>,
}

/// Stored entries for one fish type after the date and direction filters.
pub fn query(conn: &Connection, sub: &clap::ArgMatches, fish_type: FishType) -> Result<FishView> {
    let kv = SqliteStore::new(conn);
    let all = store::fish_stock(&kv, fish_type).load()?;
    let range = date_range_from_args(sub, Local::now().date_naive())?;
    let dated = filter_by_date(&all, &range);
    let stocks = filter_by_direction(&*dated, direction_filter(sub)?).into_owned();
    Ok(FishView {
        summary: fish_stock_summary(fish_type, &stocks),
        stocks,
    })
}

fn report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fish_type = parse_fish_type(sub.get_one::<String>("fish").unwrap())?;
    let view = query(conn, sub, fish_type)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        TerminalSink::new(std::io::stdout()).render_table(&fish_table(&view.stocks, &view.summary))?;
    }
    Ok(())
}

/// Both ponds side by side, like the dashboard's overview cards.
pub fn summaries(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<FishStockSummary>> {
    let kv = SqliteStore::new(conn);
    let range = date_range_from_args(sub, Local::now().date_naive())?;
    let mut out = Vec::new();
    for fish_type in [FishType::Lele, FishType::Nila] {
        let all = store::fish_stock(&kv, fish_type).load()?;
        out.push(fish_stock_summary(fish_type, &filter_by_date(&all, &range)));
    }
    Ok(out)
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = summaries(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|s| {
                vec![
                    s.fish_type.to_string(),
                    format!("{} kg", format_number(s.total_in)),
                    format!("{} kg", format_number(s.total_out)),
                    format!("{} kg", format_number(s.current_stock)),
                    format_currency(s.revenue),
                    format_currency(s.purchase),
                    format_currency(s.profit),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Ikan",
                    "Masuk",
                    "Keluar",
                    "Stok Saat Ini",
                    "Penjualan",
                    "Pembelian",
                    "Keuntungan"
                ],
                rows,
            )
        );
    }
    Ok(())
}
