// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::stock_summary;
use crate::export::{TableSink, TerminalSink, stock_table};
use crate::filter::{filter_by_date, filter_by_direction};
use crate::models::{StockMovement, StockSummary};
use crate::normalize::next_id;
use crate::store::{self, SqliteStore};
use crate::utils::{
    date_range_from_args, direction_filter, maybe_print_json, parse_date, parse_direction,
};
use crate::validate::stock_movement_errors;
use anyhow::{Result, anyhow};
use chrono::Local;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            add(conn, sub)?;
        }
        Some(("report", sub)) => report(conn, sub)?,
        Some(("clear", _)) => {
            let kv = SqliteStore::new(conn);
            store::stock_movements(&kv).clear()?;
            println!("Removed all stock movements");
        }
        _ => {}
    }
    Ok(())
}

pub fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<StockMovement> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let direction = parse_direction(sub.get_one::<String>("type").unwrap())?;
    let movement = StockMovement {
        id: next_id("STK"),
        date: date.and_time(chrono::NaiveTime::MIN),
        product_id: sub
            .get_one::<String>("product_id")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| next_id("PRD")),
        product_name: sub.get_one::<String>("product").unwrap().trim().to_string(),
        r#type: direction,
        quantity: *sub.get_one::<i64>("qty").unwrap(),
        reason: sub
            .get_one::<String>("reason")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| "Manual Input".to_string()),
        reference: sub
            .get_one::<String>("reference")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    };
    let errors = stock_movement_errors(&movement);
    if !errors.is_empty() {
        return Err(anyhow!("Invalid stock movement: {}", errors.join(", ")));
    }
    let kv = SqliteStore::new(conn);
    store::stock_movements(&kv).append(std::slice::from_ref(&movement))?;
    println!(
        "Recorded stock {} {} x {} on {}",
        movement.r#type,
        movement.quantity,
        movement.product_name,
        movement.date.date()
    );
    Ok(movement)
}

#[derive(Debug, Serialize)]
pub struct StockView {
    pub summary: StockSummary,
    pub movements: Vec<StockMovement>,
}

pub fn query(conn: &Connection, sub: &clap::ArgMatches) -> Result<StockView> {
    let kv = SqliteStore::new(conn);
    let all = store::stock_movements(&kv).load()?;
    let range = date_range_from_args(sub, Local::now().date_naive())?;
    let dated = filter_by_date(&all, &range);
    let movements = filter_by_direction(&*dated, direction_filter(sub)?).into_owned();
    Ok(StockView {
        summary: stock_summary(&movements),
        movements,
    })
}

fn report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let view = query(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        TerminalSink::new(std::io::stdout())
            .render_table(&stock_table(&view.movements, &view.summary))?;
    }
    Ok(())
}
