// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{daily_report, period_report, product_report, top_products};
use crate::commands::reports::{filtered_transactions, limit_from_args, period_from_args};
use crate::commands::{fish, stock};
use crate::export::{
    TableData, daily_table, fish_table, period_table, product_table, sink_for, stock_table,
    top_table,
};
use crate::utils::parse_fish_type;
use anyhow::Result;
use chrono::Local;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let Some((name, sub)) = m.subcommand() else {
        return Ok(());
    };
    let fmt = sub.get_one::<String>("format").unwrap();
    let out = sub.get_one::<String>("out").unwrap();
    // Resolve the sink first so a bad format never leaves a file behind.
    let mut sink = sink_for(fmt, out)?;

    let table: TableData = match name {
        "daily" => daily_table(&daily_report(&filtered_transactions(conn, sub)?)),
        "products" => product_table(&product_report(&filtered_transactions(conn, sub)?)),
        "top" => {
            let limit = limit_from_args(conn, sub)?;
            top_table(&top_products(&filtered_transactions(conn, sub)?, limit), limit)
        }
        "period" => {
            let period = period_from_args(conn, sub)?;
            let report = period_report(
                &filtered_transactions(conn, sub)?,
                period,
                Local::now().naive_local(),
            );
            period_table(period, &report)
        }
        "stock" => {
            let view = stock::query(conn, sub)?;
            stock_table(&view.movements, &view.summary)
        }
        "fish" => {
            let fish_type = parse_fish_type(sub.get_one::<String>("fish").unwrap())?;
            let view = fish::query(conn, sub, fish_type)?;
            fish_table(&view.stocks, &view.summary)
        }
        _ => return Ok(()),
    };
    sink.render_table(&table)?;
    println!("Exported {} report to {}", name, out);
    Ok(())
}
