// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

use crate::config;

fn range_args() -> [Arg; 3] {
    [
        Arg::new("from")
            .long("from")
            .help("First day to include (YYYY-MM-DD)"),
        Arg::new("to")
            .long("to")
            .help("Last day to include (YYYY-MM-DD)"),
        Arg::new("preset")
            .long("preset")
            .value_parser(["today", "week", "month", "all"])
            .help("Quick range: today, last 7 or 30 days, or everything"),
    ]
}

fn output_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    ]
}

fn limit_arg() -> Arg {
    Arg::new("limit")
        .long("limit")
        .value_parser(|s: &str| config::parse_top_limit(s))
        .help("Number of products, 1-50 (defaults to the top_limit setting)")
}

fn period_arg() -> Arg {
    Arg::new("period")
        .long("period")
        .help("weekly|monthly (defaults to the period setting)")
}

fn fish_arg() -> Arg {
    Arg::new("fish")
        .long("fish")
        .required(true)
        .help("Fish type: lele|nila")
}

fn direction_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .help("Movement direction: all|in|out")
}

fn export_target(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(
            Arg::new("format")
                .long("format")
                .required(true)
                .help("csv|json"),
        )
        .arg(Arg::new("out").long("out").required(true))
        .args(range_args())
}

pub fn build_cli() -> Command {
    Command::new("warungboard")
        .about("Sales, stock and fish-pond reports from spreadsheet imports")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("import")
                .about("Import spreadsheet rows (CSV or JSON)")
                .subcommand(
                    Command::new("transactions")
                        .about("Shop sales and stock transactions")
                        .arg(Arg::new("path").long("path").required(true))
                        .arg(
                            Arg::new("dry_run")
                                .long("dry-run")
                                .action(ArgAction::SetTrue)
                                .help("Validate only, save nothing"),
                        ),
                )
                .subcommand(
                    Command::new("fish")
                        .about("Fish-pond stock movements")
                        .arg(Arg::new("path").long("path").required(true))
                        .arg(fish_arg())
                        .arg(
                            Arg::new("dry_run")
                                .long("dry-run")
                                .action(ArgAction::SetTrue)
                                .help("Validate only, save nothing"),
                        ),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record one transaction by hand")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("product").long("product").required(true))
                        .arg(Arg::new("product_id").long("product-id"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("qty")
                                .long("qty")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("price")
                                .long("price")
                                .required(true)
                                .value_parser(value_parser!(f64)),
                        )
                        .arg(
                            Arg::new("total")
                                .long("total")
                                .value_parser(value_parser!(f64)),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .help("sale|stock_in|stock_out (also masuk|keluar)"),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .args(range_args())
                        .args(output_args())
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )
                .subcommand(Command::new("clear").about("Remove every stored transaction")),
        )
        .subcommand(
            Command::new("stock")
                .about("Generic stock ledger")
                .subcommand(
                    Command::new("add")
                        .about("Record one stock movement by hand")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("product").long("product").required(true))
                        .arg(Arg::new("product_id").long("product-id"))
                        .arg(Arg::new("type").long("type").required(true))
                        .arg(
                            Arg::new("qty")
                                .long("qty")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("reason").long("reason"))
                        .arg(Arg::new("reference").long("reference")),
                )
                .subcommand(
                    Command::new("report")
                        .args(range_args())
                        .args(output_args())
                        .arg(direction_arg()),
                )
                .subcommand(Command::new("clear").about("Remove every stored stock movement")),
        )
        .subcommand(
            Command::new("fish")
                .about("Fish-pond stock")
                .subcommand(
                    Command::new("report")
                        .arg(fish_arg())
                        .args(range_args())
                        .args(output_args())
                        .arg(direction_arg()),
                )
                .subcommand(Command::new("summary").args(range_args()).args(output_args()))
                .subcommand(Command::new("clear").arg(fish_arg())),
        )
        .subcommand(
            Command::new("report")
                .about("Sales reports")
                .subcommand(
                    Command::new("daily")
                        .args(range_args())
                        .args(output_args()),
                )
                .subcommand(
                    Command::new("products")
                        .args(range_args())
                        .args(output_args()),
                )
                .subcommand(
                    Command::new("top")
                        .args(range_args())
                        .args(output_args())
                        .arg(limit_arg()),
                )
                .subcommand(
                    Command::new("period")
                        .args(range_args())
                        .args(output_args())
                        .arg(period_arg()),
                )
                .subcommand(
                    Command::new("summary")
                        .args(range_args())
                        .args(output_args())
                        .arg(limit_arg()),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write a report table to a file")
                .subcommand(export_target("daily", "Daily sales"))
                .subcommand(export_target("products", "Sales per product"))
                .subcommand(export_target("top", "Best sellers").arg(limit_arg()))
                .subcommand(export_target("period", "Weekly/monthly sales").arg(period_arg()))
                .subcommand(export_target("stock", "Stock in/out").arg(direction_arg()))
                .subcommand(
                    export_target("fish", "Fish stock")
                        .arg(fish_arg())
                        .arg(direction_arg()),
                ),
        )
        .subcommand(
            Command::new("template")
                .about("Write an example import file")
                .arg(
                    Arg::new("kind")
                        .required(true)
                        .value_parser(["warung", "fishing"]),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand(Command::new("get").arg(Arg::new("key").required(true)))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                )
                .subcommand(Command::new("list")),
        )
}
