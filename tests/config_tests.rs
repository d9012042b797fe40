// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use warungboard::commands::reports::{limit_from_args, period_from_args};
use warungboard::config::{
    DEFAULT_TOP_LIMIT, default_period, get_setting, set_setting, top_limit,
};
use warungboard::models::Period;
use warungboard::{cli, commands::settings, db};

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

#[test]
fn defaults_apply_when_unset() {
    let conn = base_conn();
    assert_eq!(top_limit(&conn).unwrap(), DEFAULT_TOP_LIMIT);
    assert_eq!(default_period(&conn).unwrap(), Period::Weekly);
    assert_eq!(get_setting(&conn, "top_limit").unwrap(), None);
}

#[test]
fn settings_are_validated_before_saving() {
    let conn = base_conn();
    set_setting(&conn, "top_limit", " 10 ").unwrap();
    assert_eq!(top_limit(&conn).unwrap(), 10);
    assert!(set_setting(&conn, "top_limit", "0").is_err());
    assert!(set_setting(&conn, "top_limit", "51").is_err());
    assert!(set_setting(&conn, "top_limit", "lima").is_err());
    assert_eq!(top_limit(&conn).unwrap(), 10);

    set_setting(&conn, "period", "bulanan").unwrap();
    assert_eq!(default_period(&conn).unwrap(), Period::Monthly);
    assert!(set_setting(&conn, "period", "yearly").is_err());

    let err = set_setting(&conn, "currency", "IDR").unwrap_err();
    assert!(err.to_string().contains("Unknown setting"));
}

#[test]
fn config_set_via_cli() {
    let conn = base_conn();
    let matches =
        cli::build_cli().get_matches_from(["warungboard", "config", "set", "top_limit", "3"]);
    if let Some(("config", m)) = matches.subcommand() {
        settings::handle(&conn, m).unwrap();
    } else {
        panic!("no config subcommand");
    }
    assert_eq!(get_setting(&conn, "top_limit").unwrap().as_deref(), Some("3"));
}

#[test]
fn report_arguments_fall_back_to_settings() {
    let conn = base_conn();
    set_setting(&conn, "top_limit", "7").unwrap();
    set_setting(&conn, "period", "monthly").unwrap();

    let matches = cli::build_cli().get_matches_from(["warungboard", "report", "top"]);
    let (_, report_m) = matches.subcommand().unwrap();
    let (_, sub) = report_m.subcommand().unwrap();
    assert_eq!(limit_from_args(&conn, sub).unwrap(), 7);

    let matches =
        cli::build_cli().get_matches_from(["warungboard", "report", "top", "--limit", "2"]);
    let (_, report_m) = matches.subcommand().unwrap();
    let (_, sub) = report_m.subcommand().unwrap();
    assert_eq!(limit_from_args(&conn, sub).unwrap(), 2);

    let matches = cli::build_cli().get_matches_from(["warungboard", "report", "period"]);
    let (_, report_m) = matches.subcommand().unwrap();
    let (_, sub) = report_m.subcommand().unwrap();
    assert_eq!(period_from_args(&conn, sub).unwrap(), Period::Monthly);
}

#[test]
fn limit_flag_follows_the_top_limit_range() {
    for argv in [
        ["warungboard", "report", "top", "--limit", "0"],
        ["warungboard", "report", "top", "--limit", "51"],
        ["warungboard", "report", "summary", "--limit", "0"],
        ["warungboard", "export", "top", "--limit", "0"],
    ] {
        assert!(cli::build_cli().try_get_matches_from(argv).is_err(), "{:?}", argv);
    }

    let conn = base_conn();
    let matches =
        cli::build_cli().get_matches_from(["warungboard", "report", "top", "--limit", "50"]);
    let (_, report_m) = matches.subcommand().unwrap();
    let (_, sub) = report_m.subcommand().unwrap();
    assert_eq!(limit_from_args(&conn, sub).unwrap(), 50);
}
