// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Local};
use rusqlite::Connection;
use std::path::Path;
use tempfile::tempdir;
use warungboard::aggregate::product_report;
use warungboard::models::{FishType, StockDirection};
use warungboard::source::read_csv_rows;
use warungboard::store::{self, SqliteStore};
use warungboard::templates::{fishing_template, warung_template, write_template};
use warungboard::{cli, commands::importer, db};

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn import(conn: &Connection, args: &[&str]) -> anyhow::Result<importer::ImportOutcome> {
    let mut argv = vec!["warungboard", "import"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("import", m)) = matches.subcommand() else {
        panic!("no import subcommand");
    };
    match m.subcommand() {
        Some(("transactions", sub)) => importer::import_transactions(conn, sub),
        Some(("fish", sub)) => importer::import_fish(conn, sub),
        _ => panic!("no import target"),
    }
}

fn write(path: &Path, body: &str) -> String {
    std::fs::write(path, body).unwrap();
    path.to_string_lossy().to_string()
}

const SALES_CSV: &str = "\
tanggal,produk,kategori,jumlah,harga,total
2025-01-15,Mie Instan,Makanan,10,3000,30000
2025-01-15,Kopi,,5,4000,
,Tanpa Tanggal,,1,1000,
2025-01-16,Teh,Minuman,0,2000,
";

#[test]
fn csv_import_saves_valid_rows_and_reports_the_rest() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let path = write(&dir.path().join("penjualan.csv"), SALES_CSV);

    let outcome = import(&conn, &["transactions", "--path", &path]).unwrap();
    assert_eq!(outcome.rows, 4);
    assert_eq!(outcome.dropped, 1);
    assert_eq!(outcome.valid, 2);
    assert_eq!(outcome.saved, 2);
    assert_eq!(outcome.invalid.len(), 1);
    // numbered among the rows that survived normalization
    assert_eq!(outcome.invalid[0].row, 3);
    assert_eq!(outcome.invalid[0].reason, "Jumlah harus > 0, Total harus > 0");

    let kv = SqliteStore::new(&conn);
    let saved = store::transactions(&kv).load().unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0].product_name, "Mie Instan");
    assert_eq!(saved[0].category, "Makanan");
    assert_eq!(saved[1].product_name, "Kopi");
    assert_eq!(saved[1].category, "Umum");
    assert_eq!(saved[1].total, 20000.0);
}

#[test]
fn repeated_imports_append() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let path = write(&dir.path().join("penjualan.csv"), SALES_CSV);
    import(&conn, &["transactions", "--path", &path]).unwrap();
    import(&conn, &["transactions", "--path", &path]).unwrap();

    let kv = SqliteStore::new(&conn);
    assert_eq!(store::transactions(&kv).load().unwrap().len(), 4);
}

#[test]
fn dry_run_saves_nothing() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let path = write(&dir.path().join("penjualan.csv"), SALES_CSV);

    let outcome = import(&conn, &["transactions", "--path", &path, "--dry-run"]).unwrap();
    assert_eq!(outcome.valid, 2);
    assert_eq!(outcome.saved, 0);
    let kv = SqliteStore::new(&conn);
    assert!(store::transactions(&kv).load().unwrap().is_empty());
}

#[test]
fn batch_without_valid_rows_leaves_store_untouched() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let path = write(
        &dir.path().join("kosong.csv"),
        "tanggal,produk,jumlah,harga\n2025-01-15,Kopi,0,0\n",
    );
    let outcome = import(&conn, &["transactions", "--path", &path]).unwrap();
    assert_eq!(outcome.valid, 0);
    assert_eq!(outcome.saved, 0);
    let kv = SqliteStore::new(&conn);
    assert!(store::transactions(&kv).load().unwrap().is_empty());
}

#[test]
fn json_import_reads_an_array_of_rows() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let path = write(
        &dir.path().join("sales.json"),
        r#"[
            {"Date": 45672, "Product": "Gula", "Quantity": 2, "Price": 15000},
            {"date": "2025-01-16", "product": "Beras", "quantity": "5 kg", "price": "12000"}
        ]"#,
    );
    let outcome = import(&conn, &["transactions", "--path", &path]).unwrap();
    assert_eq!(outcome.saved, 2);

    let kv = SqliteStore::new(&conn);
    let saved = store::transactions(&kv).load().unwrap();
    let serial_day = DateTime::from_timestamp(1_736_899_200, 0)
        .unwrap()
        .with_timezone(&Local)
        .date_naive();
    assert_eq!(saved[0].date.date(), serial_day);
    assert_eq!(saved[0].total, 30000.0);
    assert_eq!(saved[1].quantity, 5);
    assert_eq!(saved[1].total, 60000.0);
}

#[test]
fn unsupported_extension_is_an_error() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let path = write(&dir.path().join("data.xlsx"), "binary");
    let err = import(&conn, &["transactions", "--path", &path]).unwrap_err();
    assert!(err.to_string().contains("Unsupported import format"));
}

#[test]
fn fish_import_goes_to_the_chosen_pond() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let path = write(
        &dir.path().join("nila.csv"),
        "\
tanggal,tipe,berat_kg,harga_per_kg,keterangan
2025-01-15,masuk,50,25000,Bibit
2025-01-20,keluar,20,35000,Panen
2025-01-21,pindah,5,1000,
2025-01-22,in,0,1000,
",
    );
    let outcome = import(&conn, &["fish", "--path", &path, "--fish", "nila"]).unwrap();
    assert_eq!(outcome.rows, 4);
    assert_eq!(outcome.dropped, 1);
    assert_eq!(outcome.valid, 2);
    assert_eq!(outcome.invalid[0].reason, "Berat (kg) harus > 0");

    let kv = SqliteStore::new(&conn);
    let nila = store::fish_stock(&kv, FishType::Nila).load().unwrap();
    assert_eq!(nila.len(), 2);
    assert_eq!(nila[0].r#type, StockDirection::In);
    assert_eq!(nila[0].total, Some(1_250_000.0));
    assert_eq!(nila[1].total, Some(700_000.0));
    assert!(store::fish_stock(&kv, FishType::Lele).load().unwrap().is_empty());
}

#[test]
fn templates_import_cleanly() {
    let conn = base_conn();
    let dir = tempdir().unwrap();

    let warung = dir.path().join("warung.csv");
    write_template(&warung_template(), &warung).unwrap();
    let outcome = import(
        &conn,
        &["transactions", "--path", &warung.to_string_lossy()],
    )
    .unwrap();
    assert_eq!(outcome.saved, 2);
    assert!(outcome.invalid.is_empty());

    let fishing = dir.path().join("fishing.csv");
    write_template(&fishing_template(), &fishing).unwrap();
    let outcome = import(
        &conn,
        &["fish", "--path", &fishing.to_string_lossy(), "--fish", "lele"],
    )
    .unwrap();
    assert_eq!(outcome.saved, 2);

    let kv = SqliteStore::new(&conn);
    let lele = store::fish_stock(&kv, FishType::Lele).load().unwrap();
    assert_eq!(lele[0].supplier.as_deref(), Some("CV Mina Jaya"));
    assert_eq!(lele[1].supplier, None);
    assert_eq!(lele[1].total_fish, Some(133));
}

#[test]
fn zero_padded_ids_stay_text() {
    let rows = read_csv_rows(
        "id_produk,jumlah,harga\n007,0012,0.5\n7,3,0\n".as_bytes(),
    )
    .unwrap();
    assert_eq!(rows[0]["id_produk"], "007");
    assert_eq!(rows[0]["jumlah"], "0012");
    assert_eq!(rows[0]["harga"], 0.5);
    assert_eq!(rows[1]["id_produk"], 7.0);
    assert_eq!(rows[1]["harga"], 0.0);

    let conn = base_conn();
    let dir = tempdir().unwrap();
    let path = write(
        &dir.path().join("kode.csv"),
        "tanggal,id_produk,produk,jumlah,harga\n\
         2025-01-15,007,Kopi Bubuk,1,4000\n\
         2025-01-15,7,Kopi Sachet,2,1500\n",
    );
    import(&conn, &["transactions", "--path", &path]).unwrap();
    let kv = SqliteStore::new(&conn);
    let products = product_report(&store::transactions(&kv).load().unwrap());
    let ids: Vec<&str> = products.iter().map(|p| p.product_id.as_str()).collect();
    assert_eq!(ids, vec!["007", "7"]);
}
