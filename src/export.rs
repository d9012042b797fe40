// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Row-major, column-labelled tables built from report views, and the sinks
//! that write them out.

use anyhow::{Result, anyhow};
use serde::Serialize;
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;

use crate::format::{format_currency, format_date, format_number};
use crate::models::{
    DailyReport, FishStock, FishStockSummary, FishType, Period, PeriodReport, ProductReport, StockMovement,
    StockSummary,
};
use crate::utils::pretty_table;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableData {
    pub title: String,
    pub summary: Vec<(String, String)>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    fn new(title: &str, headers: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            summary: Vec::new(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    fn stat(mut self, label: &str, value: String) -> Self {
        self.summary.push((label.to_string(), value));
        self
    }
}

pub trait TableSink {
    fn render_table(&mut self, table: &TableData) -> Result<()>;
}

/// Box-drawn table on any writer, summary lines first.
pub struct TerminalSink<W: Write> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> TableSink for TerminalSink<W> {
    fn render_table(&mut self, table: &TableData) -> Result<()> {
        writeln!(self.out, "{}", table.title)?;
        for (label, value) in &table.summary {
            writeln!(self.out, "{}: {}", label, value)?;
        }
        let headers: Vec<&str> = table.headers.iter().map(|h| h.as_str()).collect();
        writeln!(self.out, "{}", pretty_table(&headers, table.rows.clone()))?;
        Ok(())
    }
}

/// Title, summary pairs, a blank line, then the header and data rows, the
/// same layout the spreadsheet export used.
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TableSink for CsvSink {
    fn render_table(&mut self, table: &TableData) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;
        wtr.write_record([table.title.as_str()])?;
        for (label, value) in &table.summary {
            wtr.write_record([label.as_str(), value.as_str()])?;
        }
        wtr.write_record([""])?;
        wtr.write_record(&table.headers)?;
        for row in &table.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Rows as objects keyed by column header.
pub struct JsonSink {
    path: PathBuf,
}

impl JsonSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TableSink for JsonSink {
    fn render_table(&mut self, table: &TableData) -> Result<()> {
        let summary: serde_json::Map<String, serde_json::Value> = table
            .summary
            .iter()
            .map(|(k, v)| (k.clone(), json!(v)))
            .collect();
        let rows: Vec<serde_json::Value> = table
            .rows
            .iter()
            .map(|r| {
                let obj: serde_json::Map<String, serde_json::Value> = table
                    .headers
                    .iter()
                    .zip(r.iter())
                    .map(|(h, c)| (h.clone(), json!(c)))
                    .collect();
                serde_json::Value::Object(obj)
            })
            .collect();
        let doc = json!({ "title": table.title, "summary": summary, "rows": rows });
        std::fs::write(&self.path, serde_json::to_string_pretty(&doc)?)?;
        Ok(())
    }
}

pub fn sink_for(format: &str, out: &str) -> Result<Box<dyn TableSink>> {
    match format.to_lowercase().as_str() {
        "csv" => Ok(Box::new(CsvSink::new(out))),
        "json" => Ok(Box::new(JsonSink::new(out))),
        other => Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    }
}

pub fn daily_table(reports: &[DailyReport]) -> TableData {
    let total: f64 = reports.iter().map(|r| r.total_sales).sum();
    let count: usize = reports.iter().map(|r| r.transaction_count).sum();
    let mut t = TableData::new(
        "Laporan Harian",
        &["Tanggal", "Jumlah Transaksi", "Total Penjualan"],
    )
    .stat("Total Penjualan", format_currency(total))
    .stat("Jumlah Transaksi", count.to_string());
    for r in reports {
        let label = chrono::NaiveDate::parse_from_str(&r.date, "%Y-%m-%d")
            .map(format_date)
            .unwrap_or_else(|_| r.date.clone());
        t.rows.push(vec![
            label,
            r.transaction_count.to_string(),
            format_currency(r.total_sales),
        ]);
    }
    t
}

fn products_into(mut t: TableData, products: &[ProductReport]) -> TableData {
    for (i, p) in products.iter().enumerate() {
        t.rows.push(vec![
            (i + 1).to_string(),
            p.product_id.clone(),
            p.product_name.clone(),
            p.category.clone(),
            p.total_quantity.to_string(),
            p.transaction_count.to_string(),
            format_currency(p.total_revenue),
        ]);
    }
    t
}

const PRODUCT_HEADERS: &[&str] = &[
    "No",
    "ID Produk",
    "Produk",
    "Kategori",
    "Qty Terjual",
    "Transaksi",
    "Total Pendapatan",
];

pub fn product_table(products: &[ProductReport]) -> TableData {
    let revenue: f64 = products.iter().map(|p| p.total_revenue).sum();
    let t = TableData::new("Laporan Per Produk", PRODUCT_HEADERS)
        .stat("Jumlah Produk", products.len().to_string())
        .stat("Total Pendapatan", format_currency(revenue));
    products_into(t, products)
}

pub fn top_table(products: &[ProductReport], limit: usize) -> TableData {
    let t = TableData::new(&format!("Top {} Produk Terlaris", limit), PRODUCT_HEADERS);
    products_into(t, products)
}

pub fn period_table(period: Period, report: &PeriodReport) -> TableData {
    let mut t = TableData::new(
        period.title(),
        &["Tanggal", "ID Transaksi", "Produk", "Kategori", "Qty", "Harga", "Total"],
    )
    .stat("Total Penjualan", format_currency(report.total_sales))
    .stat("Jumlah Transaksi", report.transaction_count.to_string())
    .stat(
        "Rata-rata Transaksi",
        format_currency(report.average_transaction),
    );
    for tx in &report.transactions {
        t.rows.push(vec![
            format_date(tx.date.date()),
            tx.id.clone(),
            tx.product_name.clone(),
            tx.category.clone(),
            tx.quantity.to_string(),
            format_currency(tx.price),
            format_currency(tx.total),
        ]);
    }
    t
}

pub fn stock_table(movements: &[StockMovement], summary: &StockSummary) -> TableData {
    let mut t = TableData::new(
        "Laporan Stok Masuk & Keluar",
        &["Tanggal", "Produk", "Tipe", "Quantity", "Keterangan", "Referensi"],
    )
    .stat("Total Stok Masuk", format!("{} unit", summary.total_in))
    .stat("Total Stok Keluar", format!("{} unit", summary.total_out))
    .stat("Net Change", format!("{} unit", summary.net_change));
    for m in movements {
        t.rows.push(vec![
            format_date(m.date.date()),
            m.product_name.clone(),
            m.r#type.label().to_string(),
            m.quantity.to_string(),
            m.reason.clone(),
            m.reference.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    t
}

pub fn fish_table(stocks: &[FishStock], summary: &FishStockSummary) -> TableData {
    let name = match summary.fish_type {
        FishType::Lele => "Lele",
        FishType::Nila => "Nila",
    };
    let mut t = TableData::new(
        &format!("Laporan Stok {}", name),
        &[
            "Tanggal",
            "Tipe",
            "Berat (kg)",
            "Jumlah Ekor",
            "Berat/Ekor (g)",
            "Harga/kg",
            "Total",
            "Keterangan",
        ],
    )
    .stat("Stok Masuk", format!("{} kg", format_number(summary.total_in)))
    .stat("Stok Keluar", format!("{} kg", format_number(summary.total_out)))
    .stat(
        "Stok Saat Ini",
        format!("{} kg", format_number(summary.current_stock)),
    )
    .stat("Total Pembelian", format_currency(summary.purchase))
    .stat("Total Penjualan", format_currency(summary.revenue))
    .stat("Keuntungan", format_currency(summary.profit));
    for s in stocks {
        t.rows.push(vec![
            format_date(s.date.date()),
            s.r#type.label().to_string(),
            format_number(s.quantity),
            s.total_fish
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
            s.weight
                .map(format_number)
                .unwrap_or_else(|| "-".to_string()),
            format_currency(s.price.unwrap_or(0.0)),
            format_currency(s.total.unwrap_or(0.0)),
            s.reason.clone(),
        ]);
    }
    t
}
