// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Sale,
    StockIn,
    StockOut,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransactionType::Sale => "sale",
            TransactionType::StockIn => "stock_in",
            TransactionType::StockOut => "stock_out",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockDirection {
    In,
    Out,
}

impl StockDirection {
    /// Accepts `in`/`out` and the Indonesian `masuk`/`keluar`, any case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "in" | "masuk" => Some(StockDirection::In),
            "out" | "keluar" => Some(StockDirection::Out),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockDirection::In => "Masuk",
            StockDirection::Out => "Keluar",
        }
    }
}

impl fmt::Display for StockDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockDirection::In => f.write_str("in"),
            StockDirection::Out => f.write_str("out"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FishType {
    Lele,
    Nila,
}

impl FishType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "lele" => Some(FishType::Lele),
            "nila" => Some(FishType::Nila),
            _ => None,
        }
    }
}

impl fmt::Display for FishType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FishType::Lele => f.write_str("lele"),
            FishType::Nila => f.write_str("nila"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDateTime,
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub quantity: i64,
    pub price: f64,
    pub total: f64,
    pub r#type: TransactionType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: String,
    pub date: NaiveDateTime,
    pub product_id: String,
    pub product_name: String,
    pub r#type: StockDirection,
    pub quantity: i64,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FishStock {
    pub id: String,
    pub date: NaiveDateTime,
    pub fish_type: FishType,
    pub r#type: StockDirection,
    pub quantity: f64, // kg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>, // grams per fish
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_fish: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>, // per kg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Inclusive calendar-day window. A missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn today(today: NaiveDate) -> Self {
        Self::new(Some(today), Some(today))
    }

    /// `days` back from `today`, both ends inclusive.
    pub fn last_days(days: i64, today: NaiveDate) -> Self {
        Self::new(Some(today - chrono::Duration::days(days)), Some(today))
    }

    pub fn is_unbounded(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub date: String, // YYYY-MM-DD
    pub total_sales: f64,
    pub transaction_count: usize,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReport {
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub total_quantity: i64,
    pub total_revenue: f64,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Weekly,
    Monthly,
}

impl Period {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" | "mingguan" => Some(Period::Weekly),
            "monthly" | "month" | "bulanan" => Some(Period::Monthly),
            _ => None,
        }
    }

    pub fn days(&self) -> i64 {
        match self {
            Period::Weekly => 7,
            Period::Monthly => 30,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Period::Weekly => "Laporan Mingguan",
            Period::Monthly => "Laporan Bulanan",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Weekly => f.write_str("weekly"),
            Period::Monthly => f.write_str("monthly"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub total_sales: f64,
    pub transaction_count: usize,
    pub average_transaction: f64,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_sales: f64,
    pub total_transactions: usize,
    pub average_transaction: f64,
    pub top_products: Vec<ProductReport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    pub total_in: i64,
    pub total_out: i64,
    pub net_change: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FishStockSummary {
    pub fish_type: FishType,
    pub total_in: f64,
    pub total_out: f64,
    pub current_stock: f64,
    pub purchase: f64,
    pub revenue: f64,
    pub profit: f64,
    pub average_price: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidRow {
    pub row: usize, // 1-based
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult<T> {
    pub valid: Vec<T>,
    pub invalid: Vec<InvalidRow>,
}

impl<T> Default for ValidationResult<T> {
    fn default() -> Self {
        Self {
            valid: Vec::new(),
            invalid: Vec::new(),
        }
    }
}

/// Anything carrying a record date; the date filter works over these.
pub trait Dated {
    fn date(&self) -> NaiveDateTime;
}

impl Dated for Transaction {
    fn date(&self) -> NaiveDateTime {
        self.date
    }
}

impl Dated for StockMovement {
    fn date(&self) -> NaiveDateTime {
        self.date
    }
}

impl Dated for FishStock {
    fn date(&self) -> NaiveDateTime {
        self.date
    }
}
