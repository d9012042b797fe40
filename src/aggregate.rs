// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Report views over an already date-filtered record list. Only `sale`
//! transactions count towards sales figures.

use chrono::{Duration, Local, NaiveDateTime};
use std::collections::{BTreeMap, HashMap};

use crate::models::{
    DailyReport, FishStock, FishStockSummary, FishType, Period, PeriodReport, ProductReport,
    ReportSummary, StockDirection, StockMovement, StockSummary, Transaction, TransactionType,
};

fn sales(records: &[Transaction]) -> impl Iterator<Item = &Transaction> {
    records.iter().filter(|t| t.r#type == TransactionType::Sale)
}

fn average(total: f64, count: usize) -> f64 {
    if count > 0 { total / count as f64 } else { 0.0 }
}

/// One entry per calendar day, most recent day first.
pub fn daily_report(records: &[Transaction]) -> Vec<DailyReport> {
    let mut days: BTreeMap<chrono::NaiveDate, DailyReport> = BTreeMap::new();
    for t in sales(records) {
        let day = t.date.date();
        let entry = days.entry(day).or_insert_with(|| DailyReport {
            date: day.format("%Y-%m-%d").to_string(),
            total_sales: 0.0,
            transaction_count: 0,
            transactions: Vec::new(),
        });
        entry.total_sales += t.total;
        entry.transaction_count += 1;
        entry.transactions.push(t.clone());
    }
    days.into_values().rev().collect()
}

/// Sales grouped by product id, highest revenue first. Name and category come
/// from the first record seen for each id.
pub fn product_report(records: &[Transaction]) -> Vec<ProductReport> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut products: Vec<ProductReport> = Vec::new();
    for t in sales(records) {
        let slot = *index.entry(t.product_id.as_str()).or_insert_with(|| {
            products.push(ProductReport {
                product_id: t.product_id.clone(),
                product_name: t.product_name.clone(),
                category: t.category.clone(),
                total_quantity: 0,
                total_revenue: 0.0,
                transaction_count: 0,
            });
            products.len() - 1
        });
        let p = &mut products[slot];
        p.total_quantity = p.total_quantity.saturating_add(t.quantity);
        p.total_revenue += t.total;
        p.transaction_count += 1;
    }
    // Stable: equal revenue keeps first-seen order.
    products.sort_by(|a, b| b.total_revenue.total_cmp(&a.total_revenue));
    products
}

pub fn top_products(records: &[Transaction], limit: usize) -> Vec<ProductReport> {
    let mut products = product_report(records);
    products.truncate(limit);
    products
}

/// Sales dated within the trailing window of `period` ending at `now`.
pub fn period_report(records: &[Transaction], period: Period, now: NaiveDateTime) -> PeriodReport {
    let cutoff = now - Duration::days(period.days());
    let transactions: Vec<Transaction> = sales(records)
        .filter(|t| t.date >= cutoff)
        .cloned()
        .collect();
    let total_sales: f64 = transactions.iter().map(|t| t.total).sum();
    let transaction_count = transactions.len();
    PeriodReport {
        total_sales,
        transaction_count,
        average_transaction: average(total_sales, transaction_count),
        transactions,
    }
}

pub fn weekly_report(records: &[Transaction]) -> PeriodReport {
    period_report(records, Period::Weekly, Local::now().naive_local())
}

pub fn monthly_report(records: &[Transaction]) -> PeriodReport {
    period_report(records, Period::Monthly, Local::now().naive_local())
}

pub fn report_summary(records: &[Transaction], limit: usize) -> ReportSummary {
    let (total_sales, total_transactions) =
        sales(records).fold((0.0, 0usize), |(sum, n), t| (sum + t.total, n + 1));
    ReportSummary {
        total_sales,
        total_transactions,
        average_transaction: average(total_sales, total_transactions),
        top_products: top_products(records, limit),
    }
}

pub fn stock_summary(movements: &[StockMovement]) -> StockSummary {
    let mut total_in: i64 = 0;
    let mut total_out: i64 = 0;
    for m in movements {
        match m.r#type {
            StockDirection::In => total_in = total_in.saturating_add(m.quantity),
            StockDirection::Out => total_out = total_out.saturating_add(m.quantity),
        }
    }
    StockSummary {
        total_in,
        total_out,
        net_change: total_in.saturating_sub(total_out),
    }
}

/// Purchases are `in` totals, revenue is `out` totals; missing totals count as 0.
pub fn fish_stock_summary(fish_type: FishType, stocks: &[FishStock]) -> FishStockSummary {
    let mut total_in = 0.0;
    let mut total_out = 0.0;
    let mut purchase = 0.0;
    let mut revenue = 0.0;
    for s in stocks {
        let amount = s.total.unwrap_or(0.0);
        match s.r#type {
            StockDirection::In => {
                total_in += s.quantity;
                purchase += amount;
            }
            StockDirection::Out => {
                total_out += s.quantity;
                revenue += amount;
            }
        }
    }
    FishStockSummary {
        fish_type,
        total_in,
        total_out,
        current_stock: total_in - total_out,
        purchase,
        revenue,
        profit: revenue - purchase,
        average_price: if total_out > 0.0 { revenue / total_out } else { 0.0 },
    }
}
