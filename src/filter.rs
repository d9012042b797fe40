// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::borrow::Cow;
use tracing::debug;

use crate::models::{DateRange, Dated, FishStock, StockDirection, StockMovement};

impl DateRange {
    /// Day-granularity, both ends inclusive.
    pub fn contains<T: Dated>(&self, record: &T) -> bool {
        let day = record.date().date();
        self.start_date.is_none_or(|start| day >= start)
            && self.end_date.is_none_or(|end| day <= end)
    }
}

/// Records whose calendar day falls inside `range`. An unbounded range hands
/// back the input slice untouched.
pub fn filter_by_date<'a, T: Dated + Clone>(records: &'a [T], range: &DateRange) -> Cow<'a, [T]> {
    if range.is_unbounded() {
        return Cow::Borrowed(records);
    }
    let kept: Vec<T> = records
        .iter()
        .filter(|r| range.contains(*r))
        .cloned()
        .collect();
    debug!(total = records.len(), kept = kept.len(), ?range, "date filter applied");
    Cow::Owned(kept)
}

pub trait Directed {
    fn direction(&self) -> StockDirection;
}

impl Directed for StockMovement {
    fn direction(&self) -> StockDirection {
        self.r#type
    }
}

impl Directed for FishStock {
    fn direction(&self) -> StockDirection {
        self.r#type
    }
}

/// `None` keeps both directions.
pub fn filter_by_direction<'a, T: Directed + Clone>(
    records: &'a [T],
    direction: Option<StockDirection>,
) -> Cow<'a, [T]> {
    match direction {
        None => Cow::Borrowed(records),
        Some(d) => Cow::Owned(
            records
                .iter()
                .filter(|r| r.direction() == d)
                .cloned()
                .collect(),
        ),
    }
}
