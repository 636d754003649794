//! Calendar-year cashflow buckets.

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::normalize::{FlowKind, NormalizedFlow};

/// Capital flows for one calendar year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearBucket {
    /// Four-digit calendar year.
    pub year: i32,
    /// Contributions as a positive magnitude.
    pub contributions: Decimal,
    /// Distributions.
    pub distributions: Decimal,
    /// distributions - contributions.
    pub net_cash: Decimal,
}

/// Buckets capital flows by calendar year, ascending.
///
/// `Other` flows are ignored; a year with only `Other` flows has no bucket.
pub fn bucket_by_year(flows: &[NormalizedFlow]) -> Vec<YearBucket> {
    let mut by_year: BTreeMap<i32, YearBucket> = BTreeMap::new();

    for flow in flows.iter().filter(|f| f.kind.is_capital()) {
        let year = flow.date.year();
        let bucket = by_year.entry(year).or_insert_with(|| YearBucket {
            year,
            ..YearBucket::default()
        });

        match flow.kind {
            FlowKind::Contribution => {
                let magnitude = flow.amount.abs();
                bucket.contributions = bucket.contributions.saturating_add(magnitude);
                bucket.net_cash = bucket.net_cash.saturating_sub(magnitude);
            }
            FlowKind::Distribution => {
                bucket.distributions = bucket.distributions.saturating_add(flow.amount);
                bucket.net_cash = bucket.net_cash.saturating_add(flow.amount);
            }
            FlowKind::Other => {}
        }
    }

    by_year.into_values().collect()
}
