//! Sector and region breakdowns.
//!
//! Each fund's bucket (NAV, contributions, distributions) is attributed to the
//! labels of its assets, split evenly so breakdown totals reconcile with
//! portfolio totals. Labels fall back from asset to fund to `"Unspecified"`.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use fundlens_core::{Asset, Fund, FundId};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::kpi::FundKpi;

/// Label used when neither the asset nor the fund carries a value.
pub const UNSPECIFIED: &str = "Unspecified";

/// One row of a sector or region breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownRow {
    /// Sector or region label.
    pub label: String,
    /// Attributed ending NAV.
    pub nav: Decimal,
    /// Attributed contributions.
    pub contributions: Decimal,
    /// Attributed distributions.
    pub distributions: Decimal,
    /// Number of distinct funds contributing to this row.
    pub fund_count: usize,
    /// NAV weight as percentage of total (0-100).
    pub weight_pct: f64,
}

/// Breakdown axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dimension {
    Sector,
    Region,
}

impl Dimension {
    fn asset_label(self, asset: &Asset) -> Option<&str> {
        match self {
            Dimension::Sector => non_blank(asset.sector.as_deref()),
            Dimension::Region => {
                non_blank(asset.country.as_deref()).or_else(|| non_blank(asset.region.as_deref()))
            }
        }
    }

    fn fund_label(self, fund: Option<&Fund>) -> Option<&str> {
        let fund = fund?;
        match self {
            Dimension::Sector => {
                non_blank(fund.sector.as_deref()).or_else(|| non_blank(fund.strategy.as_deref()))
            }
            Dimension::Region => non_blank(fund.region.as_deref()),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Breakdown of fund KPIs by asset sector, falling back to fund sector and strategy.
pub fn breakdown_by_sector(kpis: &[FundKpi], funds: &[Fund], assets: &[Asset]) -> Vec<BreakdownRow> {
    breakdown(kpis, funds, assets, Dimension::Sector)
}

/// Breakdown of fund KPIs by asset country or region, falling back to fund region.
pub fn breakdown_by_region(kpis: &[FundKpi], funds: &[Fund], assets: &[Asset]) -> Vec<BreakdownRow> {
    breakdown(kpis, funds, assets, Dimension::Region)
}

#[derive(Default)]
struct Accumulator {
    nav: Decimal,
    contributions: Decimal,
    distributions: Decimal,
    funds: BTreeSet<FundId>,
}

fn breakdown(
    kpis: &[FundKpi],
    funds: &[Fund],
    assets: &[Asset],
    dimension: Dimension,
) -> Vec<BreakdownRow> {
    let funds_by_id: HashMap<&FundId, &Fund> = funds.iter().map(|f| (&f.id, f)).collect();
    let mut assets_by_fund: HashMap<&FundId, Vec<&Asset>> = HashMap::new();
    for asset in assets {
        assets_by_fund.entry(&asset.fund_id).or_default().push(asset);
    }

    let mut rows: BTreeMap<String, Accumulator> = BTreeMap::new();

    for kpi in kpis {
        let fund = funds_by_id.get(&kpi.fund_id).copied();
        let fund_label = dimension.fund_label(fund).unwrap_or(UNSPECIFIED);
        let nav = kpi.ending_nav.unwrap_or_default();

        let labels: Vec<&str> = match assets_by_fund.get(&kpi.fund_id) {
            Some(fund_assets) if !fund_assets.is_empty() => fund_assets
                .iter()
                .map(|a| dimension.asset_label(a).unwrap_or(fund_label))
                .collect(),
            _ => vec![fund_label],
        };

        let parts = Decimal::from(labels.len());
        for label in labels {
            let acc = rows.entry(label.to_string()).or_default();
            acc.nav = acc.nav.saturating_add(nav / parts);
            acc.contributions = acc.contributions.saturating_add(kpi.contributions / parts);
            acc.distributions = acc.distributions.saturating_add(kpi.distributions / parts);
            acc.funds.insert(kpi.fund_id.clone());
        }
    }

    let total_nav = rows
        .values()
        .fold(Decimal::ZERO, |total, acc| total.saturating_add(acc.nav));

    let mut result: Vec<BreakdownRow> = rows
        .into_iter()
        .map(|(label, acc)| BreakdownRow {
            weight_pct: weight_pct(acc.nav, total_nav),
            label,
            nav: acc.nav,
            contributions: acc.contributions,
            distributions: acc.distributions,
            fund_count: acc.funds.len(),
        })
        .collect();

    // BTreeMap order already gives label ascending; the sort is stable.
    result.sort_by(|a, b| b.nav.cmp(&a.nav));
    result
}

fn weight_pct(value: Decimal, total: Decimal) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    value
        .checked_div(total)
        .and_then(|r| r.to_f64())
        .map_or(0.0, |r| r * 100.0)
}
