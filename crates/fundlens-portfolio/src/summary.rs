//! Portfolio summary output types.

use fundlens_core::{DateRange, InvestorId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::bucketing::{BreakdownRow, YearBucket};
use crate::insights::RecentActivity;
use crate::kpi::{FundKpi, Multiples};
use crate::normalize::NormalizationWarnings;

/// Data note attached when the portfolio IRR could not be determined.
pub const IRR_UNAVAILABLE_NOTE: &str = "Cash-flow IRR unavailable for this range";

/// Portfolio-wide sums across every fund in scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTotals {
    /// Contributions as a positive magnitude.
    pub contributions: Decimal,
    /// Distributions.
    pub distributions: Decimal,
    /// Sum of resolved fund NAVs; `None` when no fund resolved one.
    pub nav: Option<Decimal>,
    /// distributions + NAV - contributions; `None` without a NAV.
    pub profit: Option<Decimal>,
    /// Total committed capital.
    pub commitment: Decimal,
    /// Total unfunded commitment.
    pub unfunded: Decimal,
    /// Total value to paid-in.
    pub tvpi: Option<f64>,
    /// Distributions to paid-in.
    pub dpi: Option<f64>,
    /// Residual value to paid-in.
    pub rvpi: Option<f64>,
}

impl PortfolioTotals {
    /// Zero sums with a zero NAV, for an investor with no accounts.
    pub fn zeroed() -> Self {
        Self {
            nav: Some(Decimal::ZERO),
            profit: Some(Decimal::ZERO),
            ..Self::default()
        }
    }

    /// Sums fund KPIs the way a single fund's KPIs are computed.
    ///
    /// NAV, profit, TVPI and RVPI stay `None` unless at least one fund resolved
    /// a NAV. Sums saturate at the `Decimal` range instead of overflowing.
    pub fn from_funds(funds: &[FundKpi]) -> Self {
        let mut totals = funds.iter().fold(Self::default(), |mut acc, kpi| {
            acc.contributions = acc.contributions.saturating_add(kpi.contributions);
            acc.distributions = acc.distributions.saturating_add(kpi.distributions);
            if let Some(nav) = kpi.ending_nav {
                acc.nav = Some(acc.nav.unwrap_or_default().saturating_add(nav));
            }
            acc.commitment = acc
                .commitment
                .saturating_add(kpi.commitment.unwrap_or_default());
            acc.unfunded = acc.unfunded.saturating_add(kpi.unfunded.unwrap_or_default());
            acc
        });

        totals.profit = totals
            .nav
            .and_then(|nav| crate::kpi::profit(totals.contributions, totals.distributions, nav));
        let Multiples { tvpi, dpi, rvpi } =
            crate::kpi::multiples(totals.contributions, totals.distributions, totals.nav);
        totals.tvpi = tvpi;
        totals.dpi = dpi;
        totals.rvpi = rvpi;
        totals
    }
}

/// Portfolio-level insights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioInsights {
    /// Portfolio XIRR across all funds.
    pub xirr: Option<f64>,
    /// Trailing 90-day activity.
    pub recent_activity: RecentActivity,
    /// Advisory notes for insights that could not be computed.
    pub data_notes: Vec<String>,
}

/// An investor's portfolio for one date range and base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Investor (contact) id.
    pub investor_id: InvestorId,
    /// Requested range after defaulting and swap-normalization.
    pub range: DateRange,
    /// Three-letter base currency code.
    pub base_currency: String,
    /// Number of funds in scope.
    pub investments_count: usize,
    /// Per-fund KPIs, ascending fund id.
    pub funds: Vec<FundKpi>,
    /// Portfolio totals.
    pub totals: PortfolioTotals,
    /// Capital flows per calendar year.
    pub years: Vec<YearBucket>,
    /// Sector breakdown.
    pub sectors: Vec<BreakdownRow>,
    /// Country/region breakdown.
    pub regions: Vec<BreakdownRow>,
    /// Unmapped cashflow labels.
    pub warnings: NormalizationWarnings,
    /// Portfolio insights.
    pub insights: PortfolioInsights,
}

impl PortfolioSummary {
    /// A zero-valued, fully-shaped summary for an investor with no accounts.
    pub fn empty(investor_id: InvestorId, range: DateRange, base_currency: impl Into<String>) -> Self {
        Self {
            investor_id,
            range,
            base_currency: base_currency.into(),
            investments_count: 0,
            funds: Vec::new(),
            totals: PortfolioTotals::zeroed(),
            years: Vec::new(),
            sectors: Vec::new(),
            regions: Vec::new(),
            warnings: NormalizationWarnings::default(),
            insights: PortfolioInsights {
                xirr: None,
                recent_activity: RecentActivity::empty(range),
                data_notes: Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_summary_shape() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );

        let summary = PortfolioSummary::empty(InvestorId::new(7), range, "USD");

        assert_eq!(summary.investments_count, 0);
        assert_eq!(summary.totals.contributions, dec!(0));
        assert_eq!(summary.totals.nav, Some(dec!(0)));
        assert!(summary.totals.tvpi.is_none());

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["investmentsCount"], 0);
        assert!(json["warnings"]["unmappedTypes"].as_array().unwrap().is_empty());
        assert!(json["insights"]["recentActivity"]["flows"].is_array());
    }
}
