//! Per-fund KPIs.
//!
//! Combines a fund's range-filtered flows with its latest valuation into
//! paid-in multiples, profit, IRR and NOI variance.

use chrono::NaiveDate;
use fundlens_core::{FinancialStatement, Fund, FundId};
use fundlens_math::xirr::{xirr, CashflowPoint};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::normalize::{FlowKind, NormalizedFlow};
use crate::valuation::{NAV, NOI_ACTUAL, NOI_BUDGET};

/// Paid-in multiples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Multiples {
    /// (NAV + distributions) / contributions.
    pub tvpi: Option<f64>,
    /// Distributions / contributions.
    pub dpi: Option<f64>,
    /// NAV / contributions.
    pub rvpi: Option<f64>,
}

/// Computes paid-in multiples. All are `None` unless `contributions > 0`;
/// TVPI and RVPI additionally need a NAV.
pub fn multiples(contributions: Decimal, distributions: Decimal, nav: Option<Decimal>) -> Multiples {
    if contributions <= Decimal::ZERO {
        return Multiples::default();
    }
    let ratio = |numerator: Decimal| {
        numerator
            .checked_div(contributions)
            .and_then(|r| r.to_f64())
    };
    Multiples {
        tvpi: nav.and_then(|nav| nav.checked_add(distributions)).and_then(ratio),
        dpi: ratio(distributions),
        rvpi: nav.and_then(ratio),
    }
}

/// KPIs for one fund over one date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundKpi {
    /// Fund id.
    pub fund_id: FundId,
    /// Fund name, when the fund master record has one.
    pub name: Option<String>,
    /// Fund-level sector.
    pub sector: Option<String>,
    /// Fund-level region.
    pub region: Option<String>,
    /// Total contributions as a positive magnitude.
    pub contributions: Decimal,
    /// Total distributions.
    pub distributions: Decimal,
    /// Ending NAV, if any alias or the fallback resolved.
    pub ending_nav: Option<Decimal>,
    /// distributions + NAV - contributions.
    pub profit: Option<Decimal>,
    /// Total value to paid-in.
    pub tvpi: Option<f64>,
    /// Distributions to paid-in.
    pub dpi: Option<f64>,
    /// Residual value to paid-in.
    pub rvpi: Option<f64>,
    /// Annualized money-weighted return.
    pub irr: Option<f64>,
    /// Actual net operating income.
    pub noi_actual: Option<Decimal>,
    /// Budgeted net operating income.
    pub noi_budget: Option<Decimal>,
    /// actual - budget.
    pub noi_variance: Option<Decimal>,
    /// (actual - budget) / |budget| * 100.
    pub noi_variance_pct: Option<f64>,
    /// Committed capital across the investor's accounts.
    pub commitment: Option<Decimal>,
    /// Commitment not yet called, floored at zero.
    pub unfunded: Option<Decimal>,
    /// Earliest flow date in range.
    pub first_flow_date: Option<NaiveDate>,
    /// Latest flow date in range.
    pub last_flow_date: Option<NaiveDate>,
    /// Number of flows in range, including unclassified ones.
    pub flow_count: usize,
}

impl FundKpi {
    /// Copies display fields from the fund master record.
    #[must_use]
    pub fn with_fund(mut self, fund: &Fund) -> Self {
        self.name.clone_from(&fund.name);
        self.sector.clone_from(&fund.sector);
        self.region.clone_from(&fund.region);
        self
    }

    /// Sets the commitment and derives the unfunded amount.
    #[must_use]
    pub fn with_commitment(mut self, commitment: Option<Decimal>) -> Self {
        self.commitment = commitment;
        self.unfunded = commitment.map(|c| c.saturating_sub(self.contributions).max(Decimal::ZERO));
        self
    }
}

/// Computes a fund's KPIs.
///
/// `flows` must already be restricted to the fund, the investor's accounts and
/// the requested range. NAV resolves through the statement's aliases first and
/// `fallback_nav` second. When NAV resolves it is added to the IRR series as a
/// terminal inflow dated `terminal_date`.
pub fn compute_fund_kpi(
    fund_id: &FundId,
    flows: &[NormalizedFlow],
    valuation: Option<&FinancialStatement>,
    fallback_nav: Option<Decimal>,
    terminal_date: NaiveDate,
) -> FundKpi {
    let (contributions, distributions) = capital_totals(flows);

    let ending_nav = NAV.resolve_in(valuation).or(fallback_nav);
    let profit = ending_nav.and_then(|nav| profit(contributions, distributions, nav));
    let Multiples { tvpi, dpi, rvpi } = multiples(contributions, distributions, ending_nav);

    let irr = xirr(&irr_series(flows, ending_nav, terminal_date));

    let noi_actual = NOI_ACTUAL.resolve_in(valuation);
    let noi_budget = NOI_BUDGET.resolve_in(valuation);
    let noi_variance = match (noi_actual, noi_budget) {
        (Some(actual), Some(budget)) => actual.checked_sub(budget),
        _ => None,
    };
    let noi_variance_pct = match (noi_variance, noi_budget) {
        (Some(variance), Some(budget)) if !budget.is_zero() => variance
            .checked_div(budget.abs())
            .and_then(|r| r.to_f64())
            .map(|r| r * 100.0),
        _ => None,
    };

    FundKpi {
        fund_id: fund_id.clone(),
        name: None,
        sector: None,
        region: None,
        contributions,
        distributions,
        ending_nav,
        profit,
        tvpi,
        dpi,
        rvpi,
        irr,
        noi_actual,
        noi_budget,
        noi_variance,
        noi_variance_pct,
        commitment: None,
        unfunded: None,
        first_flow_date: flows.iter().map(|f| f.date).min(),
        last_flow_date: flows.iter().map(|f| f.date).max(),
        flow_count: flows.len(),
    }
}

/// distributions + NAV - contributions, or `None` if it leaves the `Decimal` range.
pub(crate) fn profit(
    contributions: Decimal,
    distributions: Decimal,
    nav: Decimal,
) -> Option<Decimal> {
    distributions.checked_add(nav)?.checked_sub(contributions)
}

/// Sums contribution magnitudes and distribution amounts, ignoring `Other`.
/// Sums saturate at the `Decimal` range.
pub(crate) fn capital_totals(flows: &[NormalizedFlow]) -> (Decimal, Decimal) {
    flows.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(contrib, dist), flow| match flow.kind {
            FlowKind::Contribution => (contrib.saturating_add(flow.amount.abs()), dist),
            FlowKind::Distribution => (contrib, dist.saturating_add(flow.amount)),
            FlowKind::Other => (contrib, dist),
        },
    )
}

/// Builds the dated series XIRR runs on: every capital flow, plus the NAV as a
/// terminal inflow. The sort is stable, so same-day flows keep input order.
pub(crate) fn irr_series(
    flows: &[NormalizedFlow],
    nav: Option<Decimal>,
    terminal_date: NaiveDate,
) -> Vec<CashflowPoint> {
    let mut series: Vec<CashflowPoint> = flows
        .iter()
        .filter(|f| f.kind.is_capital())
        .map(|f| CashflowPoint::new(f.date, f.amount.to_f64().unwrap_or(0.0)))
        .collect();

    if let Some(nav) = nav {
        series.push(CashflowPoint::new(terminal_date, nav.to_f64().unwrap_or(0.0)));
    }

    series.sort_by_key(|p| p.date);
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fundlens_core::{AccountId, MetricsBag};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn flow(d: NaiveDate, amount: Decimal, kind: FlowKind) -> NormalizedFlow {
        NormalizedFlow {
            fund_id: FundId::new("F1"),
            account_id: AccountId::new("A1"),
            date: d,
            amount,
            kind,
            label: None,
        }
    }

    fn statement(metrics: MetricsBag) -> FinancialStatement {
        FinancialStatement::new("F1", date(2024, 1, 1), metrics)
    }

    #[test]
    fn test_ratio_identities() {
        let flows = vec![
            flow(date(2023, 1, 1), dec!(-100000), FlowKind::Contribution),
            flow(date(2023, 7, 1), dec!(10000), FlowKind::Distribution),
        ];
        let stmt = statement(MetricsBag::new().with("nav", dec!(120000)));

        let kpi = compute_fund_kpi(&FundId::new("F1"), &flows, Some(&stmt), None, date(2024, 1, 1));

        assert_eq!(kpi.contributions, dec!(100000));
        assert_eq!(kpi.distributions, dec!(10000));
        assert_eq!(kpi.profit, Some(dec!(30000)));
        assert_relative_eq!(kpi.tvpi.unwrap(), 1.3, epsilon = 0.05);
        assert_relative_eq!(kpi.dpi.unwrap(), 0.1, epsilon = 0.05);
        assert_relative_eq!(kpi.rvpi.unwrap(), 1.2, epsilon = 0.05);
        assert!(kpi.irr.unwrap() > 0.0);
    }

    #[test]
    fn test_fallback_nav() {
        let flows = vec![flow(date(2023, 1, 1), dec!(-100), FlowKind::Contribution)];
        let stmt = statement(MetricsBag::new().with("something_else", dec!(1)));

        let kpi = compute_fund_kpi(
            &FundId::new("F1"),
            &flows,
            Some(&stmt),
            Some(dec!(150)),
            date(2024, 1, 1),
        );

        assert_eq!(kpi.ending_nav, Some(dec!(150)));
        assert_relative_eq!(kpi.rvpi.unwrap(), 1.5);
    }

    #[test]
    fn test_unresolved_nav_nulls_dependent_fields() {
        let flows = vec![
            flow(date(2023, 1, 1), dec!(-100), FlowKind::Contribution),
            flow(date(2023, 6, 1), dec!(20), FlowKind::Distribution),
        ];

        let kpi = compute_fund_kpi(&FundId::new("F1"), &flows, None, None, date(2024, 1, 1));

        assert!(kpi.ending_nav.is_none());
        assert!(kpi.profit.is_none());
        assert!(kpi.tvpi.is_none());
        assert!(kpi.rvpi.is_none());
        assert_relative_eq!(kpi.dpi.unwrap(), 0.2);
    }

    #[test]
    fn test_no_contributions_no_ratios() {
        let flows = vec![flow(date(2023, 6, 1), dec!(20), FlowKind::Distribution)];
        let stmt = statement(MetricsBag::new().with("nav", dec!(50)));

        let kpi = compute_fund_kpi(&FundId::new("F1"), &flows, Some(&stmt), None, date(2024, 1, 1));

        assert!(kpi.tvpi.is_none() && kpi.dpi.is_none() && kpi.rvpi.is_none());
        assert!(kpi.irr.is_none());
    }

    #[test]
    fn test_other_flows_excluded_from_totals_and_irr() {
        let flows = vec![
            flow(date(2023, 1, 1), dec!(-100000), FlowKind::Contribution),
            flow(date(2023, 3, 1), dec!(-999999), FlowKind::Other),
        ];
        let stmt = statement(MetricsBag::new().with("nav", dec!(120000)));

        let kpi = compute_fund_kpi(&FundId::new("F1"), &flows, Some(&stmt), None, date(2024, 1, 1));

        assert_eq!(kpi.contributions, dec!(100000));
        assert_eq!(kpi.flow_count, 2);
        assert_relative_eq!(kpi.irr.unwrap(), 0.2, epsilon = 1e-6);
    }

    #[test]
    fn test_noi_variance() {
        let stmt = statement(
            MetricsBag::new()
                .with("noiActual", "1,100")
                .with("budget_noi", dec!(1000)),
        );

        let kpi = compute_fund_kpi(&FundId::new("F1"), &[], Some(&stmt), None, date(2024, 1, 1));

        assert_eq!(kpi.noi_variance, Some(dec!(100)));
        assert_relative_eq!(kpi.noi_variance_pct.unwrap(), 10.0);
    }

    #[test]
    fn test_noi_variance_pct_null_on_zero_budget() {
        let stmt = statement(
            MetricsBag::new()
                .with("noi", dec!(500))
                .with("noi_budget", dec!(0)),
        );

        let kpi = compute_fund_kpi(&FundId::new("F1"), &[], Some(&stmt), None, date(2024, 1, 1));

        assert_eq!(kpi.noi_variance, Some(dec!(500)));
        assert!(kpi.noi_variance_pct.is_none());
    }

    #[test]
    fn test_negative_budget_uses_magnitude() {
        let stmt = statement(
            MetricsBag::new()
                .with("noi_actual", dec!(-50))
                .with("noi_budget", dec!(-100)),
        );

        let kpi = compute_fund_kpi(&FundId::new("F1"), &[], Some(&stmt), None, date(2024, 1, 1));

        assert_relative_eq!(kpi.noi_variance_pct.unwrap(), 50.0);
    }

    #[test]
    fn test_irr_series_stable_sort() {
        let d = date(2023, 1, 1);
        let flows = vec![
            flow(date(2023, 5, 1), dec!(5), FlowKind::Distribution),
            flow(d, dec!(-1), FlowKind::Contribution),
            flow(d, dec!(-2), FlowKind::Contribution),
        ];

        let series = irr_series(&flows, Some(dec!(10)), date(2024, 1, 1));

        let amounts: Vec<f64> = series.iter().map(|p| p.amount).collect();
        assert_eq!(amounts, vec![-1.0, -2.0, 5.0, 10.0]);
    }

    #[test]
    fn test_unfunded_floored() {
        let kpi = compute_fund_kpi(
            &FundId::new("F1"),
            &[flow(date(2023, 1, 1), dec!(-120), FlowKind::Contribution)],
            None,
            None,
            date(2024, 1, 1),
        );

        assert_eq!(kpi.clone().with_commitment(Some(dec!(100))).unfunded, Some(dec!(0)));
        assert_eq!(kpi.with_commitment(Some(dec!(200))).unfunded, Some(dec!(80)));
    }
}
