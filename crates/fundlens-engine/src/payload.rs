//! Snapshot payloads.

use fundlens_core::{Contact, DateRange, FundId, InvestorId};
use fundlens_portfolio::bucketing::{BreakdownRow, YearBucket};
use fundlens_portfolio::kpi::FundKpi;
use fundlens_portfolio::normalize::NormalizationWarnings;
use fundlens_portfolio::summary::{PortfolioInsights, PortfolioSummary, PortfolioTotals};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Who the snapshot belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorIdentity {
    /// Investor (contact) id.
    pub id: InvestorId,
    /// Contact name, when the upstream has one.
    pub name: Option<String>,
    /// Contact email, when the upstream has one.
    pub email: Option<String>,
}

impl InvestorIdentity {
    /// Identity from the contact record, or a bare id if none was found.
    pub fn from_contact(id: InvestorId, contact: Option<&Contact>) -> Self {
        Self {
            id,
            name: contact.and_then(|c| c.name.clone()),
            email: contact.and_then(|c| c.email.clone()),
        }
    }
}

/// One fund's row in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundRow {
    /// Fund id.
    pub fund_id: FundId,
    /// Fund name.
    pub name: Option<String>,
    /// Fund-level sector.
    pub sector: Option<String>,
    /// Fund-level region.
    pub region: Option<String>,
    /// Contributions in range.
    pub contributions: Decimal,
    /// Distributions in range.
    pub distributions: Decimal,
    /// Ending NAV.
    pub nav: Option<Decimal>,
    /// distributions + NAV - contributions.
    pub profit: Option<Decimal>,
    /// Total value to paid-in.
    pub tvpi: Option<f64>,
    /// Distributions to paid-in.
    pub dpi: Option<f64>,
    /// Residual value to paid-in.
    pub rvpi: Option<f64>,
    /// Fund IRR.
    pub irr: Option<f64>,
    /// NOI variance against budget, percent.
    pub noi_variance_pct: Option<f64>,
    /// Committed capital.
    pub commitment: Option<Decimal>,
    /// Uncalled commitment.
    pub unfunded: Option<Decimal>,
}

impl From<FundKpi> for FundRow {
    fn from(kpi: FundKpi) -> Self {
        Self {
            fund_id: kpi.fund_id,
            name: kpi.name,
            sector: kpi.sector,
            region: kpi.region,
            contributions: kpi.contributions,
            distributions: kpi.distributions,
            nav: kpi.ending_nav,
            profit: kpi.profit,
            tvpi: kpi.tvpi,
            dpi: kpi.dpi,
            rvpi: kpi.rvpi,
            irr: kpi.irr,
            noi_variance_pct: kpi.noi_variance_pct,
            commitment: kpi.commitment,
            unfunded: kpi.unfunded,
        }
    }
}

/// The client-facing view of a [`PortfolioSummary`].
///
/// Drops per-fund NOI detail and flow dates; adds the investor's identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotPayload {
    /// Investor identity.
    pub investor: InvestorIdentity,
    /// Effective range.
    pub range: DateRange,
    /// Base currency code.
    pub base_currency: String,
    /// Number of funds in scope.
    pub investments_count: usize,
    /// Portfolio totals.
    pub kpis: PortfolioTotals,
    /// Per-fund rows.
    pub funds: Vec<FundRow>,
    /// Year buckets.
    pub years: Vec<YearBucket>,
    /// Sector breakdown.
    pub sectors: Vec<BreakdownRow>,
    /// Country/region breakdown.
    pub regions: Vec<BreakdownRow>,
    /// Unmapped cashflow labels.
    pub warnings: NormalizationWarnings,
    /// Insights.
    pub insights: PortfolioInsights,
}

impl SnapshotPayload {
    /// Reduces a summary and attaches the investor identity.
    pub fn from_summary(summary: PortfolioSummary, investor: InvestorIdentity) -> Self {
        Self {
            investor,
            range: summary.range,
            base_currency: summary.base_currency,
            investments_count: summary.investments_count,
            kpis: summary.totals,
            funds: summary.funds.into_iter().map(FundRow::from).collect(),
            years: summary.years,
            sectors: summary.sectors,
            regions: summary.regions,
            warnings: summary.warnings,
            insights: summary.insights,
        }
    }
}
