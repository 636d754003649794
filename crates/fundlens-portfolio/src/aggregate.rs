//! Investor-level portfolio aggregation.

use std::collections::BTreeSet;

use fundlens_core::{
    AccountContact, AccountId, Asset, Commitment, DateRange, FinancialStatement, Fund, FundId,
    InvestorId, RawCashflow,
};
use fundlens_math::xirr::xirr;
use rust_decimal::Decimal;

use crate::bucketing::{breakdown_by_region, breakdown_by_sector, bucket_by_year};
use crate::insights::recent_activity;
use crate::kpi::{compute_fund_kpi, irr_series, FundKpi};
use crate::normalize::{normalize_cashflows, NormalizationWarnings, NormalizedFlow};
use crate::summary::{
    PortfolioInsights, PortfolioSummary, PortfolioTotals, IRR_UNAVAILABLE_NOTE,
};
use crate::valuation::latest_as_of;

/// Collaborator records an aggregation runs over.
///
/// Lists may contain records for other investors, duplicates, or records
/// outside the requested range; aggregation filters them.
#[derive(Debug, Clone, Default)]
pub struct PortfolioInputs {
    /// Account-to-contact (and optionally account-to-fund) mappings.
    pub account_contacts: Vec<AccountContact>,
    /// Commitments.
    pub commitments: Vec<Commitment>,
    /// Raw ledger cashflows.
    pub cashflows: Vec<RawCashflow>,
    /// Fund financial statements.
    pub statements: Vec<FinancialStatement>,
    /// Fund master records.
    pub funds: Vec<Fund>,
    /// Asset records.
    pub assets: Vec<Asset>,
}

impl PortfolioInputs {
    /// Distinct account ids mapped to `investor`.
    pub fn accounts_for(&self, investor: InvestorId) -> BTreeSet<AccountId> {
        self.account_contacts
            .iter()
            .filter(|m| m.contact_id == investor.value())
            .map(|m| m.account_id.clone())
            .collect()
    }

    /// Funds reachable from `accounts` through mappings, commitments or cashflows.
    pub fn funds_in_scope(&self, accounts: &BTreeSet<AccountId>) -> BTreeSet<FundId> {
        let mapped = self
            .account_contacts
            .iter()
            .filter(|m| accounts.contains(&m.account_id))
            .filter_map(|m| m.fund_id.clone());
        let committed = self
            .commitments
            .iter()
            .filter(|c| accounts.contains(&c.account_id))
            .map(|c| c.fund_id.clone());
        let traded = self
            .cashflows
            .iter()
            .filter(|c| accounts.contains(&c.account_id))
            .map(|c| c.fund_id.clone());

        mapped.chain(committed).chain(traded).collect()
    }

    fn commitment_sums(
        &self,
        fund_id: &FundId,
        accounts: &BTreeSet<AccountId>,
    ) -> (Option<Decimal>, Option<Decimal>) {
        let rows = self
            .commitments
            .iter()
            .filter(|c| &c.fund_id == fund_id && accounts.contains(&c.account_id));

        let mut amount = None;
        let mut market_value = None;
        for row in rows {
            if let Some(a) = row.amount {
                let sum = amount.get_or_insert(Decimal::ZERO);
                *sum = sum.saturating_add(a);
            }
            if let Some(mv) = row.market_value {
                let sum = market_value.get_or_insert(Decimal::ZERO);
                *sum = sum.saturating_add(mv);
            }
        }
        (amount, market_value)
    }
}

/// Aggregates an investor's portfolio over `range`.
///
/// An investor with no mapped accounts yields [`PortfolioSummary::empty`].
/// Funds are processed in ascending id order. Each fund's flows are restricted
/// to the investor's accounts, normalized, filtered to `range`, and combined
/// with the fund's latest statement as of `range.to`. The fallback NAV is the
/// sum of commitment market values on the investor's accounts.
pub fn aggregate_portfolio(
    investor_id: InvestorId,
    range: DateRange,
    base_currency: &str,
    inputs: &PortfolioInputs,
) -> PortfolioSummary {
    let accounts = inputs.accounts_for(investor_id);
    if accounts.is_empty() {
        return PortfolioSummary::empty(investor_id, range, base_currency);
    }

    let scope = inputs.funds_in_scope(&accounts);

    let mut fund_kpis: Vec<FundKpi> = Vec::with_capacity(scope.len());
    let mut in_range: Vec<NormalizedFlow> = Vec::new();
    let mut warnings = NormalizationWarnings::default();

    for fund_id in &scope {
        let raw: Vec<RawCashflow> = inputs
            .cashflows
            .iter()
            .filter(|c| &c.fund_id == fund_id && accounts.contains(&c.account_id))
            .cloned()
            .collect();

        let normalized = normalize_cashflows(&raw);
        warnings.merge(normalized.warnings);

        let flows: Vec<NormalizedFlow> = normalized
            .flows
            .into_iter()
            .filter(|f| range.contains(f.date))
            .collect();

        let valuation = latest_as_of(&inputs.statements, fund_id, range.to);
        let (commitment, fallback_nav) = inputs.commitment_sums(fund_id, &accounts);

        let mut kpi = compute_fund_kpi(fund_id, &flows, valuation, fallback_nav, range.to)
            .with_commitment(commitment);
        if let Some(fund) = inputs.funds.iter().find(|f| &f.id == fund_id) {
            kpi = kpi.with_fund(fund);
        }

        fund_kpis.push(kpi);
        in_range.extend(flows);
    }

    let totals = PortfolioTotals::from_funds(&fund_kpis);

    let portfolio_xirr = xirr(&irr_series(&in_range, totals.nav, range.to));

    let mut data_notes = Vec::new();
    if portfolio_xirr.is_none() {
        data_notes.push(IRR_UNAVAILABLE_NOTE.to_string());
    }

    PortfolioSummary {
        investor_id,
        range,
        base_currency: base_currency.to_string(),
        investments_count: fund_kpis.len(),
        years: bucket_by_year(&in_range),
        sectors: breakdown_by_sector(&fund_kpis, &inputs.funds, &inputs.assets),
        regions: breakdown_by_region(&fund_kpis, &inputs.funds, &inputs.assets),
        warnings,
        insights: PortfolioInsights {
            xirr: portfolio_xirr,
            recent_activity: recent_activity(&in_range, range),
            data_notes,
        },
        totals,
        funds: fund_kpis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fundlens_core::MetricsBag;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn mapping(account: &str, contact: u64, fund: Option<&str>) -> AccountContact {
        AccountContact {
            account_id: AccountId::new(account),
            contact_id: contact,
            fund_id: fund.map(FundId::new),
        }
    }

    #[test]
    fn test_no_accounts_is_empty() {
        let inputs = PortfolioInputs {
            account_contacts: vec![mapping("A1", 1, Some("F1"))],
            ..PortfolioInputs::default()
        };
        let range = DateRange::new(date(2020, 1, 1), date(2024, 1, 1));

        let summary = aggregate_portfolio(InvestorId::new(2), range, "USD", &inputs);

        assert_eq!(summary.investments_count, 0);
        assert_eq!(summary.totals, PortfolioTotals::zeroed());
    }

    #[test]
    fn test_fund_scope_union() {
        let inputs = PortfolioInputs {
            account_contacts: vec![mapping("A1", 1, Some("F3")), mapping("A2", 1, None)],
            commitments: vec![Commitment {
                account_id: AccountId::new("A2"),
                fund_id: FundId::new("F2"),
                amount: Some(dec!(500)),
                market_value: None,
            }],
            cashflows: vec![
                RawCashflow::new("F1", "A1", date(2023, 1, 1), dec!(100), "contribution"),
                RawCashflow::new("F9", "OTHER", date(2023, 1, 1), dec!(100), "contribution"),
            ],
            ..PortfolioInputs::default()
        };
        let accounts = inputs.accounts_for(InvestorId::new(1));

        let scope: Vec<_> = inputs.funds_in_scope(&accounts).into_iter().collect();

        assert_eq!(scope, vec![FundId::new("F1"), FundId::new("F2"), FundId::new("F3")]);
    }

    #[test]
    fn test_fallback_nav_from_commitment_market_value() {
        let inputs = PortfolioInputs {
            account_contacts: vec![mapping("A1", 1, None)],
            commitments: vec![Commitment {
                account_id: AccountId::new("A1"),
                fund_id: FundId::new("F1"),
                amount: Some(dec!(200000)),
                market_value: Some(dec!(130000)),
            }],
            cashflows: vec![RawCashflow::new(
                "F1",
                "A1",
                date(2023, 1, 1),
                dec!(100000),
                "Capital Call",
            )],
            statements: vec![FinancialStatement::new(
                "F1",
                date(2023, 12, 31),
                MetricsBag::new().with("noi", dec!(10)),
            )],
            ..PortfolioInputs::default()
        };
        let range = DateRange::new(date(2020, 1, 1), date(2024, 1, 1));

        let summary = aggregate_portfolio(InvestorId::new(1), range, "USD", &inputs);

        let kpi = &summary.funds[0];
        assert_eq!(kpi.ending_nav, Some(dec!(130000)));
        assert_eq!(kpi.unfunded, Some(dec!(100000)));
        assert_eq!(summary.totals.commitment, dec!(200000));
        assert!(summary.insights.xirr.is_some());
        assert!(summary.insights.data_notes.is_empty());
    }

    #[test]
    fn test_totals_without_any_nav_stay_null() {
        let inputs = PortfolioInputs {
            account_contacts: vec![mapping("A1", 1, Some("F1"))],
            cashflows: vec![
                RawCashflow::new("F1", "A1", date(2023, 1, 1), dec!(-100), "Capital Call"),
                RawCashflow::new("F1", "A1", date(2023, 6, 1), dec!(20), "Distribution"),
            ],
            ..PortfolioInputs::default()
        };
        let range = DateRange::new(date(2020, 1, 1), date(2024, 1, 1));

        let summary = aggregate_portfolio(InvestorId::new(1), range, "USD", &inputs);

        let kpi = &summary.funds[0];
        assert!(kpi.ending_nav.is_none() && kpi.tvpi.is_none() && kpi.profit.is_none());
        assert_eq!(summary.totals.contributions, dec!(100));
        assert!(summary.totals.nav.is_none());
        assert!(summary.totals.profit.is_none());
        assert!(summary.totals.tvpi.is_none());
        assert!(summary.totals.rvpi.is_none());
        assert_eq!(summary.totals.dpi, Some(0.2));
    }

    #[test]
    fn test_near_max_amounts_saturate() {
        let huge = Decimal::from_scientific("5e28").unwrap();
        let inputs = PortfolioInputs {
            account_contacts: vec![mapping("A1", 1, Some("F1"))],
            cashflows: vec![
                RawCashflow::new("F1", "A1", date(2023, 1, 1), huge, "Capital Call"),
                RawCashflow::new("F1", "A1", date(2023, 2, 1), huge, "Capital Call"),
                RawCashflow::new("F1", "A1", date(2023, 3, 1), huge, "Distribution"),
            ],
            statements: vec![FinancialStatement::new(
                "F1",
                date(2023, 12, 31),
                MetricsBag::new().with("nav", huge),
            )],
            ..PortfolioInputs::default()
        };
        let range = DateRange::new(date(2020, 1, 1), date(2024, 1, 1));

        let summary = aggregate_portfolio(InvestorId::new(1), range, "USD", &inputs);

        let kpi = &summary.funds[0];
        assert_eq!(kpi.contributions, Decimal::MAX);
        assert_eq!(kpi.ending_nav, Some(huge));
        assert!(kpi.profit.is_none());
        assert!(kpi.tvpi.is_none());
        assert!(kpi.dpi.is_some());
        assert_eq!(summary.totals.contributions, Decimal::MAX);
        assert!(summary.totals.profit.is_none());
        assert_eq!(summary.years[0].contributions, Decimal::MAX);
    }
}
