//! Valuation lookup: latest-as-of statement selection and metric aliases.

use chrono::NaiveDate;
use fundlens_core::{FinancialStatement, FundId, MetricsBag};
use rust_decimal::Decimal;

/// An ordered list of metric keys; the first key that resolves to a number wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAliases {
    keys: &'static [&'static str],
}

impl FieldAliases {
    /// Creates an alias list.
    pub const fn new(keys: &'static [&'static str]) -> Self {
        Self { keys }
    }

    /// The keys, in lookup order.
    pub fn keys(&self) -> &'static [&'static str] {
        self.keys
    }

    /// Resolves the first key that is present and coerces to a number.
    ///
    /// A key holding unparseable text is skipped, not treated as a match.
    pub fn resolve(&self, metrics: &MetricsBag) -> Option<Decimal> {
        self.keys.iter().find_map(|key| metrics.decimal(key))
    }

    /// Resolves against an optional statement.
    pub fn resolve_in(&self, statement: Option<&FinancialStatement>) -> Option<Decimal> {
        statement.and_then(|s| self.resolve(&s.financial_metrics))
    }
}

/// Net asset value.
pub const NAV: FieldAliases =
    FieldAliases::new(&["nav", "market_value", "marketValue", "ending_nav", "endingNav"]);

/// Actual net operating income.
pub const NOI_ACTUAL: FieldAliases =
    FieldAliases::new(&["noi_actual", "noiActual", "noi", "actual_noi", "actualNoi"]);

/// Budgeted net operating income.
pub const NOI_BUDGET: FieldAliases =
    FieldAliases::new(&["noi_budget", "noiBudget", "budget_noi", "budgetNoi"]);

/// Most recent statement for `fund_id` with a report date on or before `as_of`.
///
/// When two statements share the latest date the later one in input order wins.
pub fn latest_as_of<'a>(
    statements: &'a [FinancialStatement],
    fund_id: &FundId,
    as_of: NaiveDate,
) -> Option<&'a FinancialStatement> {
    statements
        .iter()
        .filter(|s| &s.fund_id == fund_id && s.report_date <= as_of)
        .max_by_key(|s| s.report_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fundlens_core::MetricValue;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_alias_order() {
        let bag = MetricsBag::new()
            .with("endingNav", MetricValue::from(dec!(1)))
            .with("market_value", MetricValue::from(dec!(2)));

        assert_eq!(NAV.resolve(&bag), Some(dec!(2)));
    }

    #[test]
    fn test_alias_coerces_strings() {
        let bag = MetricsBag::new().with("marketValue", MetricValue::from("$1,200.50"));

        assert_eq!(NAV.resolve(&bag), Some(dec!(1200.50)));
    }

    #[test]
    fn test_unparseable_alias_is_skipped() {
        let bag = MetricsBag::new()
            .with("nav", MetricValue::from("n/a"))
            .with("ending_nav", MetricValue::from(dec!(500)));

        assert_eq!(NAV.resolve(&bag), Some(dec!(500)));
    }

    #[test]
    fn test_unknown_key_does_not_resolve() {
        let bag = MetricsBag::new().with("net_asset_value", MetricValue::from(dec!(10)));

        assert_eq!(NAV.resolve(&bag), None);
        assert_eq!(NAV.resolve_in(None), None);
    }

    #[test]
    fn test_latest_as_of_ignores_future_statements() {
        let fund = FundId::new("F1");
        let statements = vec![
            FinancialStatement::new("F1", date(2023, 12, 31), MetricsBag::new()),
            FinancialStatement::new("F1", date(2024, 3, 31), MetricsBag::new()),
            FinancialStatement::new("F1", date(2024, 6, 30), MetricsBag::new()),
            FinancialStatement::new("F2", date(2024, 4, 30), MetricsBag::new()),
        ];

        let found = latest_as_of(&statements, &fund, date(2024, 5, 1)).unwrap();
        assert_eq!(found.report_date, date(2024, 3, 31));

        assert!(latest_as_of(&statements, &fund, date(2023, 1, 1)).is_none());
    }

    #[test]
    fn test_latest_as_of_inclusive() {
        let fund = FundId::new("F1");
        let statements = vec![FinancialStatement::new(
            "F1",
            date(2024, 3, 31),
            MetricsBag::new(),
        )];

        assert!(latest_as_of(&statements, &fund, date(2024, 3, 31)).is_some());
    }
}
