//! Cashflow classification and sign normalization.
//!
//! Ledger labels are free text. Known contribution labels are forced to a
//! non-positive amount, known distribution labels to a non-negative amount,
//! and anything else is kept as [`FlowKind::Other`] with its original sign
//! and reported in [`NormalizationWarnings`].

use std::collections::BTreeSet;

use chrono::NaiveDate;
use fundlens_core::{AccountId, FundId, RawCashflow};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lower-cased labels treated as capital flowing from the investor into a fund.
pub const CONTRIBUTION_LABELS: &[&str] = &[
    "contribution",
    "capital_call",
    "capital call",
    "capital contribution",
    "capital_contribution",
    "call",
    "drawdown",
    "subscription",
    "investment",
    "funding",
];

/// Lower-cased labels treated as capital returned to the investor.
pub const DISTRIBUTION_LABELS: &[&str] = &[
    "distribution",
    "dividend",
    "return_of_capital",
    "return of capital",
    "roc",
    "income",
    "income_distribution",
    "interest",
    "capital_distribution",
    "redemption",
    "proceeds",
];

/// Recorded in warnings for a missing or blank label.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Classification of a normalized flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    /// Capital paid in by the investor (amount <= 0).
    Contribution,
    /// Capital returned to the investor (amount >= 0).
    Distribution,
    /// Unrecognized label; amount keeps its original sign.
    Other,
}

impl FlowKind {
    /// True for contributions and distributions.
    pub fn is_capital(self) -> bool {
        !matches!(self, FlowKind::Other)
    }
}

/// A classified cashflow with investor-perspective sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedFlow {
    /// Fund id.
    pub fund_id: FundId,
    /// Account id.
    pub account_id: AccountId,
    /// Flow date.
    pub date: NaiveDate,
    /// Signed amount: contributions negative, distributions positive.
    pub amount: Decimal,
    /// Classification.
    pub kind: FlowKind,
    /// Label as received, for diagnostics.
    pub label: Option<String>,
}

/// Unmapped labels seen while normalizing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizationWarnings {
    /// Lower-cased unmapped labels, deduplicated and sorted.
    pub unmapped_types: BTreeSet<String>,
}

impl NormalizationWarnings {
    /// True if every label was recognized.
    pub fn is_empty(&self) -> bool {
        self.unmapped_types.is_empty()
    }

    /// Merges another warnings set into this one.
    pub fn merge(&mut self, other: NormalizationWarnings) {
        self.unmapped_types.extend(other.unmapped_types);
    }
}

/// Output of [`normalize_cashflows`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedCashflows {
    /// Flows in input order.
    pub flows: Vec<NormalizedFlow>,
    /// Labels that matched neither dictionary.
    pub warnings: NormalizationWarnings,
}

/// Classifies a label. Matching is case-insensitive and ignores surrounding whitespace.
pub fn classify_label(label: &str) -> FlowKind {
    let key = label.trim().to_lowercase();
    if CONTRIBUTION_LABELS.contains(&key.as_str()) {
        FlowKind::Contribution
    } else if DISTRIBUTION_LABELS.contains(&key.as_str()) {
        FlowKind::Distribution
    } else {
        FlowKind::Other
    }
}

/// Classifies and sign-normalizes raw cashflows, preserving input order.
///
/// The amount used is the base-currency amount when present. No record is
/// dropped: unrecognized labels produce [`FlowKind::Other`] flows.
pub fn normalize_cashflows(raw: &[RawCashflow]) -> NormalizedCashflows {
    let mut out = NormalizedCashflows {
        flows: Vec::with_capacity(raw.len()),
        warnings: NormalizationWarnings::default(),
    };

    for record in raw {
        let label = record.transaction_type.as_deref().unwrap_or_default();
        let kind = classify_label(label);
        let amount = record.effective_amount();

        let amount = match kind {
            FlowKind::Contribution => -amount.abs(),
            FlowKind::Distribution => amount.abs(),
            FlowKind::Other => {
                let key = label.trim().to_lowercase();
                let key = if key.is_empty() {
                    UNKNOWN_LABEL.to_string()
                } else {
                    key
                };
                out.warnings.unmapped_types.insert(key);
                amount
            }
        };

        out.flows.push(NormalizedFlow {
            fund_id: record.fund_id.clone(),
            account_id: record.account_id.clone(),
            date: record.date,
            amount,
            kind,
            label: record.transaction_type.clone(),
        });
    }

    out
}
