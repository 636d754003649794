//! Recent-activity insight.

use chrono::NaiveDate;
use fundlens_core::{DateRange, FundId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::normalize::{FlowKind, NormalizedFlow};

/// Length of the trailing recent-activity window, in days.
pub const RECENT_WINDOW_DAYS: i64 = 90;

/// Maximum flows listed in the recent-activity insight.
pub const RECENT_FLOW_LIMIT: usize = 3;

/// A capital flow shown in the recent-activity list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentFlow {
    /// Fund id.
    pub fund_id: FundId,
    /// Flow date.
    pub date: NaiveDate,
    /// Contributions negative, distributions positive.
    pub amount: Decimal,
    /// Contribution or distribution.
    pub kind: FlowKind,
}

/// Capital activity in the trailing window ending at the range end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    /// The window, clipped so it never precedes the requested range.
    pub window: DateRange,
    /// Most recent capital flows, newest first.
    pub flows: Vec<RecentFlow>,
    /// Contributions in the window as a positive magnitude.
    pub contributions: Decimal,
    /// Distributions in the window.
    pub distributions: Decimal,
}

impl RecentActivity {
    /// An empty activity block for `range`.
    pub fn empty(range: DateRange) -> Self {
        Self {
            window: range.trailing(RECENT_WINDOW_DAYS),
            flows: Vec::new(),
            contributions: Decimal::ZERO,
            distributions: Decimal::ZERO,
        }
    }
}

/// Summarizes capital flows in the trailing 90-day window of `range`.
///
/// Same-day flows keep their input order.
pub fn recent_activity(flows: &[NormalizedFlow], range: DateRange) -> RecentActivity {
    let mut activity = RecentActivity::empty(range);

    let mut in_window: Vec<&NormalizedFlow> = flows
        .iter()
        .filter(|f| f.kind.is_capital() && activity.window.contains(f.date))
        .collect();

    for flow in &in_window {
        match flow.kind {
            FlowKind::Contribution => {
                activity.contributions = activity.contributions.saturating_add(flow.amount.abs());
            }
            FlowKind::Distribution => {
                activity.distributions = activity.distributions.saturating_add(flow.amount);
            }
            FlowKind::Other => {}
        }
    }

    in_window.sort_by(|a, b| b.date.cmp(&a.date));
    activity.flows = in_window
        .into_iter()
        .take(RECENT_FLOW_LIMIT)
        .map(|f| RecentFlow {
            fund_id: f.fund_id.clone(),
            date: f.date,
            amount: match f.kind {
                FlowKind::Contribution => -f.amount.abs(),
                _ => f.amount.abs(),
            },
            kind: f.kind,
        })
        .collect();

    activity
}
