//! Open financial-statement metric bags.
//!
//! Upstream financial statements carry a free-form `financialMetrics` object whose
//! keys and value types vary by fund administrator. [`MetricsBag`] keeps the raw
//! values and exposes an explicit, typed numeric lookup: text values are coerced by
//! stripping currency symbols, thousands separators, percent signs and whitespace.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single metric value as reported upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// A JSON number.
    Number(Decimal),
    /// A string, possibly formatted (`"$1,250,000"`, `"12.5 %"`).
    Text(String),
    /// A boolean flag.
    Flag(bool),
    /// An explicit `null`.
    Null,
}

impl MetricValue {
    /// Numeric view of the value, coercing text where possible.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            MetricValue::Number(n) => Some(*n),
            MetricValue::Text(s) => coerce_numeric(s),
            MetricValue::Flag(_) | MetricValue::Null => None,
        }
    }
}

impl From<Decimal> for MetricValue {
    fn from(value: Decimal) -> Self {
        MetricValue::Number(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Text(value.to_string())
    }
}

/// Keyed collection of metric values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricsBag(BTreeMap<String, MetricValue>);

impl MetricsBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing any previous value under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetricValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<MetricValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Raw value lookup.
    pub fn get(&self, key: &str) -> Option<&MetricValue> {
        self.0.get(key)
    }

    /// Numeric lookup with text coercion. `None` when absent or not numeric.
    pub fn decimal(&self, key: &str) -> Option<Decimal> {
        self.0.get(key).and_then(MetricValue::as_decimal)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the bag holds no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<MetricValue>> FromIterator<(K, V)> for MetricsBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Coerces formatted text into a decimal.
///
/// Strips `$`, `,`, `%` and all whitespace, then parses the remainder (plain or
/// scientific notation). Returns `None` for empty or non-numeric input.
pub fn coerce_numeric(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%') && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}
