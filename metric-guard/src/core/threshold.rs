//! Threshold bounds evaluated against a metric value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a single threshold bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionType {
    /// Metric must be greater than or equal to the bound
    Gte,
    /// Metric must be less than or equal to the bound
    Lte,
    /// Metric must be strictly greater than the bound
    Gt,
    /// Metric must be strictly less than the bound
    Lt,
    /// Metric must equal the bound
    Eq,
}

impl ConditionType {
    /// The order in which bounds are checked. The first failing bound decides
    /// the reported reason.
    pub const ORDERED: [ConditionType; 5] = [
        ConditionType::Gte,
        ConditionType::Lte,
        ConditionType::Gt,
        ConditionType::Lt,
        ConditionType::Eq,
    ];

    /// Returns true if `value` violates a bound of this kind set to `bound`.
    pub fn is_violated(&self, value: f64, bound: f64) -> bool {
        match self {
            ConditionType::Gte => value < bound,
            ConditionType::Lte => value > bound,
            ConditionType::Gt => value <= bound,
            ConditionType::Lt => value >= bound,
            ConditionType::Eq => value != bound,
        }
    }

    /// Returns the reason reported when a bound of this kind is violated.
    pub fn failure_reason(&self, bound: f64) -> String {
        match self {
            ConditionType::Gte => format!("Less than threshold value of {bound}"),
            ConditionType::Lte => format!("Greater than threshold value of {bound}"),
            ConditionType::Gt => format!("Less than or equal to threshold value of {bound}"),
            ConditionType::Lt => format!("Greater than or equal to threshold value of {bound}"),
            ConditionType::Eq => format!("Not equal to the value of {bound}"),
        }
    }

    /// Returns the comparison operator symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            ConditionType::Gte => ">=",
            ConditionType::Lte => "<=",
            ConditionType::Gt => ">",
            ConditionType::Lt => "<",
            ConditionType::Eq => "=",
        }
    }
}

/// A set of optional numeric bounds that must all hold for a metric to pass.
///
/// Any subset of the five bounds may be set at the same time. Contradictory
/// bounds (for example `gte: 10` with `lt: 5`) are accepted and simply never
/// pass.
///
/// # Examples
///
/// ```rust
/// use metric_guard::core::Threshold;
///
/// let threshold = Threshold::new().with_gte(10.0).with_lte(20.0);
///
/// assert_eq!(threshold.validate(15.0), (true, None));
/// assert_eq!(
///     threshold.validate(5.0),
///     (false, Some("Less than threshold value of 10".to_string()))
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    /// Inclusive lower bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gte: Option<f64>,
    /// Inclusive upper bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lte: Option<f64>,
    /// Strict lower bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt: Option<f64>,
    /// Strict upper bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lt: Option<f64>,
    /// Exact value the metric must equal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eq: Option<f64>,
}

impl Threshold {
    /// Creates a threshold with no bounds set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the greater-or-equal bound.
    pub fn with_gte(mut self, value: f64) -> Self {
        self.gte = Some(value);
        self
    }

    /// Sets the less-or-equal bound.
    pub fn with_lte(mut self, value: f64) -> Self {
        self.lte = Some(value);
        self
    }

    /// Sets the strictly-greater bound.
    pub fn with_gt(mut self, value: f64) -> Self {
        self.gt = Some(value);
        self
    }

    /// Sets the strictly-less bound.
    pub fn with_lt(mut self, value: f64) -> Self {
        self.lt = Some(value);
        self
    }

    /// Sets the equality bound.
    pub fn with_eq(mut self, value: f64) -> Self {
        self.eq = Some(value);
        self
    }

    /// Returns the bound of the given kind, if set.
    pub fn bound(&self, condition: ConditionType) -> Option<f64> {
        match condition {
            ConditionType::Gte => self.gte,
            ConditionType::Lte => self.lte,
            ConditionType::Gt => self.gt,
            ConditionType::Lt => self.lt,
            ConditionType::Eq => self.eq,
        }
    }

    /// Iterates over the bounds that are set, in [`ConditionType::ORDERED`] order.
    pub fn bounds(&self) -> impl Iterator<Item = (ConditionType, f64)> + '_ {
        ConditionType::ORDERED
            .into_iter()
            .filter_map(move |condition| self.bound(condition).map(|bound| (condition, bound)))
    }

    /// Returns true if no bound is set.
    pub fn is_empty(&self) -> bool {
        self.bounds().next().is_none()
    }

    /// Checks `metric_value` against every set bound.
    ///
    /// Returns `(true, None)` when all bounds hold. Otherwise returns `false`
    /// with the reason of the first violated bound in check order.
    pub fn validate(&self, metric_value: f64) -> (bool, Option<String>) {
        for (condition, bound) in self.bounds() {
            if condition.is_violated(metric_value, bound) {
                return (false, Some(condition.failure_reason(bound)));
            }
        }
        (true, None)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .bounds()
            .map(|(condition, bound)| format!("{} {bound}", condition.symbol()))
            .collect();
        if parts.is_empty() {
            write!(f, "unbounded")
        } else {
            write!(f, "{}", parts.join(" and "))
        }
    }
}
