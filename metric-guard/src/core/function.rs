//! Validation function tags.

use crate::error::GuardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The metric a validation computes.
///
/// The tag is part of a validation's identity and of every result it produces,
/// so the string form returned by [`ValidationFunction::as_str`] is stable.
///
/// # Examples
///
/// ```rust
/// use metric_guard::core::ValidationFunction;
///
/// let function: ValidationFunction = "count_null".parse().unwrap();
/// assert_eq!(function, ValidationFunction::CountNull);
/// assert_eq!(function.to_string(), "count_null");
/// assert!(ValidationFunction::DeltaCountRows.is_delta());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationFunction {
    // Numeric aggregates
    /// Smallest value of a field
    Min,
    /// Largest value of a field
    Max,
    /// Mean of a field
    Avg,
    /// Sum of a field
    Sum,
    /// Variance of a field
    Variance,
    /// Standard deviation of a field
    Stddev,

    // Reliability
    /// Number of rows in a table
    CountRows,
    /// Number of documents in an index
    CountDocuments,
    /// Age of the most recent timestamp in a field
    Freshness,

    // Uniqueness
    /// Number of distinct values
    CountDistinct,
    /// Number of duplicated values
    CountDuplicate,

    // Completeness
    /// Number of null values
    CountNull,
    /// Percentage of null values
    PercentNull,
    /// Number of empty strings
    CountEmptyString,
    /// Percentage of empty strings
    PercentEmptyString,

    // Validity
    /// Number of values in the configured `values` list
    CountValidValues,
    /// Percentage of values in the configured `values` list
    PercentValidValues,
    /// Number of values outside the configured `values` list
    CountInvalidValues,
    /// Percentage of values outside the configured `values` list
    PercentInvalidValues,
    /// Number of values matching the configured regex
    CountValidRegex,
    /// Percentage of values matching the configured regex
    PercentValidRegex,
    /// Number of values not matching the configured regex
    CountInvalidRegex,
    /// Percentage of values not matching the configured regex
    PercentInvalidRegex,
    /// Number of valid UUID strings
    CountUuid,
    /// Percentage of valid UUID strings
    PercentUuid,

    // Comparisons against a reference dataset
    /// Row count difference against a reference table
    DeltaCountRows,
    /// Sum difference against a reference table
    DeltaSum,
    /// Mean difference against a reference table
    DeltaAvg,

    /// A metric produced by a user-supplied query.
    CustomSql,
}

impl ValidationFunction {
    /// Every validation function, in declaration order.
    pub const ALL: [ValidationFunction; 29] = [
        Self::Min,
        Self::Max,
        Self::Avg,
        Self::Sum,
        Self::Variance,
        Self::Stddev,
        Self::CountRows,
        Self::CountDocuments,
        Self::Freshness,
        Self::CountDistinct,
        Self::CountDuplicate,
        Self::CountNull,
        Self::PercentNull,
        Self::CountEmptyString,
        Self::PercentEmptyString,
        Self::CountValidValues,
        Self::PercentValidValues,
        Self::CountInvalidValues,
        Self::PercentInvalidValues,
        Self::CountValidRegex,
        Self::PercentValidRegex,
        Self::CountInvalidRegex,
        Self::PercentInvalidRegex,
        Self::CountUuid,
        Self::PercentUuid,
        Self::DeltaCountRows,
        Self::DeltaSum,
        Self::DeltaAvg,
        Self::CustomSql,
    ];

    /// Returns the stable string tag of this function.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Max => "max",
            Self::Avg => "avg",
            Self::Sum => "sum",
            Self::Variance => "variance",
            Self::Stddev => "stddev",
            Self::CountRows => "count_rows",
            Self::CountDocuments => "count_documents",
            Self::Freshness => "freshness",
            Self::CountDistinct => "count_distinct",
            Self::CountDuplicate => "count_duplicate",
            Self::CountNull => "count_null",
            Self::PercentNull => "percent_null",
            Self::CountEmptyString => "count_empty_string",
            Self::PercentEmptyString => "percent_empty_string",
            Self::CountValidValues => "count_valid_values",
            Self::PercentValidValues => "percent_valid_values",
            Self::CountInvalidValues => "count_invalid_values",
            Self::PercentInvalidValues => "percent_invalid_values",
            Self::CountValidRegex => "count_valid_regex",
            Self::PercentValidRegex => "percent_valid_regex",
            Self::CountInvalidRegex => "count_invalid_regex",
            Self::PercentInvalidRegex => "percent_invalid_regex",
            Self::CountUuid => "count_uuid",
            Self::PercentUuid => "percent_uuid",
            Self::DeltaCountRows => "delta_count_rows",
            Self::DeltaSum => "delta_sum",
            Self::DeltaAvg => "delta_avg",
            Self::CustomSql => "custom_sql",
        }
    }

    /// Returns true for functions that compare a dataset against a reference.
    pub fn is_delta(&self) -> bool {
        matches!(self, Self::DeltaCountRows | Self::DeltaSum | Self::DeltaAvg)
    }
}

impl fmt::Display for ValidationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationFunction {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|function| function.as_str() == tag)
            .ok_or_else(|| GuardError::Parse(format!("unknown validation function '{s}'")))
    }
}
