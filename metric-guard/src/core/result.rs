//! Result records produced by validation units.

use super::ValidationFunction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The outcome of one successful evaluation of a validation.
///
/// `is_valid` and `reason` are only populated when the validation has a
/// threshold; without one the record carries the metric value alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationInfo {
    /// Name of the validation
    pub name: String,
    /// Stable identity of the validation
    pub identity: String,
    /// Name of the data source the metric was computed on
    pub data_source_name: String,
    /// Dataset (table, index, collection) the metric was computed on
    pub dataset: String,
    /// The metric that was computed
    pub validation_function: ValidationFunction,
    /// Field the metric was computed on, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// The metric value the threshold was evaluated against
    pub value: f64,
    /// When the record was produced
    pub timestamp: DateTime<Utc>,
    /// Tags attached to the record; always contains `name`
    pub tags: HashMap<String, String>,
    /// Threshold verdict, if a threshold is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_valid: Option<bool>,
    /// Reason of a failed verdict
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ValidationInfo {
    /// Returns true if a threshold verdict is attached.
    pub fn has_verdict(&self) -> bool {
        self.is_valid.is_some()
    }

    /// Returns true if a threshold verdict is attached and it failed.
    pub fn is_failure(&self) -> bool {
        self.is_valid == Some(false)
    }

    pub(crate) fn apply_verdict(&mut self, (is_valid, reason): (bool, Option<String>)) {
        self.is_valid = Some(is_valid);
        self.reason = reason;
    }
}

/// The outcome of one successful evaluation of a delta validation.
///
/// `info.value` holds the absolute difference between the two raw metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaValidationInfo {
    /// Common record fields; `value` is the delta
    #[serde(flatten)]
    pub info: ValidationInfo,
    /// Raw metric computed on the validated dataset
    pub source_value: f64,
    /// Raw metric computed on the reference dataset
    pub reference_value: f64,
    /// Name of the reference data source
    pub reference_datasource_name: String,
    /// Name of the reference dataset
    pub reference_dataset: String,
}

/// Either kind of record, for callers that treat all units uniformly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ValidationRecord {
    /// Record of a single-source validation
    Single(ValidationInfo),
    /// Record of a delta validation
    Delta(DeltaValidationInfo),
}

impl ValidationRecord {
    /// Returns the common record fields.
    pub fn info(&self) -> &ValidationInfo {
        match self {
            ValidationRecord::Single(info) => info,
            ValidationRecord::Delta(delta) => &delta.info,
        }
    }
}

impl From<ValidationInfo> for ValidationRecord {
    fn from(info: ValidationInfo) -> Self {
        ValidationRecord::Single(info)
    }
}

impl From<DeltaValidationInfo> for ValidationRecord {
    fn from(delta: DeltaValidationInfo) -> Self {
        ValidationRecord::Delta(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_info() -> ValidationInfo {
        ValidationInfo {
            name: "row_count".to_string(),
            identity: "pg.orders.count_rows.row_count".to_string(),
            data_source_name: "pg".to_string(),
            dataset: "orders".to_string(),
            validation_function: ValidationFunction::CountRows,
            field: None,
            value: 42.0,
            timestamp: DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            tags: HashMap::from([("name".to_string(), "row_count".to_string())]),
            is_valid: None,
            reason: None,
        }
    }

    #[test]
    fn test_verdict_helpers() {
        let mut info = sample_info();
        assert!(!info.has_verdict());
        assert!(!info.is_failure());

        info.apply_verdict((false, Some("Not equal to the value of 7".to_string())));
        assert!(info.has_verdict());
        assert!(info.is_failure());
        assert_eq!(info.reason.as_deref(), Some("Not equal to the value of 7"));
    }

    #[test]
    fn test_serialization_omits_missing_verdict() {
        let value = serde_json::to_value(sample_info()).unwrap();
        assert_eq!(value["validation_function"], json!("count_rows"));
        assert_eq!(value["timestamp"], json!("2024-03-01T12:00:00Z"));
        assert!(value.get("is_valid").is_none());
        assert!(value.get("field").is_none());
    }

    #[test]
    fn test_delta_serialization_is_flat() {
        let delta = DeltaValidationInfo {
            info: ValidationInfo {
                value: 15.0,
                ..sample_info()
            },
            source_value: 100.0,
            reference_value: 85.0,
            reference_datasource_name: "pg_replica".to_string(),
            reference_dataset: "orders_copy".to_string(),
        };

        let value = serde_json::to_value(ValidationRecord::from(delta.clone())).unwrap();
        assert_eq!(value["kind"], json!("delta"));
        assert_eq!(value["value"], json!(15.0));
        assert_eq!(value["source_value"], json!(100.0));
        assert_eq!(value["reference_dataset"], json!("orders_copy"));

        let record: ValidationRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.info().value, 15.0);
        assert_eq!(record, ValidationRecord::Delta(delta));
    }
}
