//! Stable identity keys for validation instances.

use super::ValidationFunction;

/// Derives the identity string of a validation.
///
/// The identity is a dotted key built from the data source name, dataset name,
/// field name, validation function tag and validation name, in that order.
/// Members that are absent or empty are skipped entirely rather than rendered
/// as empty segments. Dots inside the members are not escaped, so two
/// different tuples can join to the same string; keeping identities unique is
/// up to whoever names the validations.
///
/// # Examples
///
/// ```rust
/// use metric_guard::core::{ValidationFunction, ValidationIdentity};
///
/// let identity = ValidationIdentity::generate_identity(
///     ValidationFunction::CountRows,
///     "check1",
///     Some("warehouse"),
///     None,
///     None,
/// );
/// assert_eq!(identity, "warehouse.count_rows.check1");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationIdentity;

impl ValidationIdentity {
    /// Generates the identity string for the given validation attributes.
    pub fn generate_identity(
        validation_function: ValidationFunction,
        validation_name: &str,
        data_source_name: Option<&str>,
        dataset_name: Option<&str>,
        field_name: Option<&str>,
    ) -> String {
        [
            data_source_name,
            dataset_name,
            field_name,
            Some(validation_function.as_str()),
            Some(validation_name),
        ]
        .into_iter()
        .flatten()
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(".")
    }
}
