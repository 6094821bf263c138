//! The data source contract consumed by validations.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// The query/filter language family a data source understands.
///
/// The dialect decides how a validation's `where` filter and `values` list are
/// interpreted when the validation is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSourceLanguageSupport {
    /// SQL engines; filters are opaque SQL expressions
    Sql,
    /// Search engines speaking an Elasticsearch-style query DSL; filters are
    /// structured JSON documents
    DslEs,
    /// Any other dialect; filters and value lists are ignored
    #[serde(other)]
    Unsupported,
}

impl fmt::Display for DataSourceLanguageSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            DataSourceLanguageSupport::Sql => "sql",
            DataSourceLanguageSupport::DslEs => "dsl_es",
            DataSourceLanguageSupport::Unsupported => "unsupported",
        };
        f.write_str(tag)
    }
}

/// A handle to a data source that validations compute metrics against.
///
/// Connection management, authentication and query execution live behind
/// this trait and are not part of this crate. Validations only read the name
/// and dialect; metric hooks are free to downcast or hold their own typed
/// handle to issue queries.
///
/// # Examples
///
/// ```rust
/// use metric_guard::core::{DataSource, DataSourceLanguageSupport};
///
/// #[derive(Debug)]
/// struct Warehouse;
///
/// impl DataSource for Warehouse {
///     fn data_source_name(&self) -> &str {
///         "warehouse"
///     }
///
///     fn language_support(&self) -> DataSourceLanguageSupport {
///         DataSourceLanguageSupport::Sql
///     }
/// }
/// ```
pub trait DataSource: Debug + Send + Sync {
    /// Returns the stable name of this data source.
    fn data_source_name(&self) -> &str;

    /// Returns the dialect this data source understands.
    fn language_support(&self) -> DataSourceLanguageSupport;
}
