use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsFilterModel {
    pub simple_filter: Option<LogsSimpleFilterModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsSimpleFilterModel {
    pub lucene_query: Option<String>,

    pub label_filters: Option<LabelFiltersModel>,
}

/// Label filter groups. Each group is a set: membership matters, order does not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelFiltersModel {
    pub application_name: Option<BTreeSet<LabelFilterModel>>,

    pub subsystem_name: Option<BTreeSet<LabelFilterModel>>,

    /// Severity names such as `Error` or `Critical`
    pub severities: Option<BTreeSet<String>>,
}

/// One operation applied to either `value` or `values`, never both.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LabelFilterModel {
    /// `IS`, `NOT`, `INCLUDES`, `STARTS_WITH` or `ENDS_WITH`
    pub operation: String,

    pub value: Option<String>,

    pub values: Option<Vec<String>>,
}

impl LabelFilterModel {
    /// Filter on a single value
    #[must_use]
    pub fn single(operation: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            value: Some(value.into()),
            values: None,
        }
    }

    /// Filter on an ordered list of values
    #[must_use]
    pub fn list<I, S>(operation: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            operation: operation.into(),
            value: None,
            values: Some(values.into_iter().map(Into::into).collect()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracingFilterModel {
    pub latency_threshold_ms: Option<i64>,

    pub tracing_label_filters: Option<TracingLabelFiltersModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracingLabelFiltersModel {
    pub application_name: Option<BTreeSet<TracingFilterTypeModel>>,

    pub subsystem_name: Option<BTreeSet<TracingFilterTypeModel>>,

    pub service_name: Option<BTreeSet<TracingFilterTypeModel>>,

    pub operation_name: Option<BTreeSet<TracingFilterTypeModel>>,

    /// Span field name to the filter applied to it
    pub span_fields: Option<BTreeMap<String, TracingFilterTypeModel>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TracingFilterTypeModel {
    pub operation: String,

    pub values: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricFilterModel {
    pub promql: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndetectedValuesManagementModel {
    pub trigger_undetected_values: Option<bool>,

    /// `NEVER`, `5_MINUTES` .. `24_HOURS`
    pub auto_retire_timeframe: Option<String>,
}

/// Exactly one of the two must be set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingValuesModel {
    pub replace_with_zero: Option<bool>,

    pub min_non_null_values_pct: Option<i64>,
}
