use serde::{Deserialize, Serialize};

/// Log selection shared by every logs-based alert type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsFilter {
    /// Query plus label filters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simple_filter: Option<LogsSimpleFilter>,
}

/// Lucene query narrowed by label filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsSimpleFilter {
    /// Lucene query text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lucene_query: Option<String>,

    /// Label filter groups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_filters: Option<LabelFilters>,
}

/// Label filter groups of a logs filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelFilters {
    /// Filters on the application name
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub application_name: Vec<LabelFilterType>,

    /// Filters on the subsystem name
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsystem_name: Vec<LabelFilterType>,

    /// Severity codes, see [`log_severity`]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub severities: Vec<i32>,
}

/// Single label filter: operation applied to one or more values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelFilterType {
    /// Operation code, see [`filter_operation`]
    #[serde(default)]
    pub operation: i32,

    /// Operand(s)
    pub value: FilterValue,
}

/// Filter operand, either one value or an ordered list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Single value
    Single(String),
    /// Ordered list of values
    List(Vec<String>),
}

impl FilterValue {
    /// Number of operands
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::List(values) => values.len(),
        }
    }

    /// Returns true if there are no operands
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Span selection for tracing alerts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracingFilter {
    /// Latency threshold plus label filters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simple_filter: Option<TracingSimpleFilter>,
}

/// Latency threshold narrowed by label filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracingSimpleFilter {
    /// Label filter groups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracing_label_filters: Option<TracingLabelFilters>,

    /// Minimum span latency in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_threshold_ms: Option<u64>,
}

/// Label filter groups of a tracing filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracingLabelFilters {
    /// Filters on the application name
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub application_name: Vec<TracingFilterType>,

    /// Filters on the subsystem name
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsystem_name: Vec<TracingFilterType>,

    /// Filters on the service name
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub service_name: Vec<TracingFilterType>,

    /// Filters on the operation name
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operation_name: Vec<TracingFilterType>,

    /// Filters on arbitrary span fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub span_fields: Vec<TracingSpanFieldsFilterType>,
}

/// Tracing label filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracingFilterType {
    /// Operands
    #[serde(default)]
    pub values: Vec<String>,

    /// Operation code, see [`filter_operation`]
    #[serde(default)]
    pub operation: i32,
}

/// Filter on a span field selected by key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracingSpanFieldsFilterType {
    /// Span field name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Filter applied to the field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_type: Option<TracingFilterType>,
}

/// Metric selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricFilter {
    /// PromQL expression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promql: Option<String>,
}

/// Behaviour when a grouped series stops reporting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UndetectedValuesManagement {
    /// Trigger when values stop arriving
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_undetected_values: Option<bool>,

    /// Code, see [`auto_retire_timeframe`]
    #[serde(default)]
    pub auto_retire_timeframe: i32,
}

/// Handling of gaps in metric series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricMissingValues {
    /// Treat missing points as zero
    ReplaceWithZero(bool),
    /// Require this share of non-null points before evaluating
    MinNonNullValuesPct(u32),
}

/// Label filter operation codes, shared by logs and tracing filters
pub mod filter_operation {
    /// Exact match, also the wire default
    pub const IS_OR_UNSPECIFIED: i32 = 0;
    /// Substring match
    pub const INCLUDES: i32 = 1;
    /// Suffix match
    pub const ENDS_WITH: i32 = 2;
    /// Prefix match
    pub const STARTS_WITH: i32 = 3;
    /// Negated exact match
    pub const IS_NOT: i32 = 4;
}

/// Log severity codes
pub mod log_severity {
    /// Verbose, also the wire default
    pub const VERBOSE_UNSPECIFIED: i32 = 0;
    /// Debug
    pub const DEBUG: i32 = 1;
    /// Info
    pub const INFO: i32 = 2;
    /// Warning
    pub const WARNING: i32 = 3;
    /// Error
    pub const ERROR: i32 = 4;
    /// Critical
    pub const CRITICAL: i32 = 5;
}

/// Auto-retire timeframe codes for undetected values
pub mod auto_retire_timeframe {
    /// Never retire, also the wire default
    pub const NEVER_OR_UNSPECIFIED: i32 = 0;
    /// 5 minutes
    pub const MINUTES_5: i32 = 1;
    /// 10 minutes
    pub const MINUTES_10: i32 = 2;
    /// 1 hour
    pub const HOUR_1: i32 = 3;
    /// 2 hours
    pub const HOURS_2: i32 = 4;
    /// 6 hours
    pub const HOURS_6: i32 = 5;
    /// 12 hours
    pub const HOURS_12: i32 = 6;
    /// 24 hours
    pub const HOURS_24: i32 = 7;
}
