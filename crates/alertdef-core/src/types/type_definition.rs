use super::{
    Flow, LogsFilter, MetricFilter, MetricMissingValues, TracingFilter, UndetectedValuesManagement,
};
use serde::{Deserialize, Serialize};

/// Evaluation strategy of an alert; exactly one is populated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeDefinition {
    /// Fires on every matching log
    LogsImmediate(LogsImmediate),
    /// Log count above or below a threshold
    LogsThreshold(LogsThreshold),
    /// Ratio between two log queries
    LogsRatioThreshold(LogsRatioThreshold),
    /// First occurrence of a value for a key path
    LogsNewValue(LogsNewValue),
    /// Number of distinct values for a key path
    LogsUniqueCount(LogsUniqueCount),
    /// Log count deviating from the learned baseline
    LogsAnomaly(LogsAnomaly),
    /// Log count compared to a historical window
    LogsTimeRelativeThreshold(LogsTimeRelativeThreshold),
    /// PromQL series against a threshold
    MetricThreshold(MetricThreshold),
    /// PromQL series deviating from the learned baseline
    MetricAnomaly(MetricAnomaly),
    /// Fires on every matching span
    TracingImmediate(TracingImmediate),
    /// Span count above a threshold
    TracingThreshold(TracingThreshold),
    /// Ordered correlation of other alerts
    Flow(Flow),
}

impl TypeDefinition {
    /// Configuration attribute name of this variant
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::LogsImmediate(_) => "logs_immediate",
            Self::LogsThreshold(_) => "logs_threshold",
            Self::LogsRatioThreshold(_) => "logs_ratio_threshold",
            Self::LogsNewValue(_) => "logs_new_value",
            Self::LogsUniqueCount(_) => "logs_unique_count",
            Self::LogsAnomaly(_) => "logs_anomaly",
            Self::LogsTimeRelativeThreshold(_) => "logs_time_relative_threshold",
            Self::MetricThreshold(_) => "metric_threshold",
            Self::MetricAnomaly(_) => "metric_anomaly",
            Self::TracingImmediate(_) => "tracing_immediate",
            Self::TracingThreshold(_) => "tracing_threshold",
            Self::Flow(_) => "flow",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsImmediate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs_filter: Option<LogsFilter>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notification_payload_filter: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsThreshold {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs_filter: Option<LogsFilter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undetected_values_management: Option<UndetectedValuesManagement>,

    #[serde(default)]
    pub rules: Vec<LogsThresholdRule>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notification_payload_filter: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsThresholdRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    /// See [`logs_time_window`]
    #[serde(default)]
    pub time_window: i32,

    /// See [`condition`]
    #[serde(default)]
    pub condition_type: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsRatioThreshold {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numerator: Option<LogsFilter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numerator_alias: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denominator: Option<LogsFilter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denominator_alias: Option<String>,

    #[serde(default)]
    pub rules: Vec<LogsRatioRule>,

    /// See [`group_by_for`]
    #[serde(default)]
    pub group_by_for: i32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notification_payload_filter: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsRatioRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    /// See [`logs_ratio_time_window`]
    #[serde(default)]
    pub time_window: i32,

    /// See [`condition`]
    #[serde(default)]
    pub condition_type: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsNewValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs_filter: Option<LogsFilter>,

    #[serde(default)]
    pub rules: Vec<LogsNewValueRule>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notification_payload_filter: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsNewValueRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keypath_to_track: Option<String>,

    /// See [`logs_new_value_time_window`]
    #[serde(default)]
    pub time_window: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsUniqueCount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs_filter: Option<LogsFilter>,

    #[serde(default)]
    pub rules: Vec<LogsUniqueCountRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_count_keypath: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_unique_count_per_group_by_key: Option<i64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notification_payload_filter: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsUniqueCountRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_unique_count: Option<i64>,

    /// See [`logs_unique_value_time_window`]
    #[serde(default)]
    pub time_window: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsAnomaly {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs_filter: Option<LogsFilter>,

    #[serde(default)]
    pub rules: Vec<LogsAnomalyRule>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notification_payload_filter: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsAnomalyRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_threshold: Option<f64>,

    /// See [`logs_time_window`]
    #[serde(default)]
    pub time_window: i32,

    /// See [`anomaly_condition`]
    #[serde(default)]
    pub condition_type: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsTimeRelativeThreshold {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs_filter: Option<LogsFilter>,

    #[serde(default)]
    pub rules: Vec<LogsTimeRelativeRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_infinity: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undetected_values_management: Option<UndetectedValuesManagement>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notification_payload_filter: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsTimeRelativeRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    /// See [`compared_to`]
    #[serde(default)]
    pub compared_to: i32,

    /// See [`condition`]
    #[serde(default)]
    pub condition_type: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricThreshold {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_filter: Option<MetricFilter>,

    #[serde(default)]
    pub rules: Vec<MetricThresholdRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undetected_values_management: Option<UndetectedValuesManagement>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_values: Option<MetricMissingValues>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricThresholdRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub for_over_pct: Option<u32>,

    /// See [`metric_time_window`]
    #[serde(default)]
    pub of_the_last: i32,

    /// See [`condition`]
    #[serde(default)]
    pub condition_type: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricAnomaly {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_filter: Option<MetricFilter>,

    #[serde(default)]
    pub rules: Vec<MetricAnomalyRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricAnomalyRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub for_over_pct: Option<u32>,

    /// See [`metric_time_window`]
    #[serde(default)]
    pub of_the_last: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_non_null_values_pct: Option<u32>,

    /// See [`anomaly_condition`]
    #[serde(default)]
    pub condition_type: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracingImmediate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracing_filter: Option<TracingFilter>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notification_payload_filter: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracingThreshold {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracing_filter: Option<TracingFilter>,

    #[serde(default)]
    pub rules: Vec<TracingThresholdRule>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notification_payload_filter: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracingThresholdRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span_amount: Option<f64>,

    /// See [`tracing_time_window`]
    #[serde(default)]
    pub time_window: i32,

    /// See [`condition`]
    #[serde(default)]
    pub condition_type: i32,
}

/// Threshold comparison codes. Each alert type accepts its own subset.
pub mod condition {
    pub const MORE_THAN_OR_UNSPECIFIED: i32 = 0;
    pub const LESS_THAN: i32 = 1;
    pub const MORE_THAN_OR_EQUALS: i32 = 2;
    pub const LESS_THAN_OR_EQUALS: i32 = 3;
}

/// Anomaly comparison codes
pub mod anomaly_condition {
    pub const MORE_THAN_USUAL_OR_UNSPECIFIED: i32 = 0;
    pub const LESS_THAN_USUAL: i32 = 1;
}

/// Ratio group-by scope codes
pub mod group_by_for {
    pub const BOTH_OR_UNSPECIFIED: i32 = 0;
    pub const NUMERATOR_ONLY: i32 = 1;
    pub const DENUMERATOR_ONLY: i32 = 2;
}

/// Historical baseline codes for time-relative alerts
pub mod compared_to {
    pub const PREVIOUS_HOUR_OR_UNSPECIFIED: i32 = 0;
    pub const SAME_HOUR_YESTERDAY: i32 = 1;
    pub const SAME_HOUR_LAST_WEEK: i32 = 2;
    pub const YESTERDAY: i32 = 3;
    pub const SAME_DAY_LAST_WEEK: i32 = 4;
    pub const SAME_DAY_LAST_MONTH: i32 = 5;
}

/// Window codes for threshold and anomaly log alerts
pub mod logs_time_window {
    pub const MINUTES_5_OR_UNSPECIFIED: i32 = 0;
    pub const MINUTES_10: i32 = 1;
    pub const MINUTES_15: i32 = 2;
    pub const MINUTES_30: i32 = 3;
    pub const HOUR_1: i32 = 4;
    pub const HOURS_2: i32 = 5;
    pub const HOURS_6: i32 = 6;
    pub const HOURS_12: i32 = 7;
    pub const HOURS_24: i32 = 8;
    pub const MINUTES_20: i32 = 9;
    pub const HOURS_36: i32 = 10;
}

/// Window codes for ratio log alerts
pub mod logs_ratio_time_window {
    pub const MINUTES_5_OR_UNSPECIFIED: i32 = 0;
    pub const MINUTES_10: i32 = 1;
    pub const MINUTES_15: i32 = 2;
    pub const MINUTES_30: i32 = 3;
    pub const HOUR_1: i32 = 4;
    pub const HOURS_2: i32 = 5;
    pub const HOURS_4: i32 = 6;
    pub const HOURS_6: i32 = 7;
    pub const HOURS_12: i32 = 8;
    pub const HOURS_24: i32 = 9;
    pub const HOURS_36: i32 = 10;
}

/// Window codes for new-value log alerts
pub mod logs_new_value_time_window {
    pub const HOURS_12_OR_UNSPECIFIED: i32 = 0;
    pub const HOURS_24: i32 = 1;
    pub const HOURS_48: i32 = 2;
    pub const HOURS_72: i32 = 3;
    pub const WEEK_1: i32 = 4;
    pub const MONTH_1: i32 = 5;
    pub const MONTHS_2: i32 = 6;
    pub const MONTHS_3: i32 = 7;
}

/// Window codes for unique-count log alerts
pub mod logs_unique_value_time_window {
    pub const MINUTE_1_OR_UNSPECIFIED: i32 = 0;
    pub const MINUTES_15: i32 = 1;
    pub const MINUTES_20: i32 = 2;
    pub const MINUTES_30: i32 = 3;
    pub const HOURS_1: i32 = 4;
    pub const HOURS_2: i32 = 5;
    pub const HOURS_4: i32 = 6;
    pub const HOURS_6: i32 = 7;
    pub const HOURS_12: i32 = 8;
    pub const HOURS_24: i32 = 9;
    pub const HOURS_36: i32 = 10;
    pub const MINUTES_5: i32 = 11;
    pub const MINUTES_10: i32 = 12;
}

/// Window codes for metric alerts
pub mod metric_time_window {
    pub const MINUTES_1_OR_UNSPECIFIED: i32 = 0;
    pub const MINUTES_5: i32 = 1;
    pub const MINUTES_10: i32 = 2;
    pub const MINUTES_15: i32 = 3;
    pub const MINUTES_30: i32 = 4;
    pub const HOUR_1: i32 = 5;
    pub const HOURS_2: i32 = 6;
    pub const HOURS_4: i32 = 7;
    pub const HOURS_6: i32 = 8;
    pub const HOURS_12: i32 = 9;
    pub const HOURS_24: i32 = 10;
    pub const MINUTES_20: i32 = 11;
    pub const HOURS_36: i32 = 12;
}

/// Window codes for tracing alerts
pub mod tracing_time_window {
    pub const MINUTES_5_OR_UNSPECIFIED: i32 = 0;
    pub const MINUTES_10: i32 = 1;
    pub const MINUTES_15: i32 = 2;
    pub const MINUTES_30: i32 = 3;
    pub const HOUR_1: i32 = 4;
    pub const HOURS_2: i32 = 5;
    pub const HOURS_6: i32 = 6;
    pub const HOURS_12: i32 = 7;
    pub const HOURS_24: i32 = 8;
    pub const MINUTES_20: i32 = 9;
    pub const HOURS_36: i32 = 10;
}
