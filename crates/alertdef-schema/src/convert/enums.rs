//! Bidirectional tables between configuration strings and domain codes.
//!
//! Every table is built once on first use and only read afterwards, so it is
//! safe to share between concurrent lifecycle calls.

use alertdef_core::{
    anomaly_condition, auto_retire_timeframe, compared_to, condition, day_of_week,
    filter_operation, flow_operator, group_by_for, log_severity, logs_new_value_time_window,
    logs_ratio_time_window, logs_time_window, logs_unique_value_time_window, metric_time_window,
    notify_on, priority, timeframe_type, tracing_time_window, AlertDefError, Result,
};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Bijection between configuration strings and domain enumeration codes
#[derive(Debug)]
pub struct EnumTable {
    name: &'static str,
    entries: &'static [(&'static str, i32)],
    to_domain: HashMap<&'static str, i32>,
    to_config: HashMap<i32, &'static str>,
}

impl EnumTable {
    fn new(name: &'static str, entries: &'static [(&'static str, i32)]) -> Self {
        Self {
            name,
            entries,
            to_domain: entries.iter().copied().collect(),
            to_config: entries.iter().map(|&(value, code)| (code, value)).collect(),
        }
    }

    /// Domain field this table maps
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Configuration strings, in table order
    pub fn config_values(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|&(value, _)| value)
    }

    /// Domain codes, in table order
    pub fn domain_codes(&self) -> impl Iterator<Item = i32> + '_ {
        self.entries.iter().map(|&(_, code)| code)
    }

    /// Returns true if no string and no code appears twice
    #[must_use]
    pub fn is_bijective(&self) -> bool {
        self.to_domain.len() == self.entries.len() && self.to_config.len() == self.entries.len()
    }

    /// Configuration string to domain code.
    ///
    /// Unknown strings are a configuration error reported at `path`.
    pub fn to_domain(&self, value: &str, path: &str) -> Result<i32> {
        self.to_domain.get(value).copied().ok_or_else(|| {
            let allowed: Vec<&str> = self.config_values().collect();
            AlertDefError::invalid(
                path,
                format!(
                    "\"{value}\" is not a valid {}, expected one of: {}",
                    self.name,
                    allowed.join(", ")
                ),
            )
        })
    }

    /// Domain code to configuration string.
    ///
    /// Unknown codes mean this table is older than the backend.
    pub fn to_config(&self, code: i32) -> Result<String> {
        self.to_config
            .get(&code)
            .map(|value| (*value).to_string())
            .ok_or_else(|| AlertDefError::unmapped(self.name, code))
    }
}

macro_rules! enum_table {
    ($(#[$meta:meta])* $ident:ident, $name:literal, [$(($value:literal, $code:expr)),+ $(,)?]) => {
        $(#[$meta])*
        pub static $ident: LazyLock<EnumTable> = LazyLock::new(|| {
            EnumTable::new($name, &[$(($value, $code)),+])
        });
    };
}

enum_table!(PRIORITY, "priority", [
    ("P1", priority::P1),
    ("P2", priority::P2),
    ("P3", priority::P3),
    ("P4", priority::P4),
    ("P5", priority::P5_OR_UNSPECIFIED),
]);

enum_table!(NOTIFY_ON, "notify_on", [
    ("Triggered Only", notify_on::TRIGGERED_ONLY_UNSPECIFIED),
    ("Triggered and Resolved", notify_on::TRIGGERED_AND_RESOLVED),
]);

enum_table!(DAY_OF_WEEK, "day_of_week", [
    ("monday", day_of_week::MONDAY_OR_UNSPECIFIED),
    ("tuesday", day_of_week::TUESDAY),
    ("wednesday", day_of_week::WEDNESDAY),
    ("thursday", day_of_week::THURSDAY),
    ("friday", day_of_week::FRIDAY),
    ("saturday", day_of_week::SATURDAY),
    ("sunday", day_of_week::SUNDAY),
]);

enum_table!(FILTER_OPERATION, "filter_operation", [
    ("IS", filter_operation::IS_OR_UNSPECIFIED),
    ("NOT", filter_operation::IS_NOT),
    ("INCLUDES", filter_operation::INCLUDES),
    ("STARTS_WITH", filter_operation::STARTS_WITH),
    ("ENDS_WITH", filter_operation::ENDS_WITH),
]);

enum_table!(LOG_SEVERITY, "log_severity", [
    ("Verbose", log_severity::VERBOSE_UNSPECIFIED),
    ("Debug", log_severity::DEBUG),
    ("Info", log_severity::INFO),
    ("Warning", log_severity::WARNING),
    ("Error", log_severity::ERROR),
    ("Critical", log_severity::CRITICAL),
]);

enum_table!(AUTO_RETIRE_TIMEFRAME, "auto_retire_timeframe", [
    ("NEVER", auto_retire_timeframe::NEVER_OR_UNSPECIFIED),
    ("5_MINUTES", auto_retire_timeframe::MINUTES_5),
    ("10_MINUTES", auto_retire_timeframe::MINUTES_10),
    ("1_HOUR", auto_retire_timeframe::HOUR_1),
    ("2_HOURS", auto_retire_timeframe::HOURS_2),
    ("6_HOURS", auto_retire_timeframe::HOURS_6),
    ("12_HOURS", auto_retire_timeframe::HOURS_12),
    ("24_HOURS", auto_retire_timeframe::HOURS_24),
]);

enum_table!(
    /// Logs threshold rules compare strictly
    LOGS_THRESHOLD_CONDITION, "logs_threshold condition", [
    ("MORE_THAN", condition::MORE_THAN_OR_UNSPECIFIED),
    ("LESS_THAN", condition::LESS_THAN),
]);

enum_table!(LOGS_RATIO_CONDITION, "logs_ratio_threshold condition", [
    ("MORE_THAN", condition::MORE_THAN_OR_UNSPECIFIED),
    ("LESS_THAN", condition::LESS_THAN),
]);

enum_table!(LOGS_TIME_RELATIVE_CONDITION, "logs_time_relative_threshold condition", [
    ("MORE_THAN", condition::MORE_THAN_OR_UNSPECIFIED),
    ("LESS_THAN", condition::LESS_THAN),
]);

enum_table!(
    /// Metric threshold rules also accept inclusive comparisons
    METRIC_THRESHOLD_CONDITION, "metric_threshold condition", [
    ("MORE_THAN", condition::MORE_THAN_OR_UNSPECIFIED),
    ("LESS_THAN", condition::LESS_THAN),
    ("MORE_THAN_OR_EQUALS", condition::MORE_THAN_OR_EQUALS),
    ("LESS_THAN_OR_EQUALS", condition::LESS_THAN_OR_EQUALS),
]);

enum_table!(LOGS_ANOMALY_CONDITION, "logs_anomaly condition", [
    ("MORE_THAN_USUAL", anomaly_condition::MORE_THAN_USUAL_OR_UNSPECIFIED),
    ("LESS_THAN_USUAL", anomaly_condition::LESS_THAN_USUAL),
]);

enum_table!(METRIC_ANOMALY_CONDITION, "metric_anomaly condition", [
    ("MORE_THAN_USUAL", anomaly_condition::MORE_THAN_USUAL_OR_UNSPECIFIED),
    ("LESS_THAN_USUAL", anomaly_condition::LESS_THAN_USUAL),
]);

enum_table!(TRACING_THRESHOLD_CONDITION, "tracing_threshold condition", [
    ("MORE_THAN", condition::MORE_THAN_OR_UNSPECIFIED),
]);

enum_table!(GROUP_BY_FOR, "group_by_for", [
    ("Both", group_by_for::BOTH_OR_UNSPECIFIED),
    ("Numerator Only", group_by_for::NUMERATOR_ONLY),
    ("Denominator Only", group_by_for::DENUMERATOR_ONLY),
]);

enum_table!(COMPARED_TO, "compared_to", [
    ("Previous Hour", compared_to::PREVIOUS_HOUR_OR_UNSPECIFIED),
    ("Same Hour Yesterday", compared_to::SAME_HOUR_YESTERDAY),
    ("Same Hour Last Week", compared_to::SAME_HOUR_LAST_WEEK),
    ("Yesterday", compared_to::YESTERDAY),
    ("Same Day Last Week", compared_to::SAME_DAY_LAST_WEEK),
    ("Same Day Last Month", compared_to::SAME_DAY_LAST_MONTH),
]);

enum_table!(LOGS_TIME_WINDOW, "logs time_window", [
    ("5_MINUTES", logs_time_window::MINUTES_5_OR_UNSPECIFIED),
    ("10_MINUTES", logs_time_window::MINUTES_10),
    ("15_MINUTES", logs_time_window::MINUTES_15),
    ("20_MINUTES", logs_time_window::MINUTES_20),
    ("30_MINUTES", logs_time_window::MINUTES_30),
    ("1_HOUR", logs_time_window::HOUR_1),
    ("2_HOURS", logs_time_window::HOURS_2),
    ("6_HOURS", logs_time_window::HOURS_6),
    ("12_HOURS", logs_time_window::HOURS_12),
    ("24_HOURS", logs_time_window::HOURS_24),
    ("36_HOURS", logs_time_window::HOURS_36),
]);

enum_table!(LOGS_RATIO_TIME_WINDOW, "logs_ratio_threshold time_window", [
    ("5_MINUTES", logs_ratio_time_window::MINUTES_5_OR_UNSPECIFIED),
    ("10_MINUTES", logs_ratio_time_window::MINUTES_10),
    ("15_MINUTES", logs_ratio_time_window::MINUTES_15),
    ("30_MINUTES", logs_ratio_time_window::MINUTES_30),
    ("1_HOUR", logs_ratio_time_window::HOUR_1),
    ("2_HOURS", logs_ratio_time_window::HOURS_2),
    ("4_HOURS", logs_ratio_time_window::HOURS_4),
    ("6_HOURS", logs_ratio_time_window::HOURS_6),
    ("12_HOURS", logs_ratio_time_window::HOURS_12),
    ("24_HOURS", logs_ratio_time_window::HOURS_24),
    ("36_HOURS", logs_ratio_time_window::HOURS_36),
]);

enum_table!(LOGS_NEW_VALUE_TIME_WINDOW, "logs_new_value time_window", [
    ("12_HOURS", logs_new_value_time_window::HOURS_12_OR_UNSPECIFIED),
    ("24_HOURS", logs_new_value_time_window::HOURS_24),
    ("48_HOURS", logs_new_value_time_window::HOURS_48),
    ("72_HOURS", logs_new_value_time_window::HOURS_72),
    ("1_WEEK", logs_new_value_time_window::WEEK_1),
    ("1_MONTH", logs_new_value_time_window::MONTH_1),
    ("2_MONTHS", logs_new_value_time_window::MONTHS_2),
    ("3_MONTHS", logs_new_value_time_window::MONTHS_3),
]);

enum_table!(LOGS_UNIQUE_VALUE_TIME_WINDOW, "logs_unique_count time_window", [
    ("1_MINUTE", logs_unique_value_time_window::MINUTE_1_OR_UNSPECIFIED),
    ("5_MINUTES", logs_unique_value_time_window::MINUTES_5),
    ("10_MINUTES", logs_unique_value_time_window::MINUTES_10),
    ("15_MINUTES", logs_unique_value_time_window::MINUTES_15),
    ("20_MINUTES", logs_unique_value_time_window::MINUTES_20),
    ("30_MINUTES", logs_unique_value_time_window::MINUTES_30),
    ("1_HOUR", logs_unique_value_time_window::HOURS_1),
    ("2_HOURS", logs_unique_value_time_window::HOURS_2),
    ("4_HOURS", logs_unique_value_time_window::HOURS_4),
    ("6_HOURS", logs_unique_value_time_window::HOURS_6),
    ("12_HOURS", logs_unique_value_time_window::HOURS_12),
    ("24_HOURS", logs_unique_value_time_window::HOURS_24),
    ("36_HOURS", logs_unique_value_time_window::HOURS_36),
]);

enum_table!(METRIC_TIME_WINDOW, "metric of_the_last", [
    ("1_MINUTE", metric_time_window::MINUTES_1_OR_UNSPECIFIED),
    ("5_MINUTES", metric_time_window::MINUTES_5),
    ("10_MINUTES", metric_time_window::MINUTES_10),
    ("15_MINUTES", metric_time_window::MINUTES_15),
    ("20_MINUTES", metric_time_window::MINUTES_20),
    ("30_MINUTES", metric_time_window::MINUTES_30),
    ("1_HOUR", metric_time_window::HOUR_1),
    ("2_HOURS", metric_time_window::HOURS_2),
    ("4_HOURS", metric_time_window::HOURS_4),
    ("6_HOURS", metric_time_window::HOURS_6),
    ("12_HOURS", metric_time_window::HOURS_12),
    ("24_HOURS", metric_time_window::HOURS_24),
    ("36_HOURS", metric_time_window::HOURS_36),
]);

enum_table!(TRACING_TIME_WINDOW, "tracing time_window", [
    ("5_MINUTES", tracing_time_window::MINUTES_5_OR_UNSPECIFIED),
    ("10_MINUTES", tracing_time_window::MINUTES_10),
    ("15_MINUTES", tracing_time_window::MINUTES_15),
    ("20_MINUTES", tracing_time_window::MINUTES_20),
    ("30_MINUTES", tracing_time_window::MINUTES_30),
    ("1_HOUR", tracing_time_window::HOUR_1),
    ("2_HOURS", tracing_time_window::HOURS_2),
    ("6_HOURS", tracing_time_window::HOURS_6),
    ("12_HOURS", tracing_time_window::HOURS_12),
    ("24_HOURS", tracing_time_window::HOURS_24),
    ("36_HOURS", tracing_time_window::HOURS_36),
]);

enum_table!(TIMEFRAME_TYPE, "timeframe_type", [
    ("Unspecified", timeframe_type::UNSPECIFIED),
    ("Up To", timeframe_type::UP_TO),
]);

enum_table!(FLOW_OPERATOR, "flow operator", [
    ("AND", flow_operator::AND_OR_UNSPECIFIED),
    ("OR", flow_operator::OR),
]);

/// Every table, for exhaustive checks
#[must_use]
pub fn all_tables() -> Vec<&'static EnumTable> {
    vec![
        &*PRIORITY,
        &*NOTIFY_ON,
        &*DAY_OF_WEEK,
        &*FILTER_OPERATION,
        &*LOG_SEVERITY,
        &*AUTO_RETIRE_TIMEFRAME,
        &*LOGS_THRESHOLD_CONDITION,
        &*LOGS_RATIO_CONDITION,
        &*LOGS_TIME_RELATIVE_CONDITION,
        &*METRIC_THRESHOLD_CONDITION,
        &*LOGS_ANOMALY_CONDITION,
        &*METRIC_ANOMALY_CONDITION,
        &*TRACING_THRESHOLD_CONDITION,
        &*GROUP_BY_FOR,
        &*COMPARED_TO,
        &*LOGS_TIME_WINDOW,
        &*LOGS_RATIO_TIME_WINDOW,
        &*LOGS_NEW_VALUE_TIME_WINDOW,
        &*LOGS_UNIQUE_VALUE_TIME_WINDOW,
        &*METRIC_TIME_WINDOW,
        &*TRACING_TIME_WINDOW,
        &*TIMEFRAME_TYPE,
        &*FLOW_OPERATOR,
    ]
}
