use super::{
    LogsFilterModel, MetricFilterModel, MissingValuesModel, TracingFilterModel,
    UndetectedValuesManagementModel,
};
use alertdef_core::{AlertDefError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Alert type union as declared in configuration.
///
/// Exactly one field may be set. The others stay explicitly `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinitionModel {
    pub logs_immediate: Option<LogsImmediateModel>,
    pub logs_threshold: Option<LogsThresholdModel>,
    pub logs_ratio_threshold: Option<LogsRatioThresholdModel>,
    pub logs_new_value: Option<LogsNewValueModel>,
    pub logs_unique_count: Option<LogsUniqueCountModel>,
    pub logs_anomaly: Option<LogsAnomalyModel>,
    pub logs_time_relative_threshold: Option<LogsTimeRelativeThresholdModel>,
    pub metric_threshold: Option<MetricThresholdModel>,
    pub metric_anomaly: Option<MetricAnomalyModel>,
    pub tracing_immediate: Option<TracingImmediateModel>,
    pub tracing_threshold: Option<TracingThresholdModel>,
    pub flow: Option<FlowModel>,
}

/// The populated member of a [`TypeDefinitionModel`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeVariant<'a> {
    LogsImmediate(&'a LogsImmediateModel),
    LogsThreshold(&'a LogsThresholdModel),
    LogsRatioThreshold(&'a LogsRatioThresholdModel),
    LogsNewValue(&'a LogsNewValueModel),
    LogsUniqueCount(&'a LogsUniqueCountModel),
    LogsAnomaly(&'a LogsAnomalyModel),
    LogsTimeRelativeThreshold(&'a LogsTimeRelativeThresholdModel),
    MetricThreshold(&'a MetricThresholdModel),
    MetricAnomaly(&'a MetricAnomalyModel),
    TracingImmediate(&'a TracingImmediateModel),
    TracingThreshold(&'a TracingThresholdModel),
    Flow(&'a FlowModel),
}

impl TypeVariant<'_> {
    /// Attribute name of the variant
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

impl TypeDefinitionModel {
    /// All populated variants, in declaration order
    #[must_use]
    pub fn populated(&self) -> Vec<TypeVariant<'_>> {
        let mut populated = Vec::new();
        if let Some(v) = &self.logs_immediate {
            populated.push(TypeVariant::LogsImmediate(v));
        }
        if let Some(v) = &self.logs_threshold {
            populated.push(TypeVariant::LogsThreshold(v));
        }
        if let Some(v) = &self.logs_ratio_threshold {
            populated.push(TypeVariant::LogsRatioThreshold(v));
        }
        if let Some(v) = &self.logs_new_value {
            populated.push(TypeVariant::LogsNewValue(v));
        }
        if let Some(v) = &self.logs_unique_count {
            populated.push(TypeVariant::LogsUniqueCount(v));
        }
        if let Some(v) = &self.logs_anomaly {
            populated.push(TypeVariant::LogsAnomaly(v));
        }
        if let Some(v) = &self.logs_time_relative_threshold {
            populated.push(TypeVariant::LogsTimeRelativeThreshold(v));
        }
        if let Some(v) = &self.metric_threshold {
            populated.push(TypeVariant::MetricThreshold(v));
        }
        if let Some(v) = &self.metric_anomaly {
            populated.push(TypeVariant::MetricAnomaly(v));
        }
        if let Some(v) = &self.tracing_immediate {
            populated.push(TypeVariant::TracingImmediate(v));
        }
        if let Some(v) = &self.tracing_threshold {
            populated.push(TypeVariant::TracingThreshold(v));
        }
        if let Some(v) = &self.flow {
            populated.push(TypeVariant::Flow(v));
        }
        populated
    }

    /// The single populated variant.
    ///
    /// Fails with [`AlertDefError::InvalidConfiguration`] when none or several are set.
    pub fn variant(&self) -> Result<TypeVariant<'_>> {
        let populated = self.populated();
        match populated.as_slice() {
            [single] => Ok(*single),
            [] => Err(AlertDefError::invalid(
                "type_definition",
                "exactly one alert type is required, none is set",
            )),
            many => {
                let tags: Vec<&str> = many.iter().map(TypeVariant::tag).collect();
                Err(AlertDefError::invalid(
                    "type_definition",
                    format!(
                        "exactly one alert type is required, found {}: {}",
                        tags.len(),
                        tags.join(", ")
                    ),
                ))
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsImmediateModel {
    pub logs_filter: Option<LogsFilterModel>,
    pub notification_payload_filter: Option<BTreeSet<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsThresholdModel {
    pub logs_filter: Option<LogsFilterModel>,
    pub undetected_values_management: Option<UndetectedValuesManagementModel>,
    pub rules: Vec<ThresholdRuleModel>,
    pub notification_payload_filter: Option<BTreeSet<String>>,
}

/// Rule shared by logs threshold and ratio alerts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRuleModel {
    pub threshold: Option<f64>,
    pub time_window: String,
    pub condition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsRatioThresholdModel {
    pub numerator: Option<LogsFilterModel>,
    pub numerator_alias: Option<String>,
    pub denominator: Option<LogsFilterModel>,
    pub denominator_alias: Option<String>,
    pub rules: Vec<ThresholdRuleModel>,
    /// `Both`, `Numerator Only` or `Denominator Only`
    pub group_by_for: Option<String>,
    pub notification_payload_filter: Option<BTreeSet<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsNewValueModel {
    pub logs_filter: Option<LogsFilterModel>,
    pub rules: Vec<NewValueRuleModel>,
    pub notification_payload_filter: Option<BTreeSet<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewValueRuleModel {
    pub keypath_to_track: Option<String>,
    pub time_window: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsUniqueCountModel {
    pub logs_filter: Option<LogsFilterModel>,
    pub rules: Vec<UniqueCountRuleModel>,
    pub unique_count_keypath: Option<String>,
    pub max_unique_count_per_group_by_key: Option<i64>,
    pub notification_payload_filter: Option<BTreeSet<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueCountRuleModel {
    pub max_unique_count: Option<i64>,
    pub time_window: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsAnomalyModel {
    pub logs_filter: Option<LogsFilterModel>,
    pub rules: Vec<LogsAnomalyRuleModel>,
    pub notification_payload_filter: Option<BTreeSet<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsAnomalyRuleModel {
    pub minimum_threshold: Option<f64>,
    pub time_window: String,
    pub condition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsTimeRelativeThresholdModel {
    pub logs_filter: Option<LogsFilterModel>,
    pub rules: Vec<TimeRelativeRuleModel>,
    pub ignore_infinity: Option<bool>,
    pub undetected_values_management: Option<UndetectedValuesManagementModel>,
    pub notification_payload_filter: Option<BTreeSet<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeRelativeRuleModel {
    pub threshold: Option<f64>,
    pub compared_to: String,
    pub condition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricThresholdModel {
    pub metric_filter: Option<MetricFilterModel>,
    pub rules: Vec<MetricThresholdRuleModel>,
    pub undetected_values_management: Option<UndetectedValuesManagementModel>,
    pub missing_values: Option<MissingValuesModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricThresholdRuleModel {
    pub threshold: Option<f64>,
    pub for_over_pct: Option<i64>,
    pub of_the_last: String,
    pub condition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricAnomalyModel {
    pub metric_filter: Option<MetricFilterModel>,
    pub rules: Vec<MetricAnomalyRuleModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricAnomalyRuleModel {
    pub threshold: Option<f64>,
    pub for_over_pct: Option<i64>,
    pub of_the_last: String,
    pub min_non_null_values_pct: Option<i64>,
    pub condition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracingImmediateModel {
    pub tracing_filter: Option<TracingFilterModel>,
    pub notification_payload_filter: Option<BTreeSet<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TracingThresholdModel {
    pub tracing_filter: Option<TracingFilterModel>,
    pub rules: Vec<TracingThresholdRuleModel>,
    pub notification_payload_filter: Option<BTreeSet<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TracingThresholdRuleModel {
    pub span_amount: Option<f64>,
    pub time_window: String,
    pub condition: String,
}

/// Stages are evaluated in declared order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowModel {
    pub stages: Vec<FlowStageModel>,
    pub enforce_suppression: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowStageModel {
    pub flow_stages_groups: Vec<FlowStagesGroupModel>,
    pub timeframe_ms: Option<i64>,
    /// `Unspecified` or `Up To`
    pub timeframe_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowStagesGroupModel {
    pub alert_defs: BTreeSet<FlowAlertDefModel>,
    /// `AND` or `OR`
    pub next_op: Option<String>,
    /// `AND` or `OR`
    pub alerts_op: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FlowAlertDefModel {
    pub id: String,
    pub not: Option<bool>,
}
