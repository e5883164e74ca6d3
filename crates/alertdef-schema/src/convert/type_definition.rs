//! Dispatch between the configuration type union and the domain oneof.
//!
//! Expanding requires exactly one populated variant. Flattening populates the
//! matching variant and leaves every other one explicitly unset.

use super::enums::{
    EnumTable, COMPARED_TO, FLOW_OPERATOR, GROUP_BY_FOR, LOGS_ANOMALY_CONDITION,
    LOGS_NEW_VALUE_TIME_WINDOW, LOGS_RATIO_CONDITION, LOGS_RATIO_TIME_WINDOW,
    LOGS_THRESHOLD_CONDITION, LOGS_TIME_RELATIVE_CONDITION, LOGS_TIME_WINDOW,
    LOGS_UNIQUE_VALUE_TIME_WINDOW, METRIC_ANOMALY_CONDITION, METRIC_THRESHOLD_CONDITION,
    METRIC_TIME_WINDOW, TIMEFRAME_TYPE, TRACING_THRESHOLD_CONDITION, TRACING_TIME_WINDOW,
};
use super::filters::{
    expand_logs_filter, expand_metric_filter, expand_missing_values, expand_tracing_filter,
    expand_undetected_values, flatten_logs_filter, flatten_metric_filter, flatten_missing_values,
    flatten_tracing_filter, flatten_undetected_values,
};
use super::primitives::{
    child, expand_percentage, expand_string_set, flatten_percentage, flatten_string_set, index,
};
use crate::diagnostics::Diagnostics;
use crate::model::{
    FlowAlertDefModel, FlowModel, FlowStageModel, FlowStagesGroupModel, LogsAnomalyModel,
    LogsAnomalyRuleModel, LogsImmediateModel, LogsNewValueModel, LogsRatioThresholdModel,
    LogsThresholdModel, LogsTimeRelativeThresholdModel, LogsUniqueCountModel, MetricAnomalyModel,
    MetricAnomalyRuleModel, MetricThresholdModel, MetricThresholdRuleModel, NewValueRuleModel,
    ThresholdRuleModel, TimeRelativeRuleModel, TracingImmediateModel, TracingThresholdModel,
    TracingThresholdRuleModel, TypeDefinitionModel, TypeVariant, UniqueCountRuleModel,
};
use alertdef_core::{
    flow_operator, group_by_for, timeframe_type, AlertDefError, Flow, FlowStage, FlowStagesGroup,
    FlowStagesGroupsAlertDef, LogsAnomaly, LogsAnomalyRule, LogsImmediate, LogsNewValue,
    LogsNewValueRule, LogsRatioRule, LogsRatioThreshold, LogsThreshold, LogsThresholdRule,
    LogsTimeRelativeRule, LogsTimeRelativeThreshold, LogsUniqueCount, LogsUniqueCountRule,
    MetricAnomaly, MetricAnomalyRule, MetricThreshold, MetricThresholdRule, Result,
    TracingImmediate, TracingThreshold, TracingThresholdRule, TypeDefinition,
};
use std::collections::BTreeSet;

const ROOT: &str = "type_definition";

/// Expand the single populated variant
pub fn expand_type_definition(
    model: Option<&TypeDefinitionModel>,
    diags: &mut Diagnostics,
) -> Result<TypeDefinition> {
    let model = model.ok_or_else(|| {
        AlertDefError::invalid(ROOT, "exactly one alert type is required, none is set")
    })?;
    let variant = model.variant()?;
    let path = child(ROOT, variant.tag());

    Ok(match variant {
        TypeVariant::LogsImmediate(m) => {
            TypeDefinition::LogsImmediate(expand_logs_immediate(m, &path, diags)?)
        }
        TypeVariant::LogsThreshold(m) => {
            TypeDefinition::LogsThreshold(expand_logs_threshold(m, &path, diags)?)
        }
        TypeVariant::LogsRatioThreshold(m) => {
            TypeDefinition::LogsRatioThreshold(expand_logs_ratio_threshold(m, &path, diags)?)
        }
        TypeVariant::LogsNewValue(m) => {
            TypeDefinition::LogsNewValue(expand_logs_new_value(m, &path, diags)?)
        }
        TypeVariant::LogsUniqueCount(m) => {
            TypeDefinition::LogsUniqueCount(expand_logs_unique_count(m, &path, diags)?)
        }
        TypeVariant::LogsAnomaly(m) => {
            TypeDefinition::LogsAnomaly(expand_logs_anomaly(m, &path, diags)?)
        }
        TypeVariant::LogsTimeRelativeThreshold(m) => TypeDefinition::LogsTimeRelativeThreshold(
            expand_logs_time_relative_threshold(m, &path, diags)?,
        ),
        TypeVariant::MetricThreshold(m) => {
            TypeDefinition::MetricThreshold(expand_metric_threshold(m, &path)?)
        }
        TypeVariant::MetricAnomaly(m) => {
            TypeDefinition::MetricAnomaly(expand_metric_anomaly(m, &path)?)
        }
        TypeVariant::TracingImmediate(m) => {
            TypeDefinition::TracingImmediate(expand_tracing_immediate(m, &path, diags)?)
        }
        TypeVariant::TracingThreshold(m) => {
            TypeDefinition::TracingThreshold(expand_tracing_threshold(m, &path, diags)?)
        }
        TypeVariant::Flow(m) => TypeDefinition::Flow(expand_flow(m, &path)?),
    })
}

/// Flatten into a union with exactly one populated member
pub fn flatten_type_definition(definition: &TypeDefinition) -> Result<TypeDefinitionModel> {
    let empty = TypeDefinitionModel::default();
    Ok(match definition {
        TypeDefinition::LogsImmediate(d) => TypeDefinitionModel {
            logs_immediate: Some(flatten_logs_immediate(d)?),
            ..empty
        },
        TypeDefinition::LogsThreshold(d) => TypeDefinitionModel {
            logs_threshold: Some(flatten_logs_threshold(d)?),
            ..empty
        },
        TypeDefinition::LogsRatioThreshold(d) => TypeDefinitionModel {
            logs_ratio_threshold: Some(flatten_logs_ratio_threshold(d)?),
            ..empty
        },
        TypeDefinition::LogsNewValue(d) => TypeDefinitionModel {
            logs_new_value: Some(flatten_logs_new_value(d)?),
            ..empty
        },
        TypeDefinition::LogsUniqueCount(d) => TypeDefinitionModel {
            logs_unique_count: Some(flatten_logs_unique_count(d)?),
            ..empty
        },
        TypeDefinition::LogsAnomaly(d) => TypeDefinitionModel {
            logs_anomaly: Some(flatten_logs_anomaly(d)?),
            ..empty
        },
        TypeDefinition::LogsTimeRelativeThreshold(d) => TypeDefinitionModel {
            logs_time_relative_threshold: Some(flatten_logs_time_relative_threshold(d)?),
            ..empty
        },
        TypeDefinition::MetricThreshold(d) => TypeDefinitionModel {
            metric_threshold: Some(flatten_metric_threshold(d)?),
            ..empty
        },
        TypeDefinition::MetricAnomaly(d) => TypeDefinitionModel {
            metric_anomaly: Some(flatten_metric_anomaly(d)?),
            ..empty
        },
        TypeDefinition::TracingImmediate(d) => TypeDefinitionModel {
            tracing_immediate: Some(flatten_tracing_immediate(d)?),
            ..empty
        },
        TypeDefinition::TracingThreshold(d) => TypeDefinitionModel {
            tracing_threshold: Some(flatten_tracing_threshold(d)?),
            ..empty
        },
        TypeDefinition::Flow(d) => TypeDefinitionModel {
            flow: Some(flatten_flow(d)?),
            ..empty
        },
    })
}

/// Expand an ordered, non-empty rule list
fn expand_rules<M, D>(
    rules: &[M],
    path: &str,
    mut expand: impl FnMut(&M, &str) -> Result<D>,
) -> Result<Vec<D>> {
    let path = child(path, "rules");
    if rules.is_empty() {
        return Err(AlertDefError::invalid(path, "at least one rule is required"));
    }
    rules
        .iter()
        .enumerate()
        .map(|(i, rule)| expand(rule, &index(&path, i)))
        .collect()
}

/// Backend rules to configuration; an empty list would not expand again
fn flatten_rules<D, M>(
    rules: &[D],
    field: &str,
    flatten: impl FnMut(&D) -> Result<M>,
) -> Result<Vec<M>> {
    if rules.is_empty() {
        return Err(AlertDefError::unmapped(field, "[]"));
    }
    rules.iter().map(flatten).collect()
}

fn lookup(table: &EnumTable, value: &str, path: &str, field: &str) -> Result<i32> {
    table.to_domain(value, &child(path, field))
}

/// Optional enumeration, unset maps to the table's zero code
fn lookup_or_default(
    table: &EnumTable,
    value: Option<&str>,
    path: &str,
    field: &str,
    default: i32,
) -> Result<i32> {
    value.map_or(Ok(default), |value| lookup(table, value, path, field))
}

fn expand_logs_immediate(
    m: &LogsImmediateModel,
    path: &str,
    diags: &mut Diagnostics,
) -> Result<LogsImmediate> {
    Ok(LogsImmediate {
        logs_filter: expand_logs_filter(m.logs_filter.as_ref(), &child(path, "logs_filter"), diags)?,
        notification_payload_filter: expand_string_set(m.notification_payload_filter.as_ref()),
    })
}

fn flatten_logs_immediate(d: &LogsImmediate) -> Result<LogsImmediateModel> {
    Ok(LogsImmediateModel {
        logs_filter: flatten_logs_filter(d.logs_filter.as_ref())?,
        notification_payload_filter: flatten_string_set(&d.notification_payload_filter),
    })
}

fn expand_logs_threshold(
    m: &LogsThresholdModel,
    path: &str,
    diags: &mut Diagnostics,
) -> Result<LogsThreshold> {
    Ok(LogsThreshold {
        logs_filter: expand_logs_filter(m.logs_filter.as_ref(), &child(path, "logs_filter"), diags)?,
        undetected_values_management: expand_undetected_values(
            m.undetected_values_management.as_ref(),
            &child(path, "undetected_values_management"),
        )?,
        rules: expand_rules(&m.rules, path, |rule: &ThresholdRuleModel, path| {
            Ok(LogsThresholdRule {
                threshold: rule.threshold,
                time_window: lookup(&LOGS_TIME_WINDOW, &rule.time_window, path, "time_window")?,
                condition_type: lookup(&LOGS_THRESHOLD_CONDITION, &rule.condition, path, "condition")?,
            })
        })?,
        notification_payload_filter: expand_string_set(m.notification_payload_filter.as_ref()),
    })
}

fn flatten_logs_threshold(d: &LogsThreshold) -> Result<LogsThresholdModel> {
    Ok(LogsThresholdModel {
        logs_filter: flatten_logs_filter(d.logs_filter.as_ref())?,
        undetected_values_management: flatten_undetected_values(
            d.undetected_values_management.as_ref(),
        )?,
        rules: flatten_rules(&d.rules, "logs_threshold.rules", |rule| {
            Ok(ThresholdRuleModel {
                threshold: rule.threshold,
                time_window: LOGS_TIME_WINDOW.to_config(rule.time_window)?,
                condition: LOGS_THRESHOLD_CONDITION.to_config(rule.condition_type)?,
            })
        })?,
        notification_payload_filter: flatten_string_set(&d.notification_payload_filter),
    })
}

fn expand_logs_ratio_threshold(
    m: &LogsRatioThresholdModel,
    path: &str,
    diags: &mut Diagnostics,
) -> Result<LogsRatioThreshold> {
    Ok(LogsRatioThreshold {
        numerator: expand_logs_filter(m.numerator.as_ref(), &child(path, "numerator"), diags)?,
        numerator_alias: m.numerator_alias.clone(),
        denominator: expand_logs_filter(m.denominator.as_ref(), &child(path, "denominator"), diags)?,
        denominator_alias: m.denominator_alias.clone(),
        rules: expand_rules(&m.rules, path, |rule: &ThresholdRuleModel, path| {
            Ok(LogsRatioRule {
                threshold: rule.threshold,
                time_window: lookup(&LOGS_RATIO_TIME_WINDOW, &rule.time_window, path, "time_window")?,
                condition_type: lookup(&LOGS_RATIO_CONDITION, &rule.condition, path, "condition")?,
            })
        })?,
        group_by_for: lookup_or_default(
            &GROUP_BY_FOR,
            m.group_by_for.as_deref(),
            path,
            "group_by_for",
            group_by_for::BOTH_OR_UNSPECIFIED,
        )?,
        notification_payload_filter: expand_string_set(m.notification_payload_filter.as_ref()),
    })
}

fn flatten_logs_ratio_threshold(d: &LogsRatioThreshold) -> Result<LogsRatioThresholdModel> {
    Ok(LogsRatioThresholdModel {
        numerator: flatten_logs_filter(d.numerator.as_ref())?,
        numerator_alias: d.numerator_alias.clone(),
        denominator: flatten_logs_filter(d.denominator.as_ref())?,
        denominator_alias: d.denominator_alias.clone(),
        rules: flatten_rules(&d.rules, "logs_ratio_threshold.rules", |rule| {
            Ok(ThresholdRuleModel {
                threshold: rule.threshold,
                time_window: LOGS_RATIO_TIME_WINDOW.to_config(rule.time_window)?,
                condition: LOGS_RATIO_CONDITION.to_config(rule.condition_type)?,
            })
        })?,
        group_by_for: Some(GROUP_BY_FOR.to_config(d.group_by_for)?),
        notification_payload_filter: flatten_string_set(&d.notification_payload_filter),
    })
}

fn expand_logs_new_value(
    m: &LogsNewValueModel,
    path: &str,
    diags: &mut Diagnostics,
) -> Result<LogsNewValue> {
    Ok(LogsNewValue {
        logs_filter: expand_logs_filter(m.logs_filter.as_ref(), &child(path, "logs_filter"), diags)?,
        rules: expand_rules(&m.rules, path, |rule: &NewValueRuleModel, path| {
            Ok(LogsNewValueRule {
                keypath_to_track: rule.keypath_to_track.clone(),
                time_window: lookup(
                    &LOGS_NEW_VALUE_TIME_WINDOW,
                    &rule.time_window,
                    path,
                    "time_window",
                )?,
            })
        })?,
        notification_payload_filter: expand_string_set(m.notification_payload_filter.as_ref()),
    })
}

fn flatten_logs_new_value(d: &LogsNewValue) -> Result<LogsNewValueModel> {
    Ok(LogsNewValueModel {
        logs_filter: flatten_logs_filter(d.logs_filter.as_ref())?,
        rules: flatten_rules(&d.rules, "logs_new_value.rules", |rule| {
            Ok(NewValueRuleModel {
                keypath_to_track: rule.keypath_to_track.clone(),
                time_window: LOGS_NEW_VALUE_TIME_WINDOW.to_config(rule.time_window)?,
            })
        })?,
        notification_payload_filter: flatten_string_set(&d.notification_payload_filter),
    })
}

fn expand_logs_unique_count(
    m: &LogsUniqueCountModel,
    path: &str,
    diags: &mut Diagnostics,
) -> Result<LogsUniqueCount> {
    Ok(LogsUniqueCount {
        logs_filter: expand_logs_filter(m.logs_filter.as_ref(), &child(path, "logs_filter"), diags)?,
        rules: expand_rules(&m.rules, path, |rule: &UniqueCountRuleModel, path| {
            Ok(LogsUniqueCountRule {
                max_unique_count: rule.max_unique_count,
                time_window: lookup(
                    &LOGS_UNIQUE_VALUE_TIME_WINDOW,
                    &rule.time_window,
                    path,
                    "time_window",
                )?,
            })
        })?,
        unique_count_keypath: m.unique_count_keypath.clone(),
        max_unique_count_per_group_by_key: m.max_unique_count_per_group_by_key,
        notification_payload_filter: expand_string_set(m.notification_payload_filter.as_ref()),
    })
}

fn flatten_logs_unique_count(d: &LogsUniqueCount) -> Result<LogsUniqueCountModel> {
    Ok(LogsUniqueCountModel {
        logs_filter: flatten_logs_filter(d.logs_filter.as_ref())?,
        rules: flatten_rules(&d.rules, "logs_unique_count.rules", |rule| {
            Ok(UniqueCountRuleModel {
                max_unique_count: rule.max_unique_count,
                time_window: LOGS_UNIQUE_VALUE_TIME_WINDOW.to_config(rule.time_window)?,
            })
        })?,
        unique_count_keypath: d.unique_count_keypath.clone(),
        max_unique_count_per_group_by_key: d.max_unique_count_per_group_by_key,
        notification_payload_filter: flatten_string_set(&d.notification_payload_filter),
    })
}

fn expand_logs_anomaly(
    m: &LogsAnomalyModel,
    path: &str,
    diags: &mut Diagnostics,
) -> Result<LogsAnomaly> {
    Ok(LogsAnomaly {
        logs_filter: expand_logs_filter(m.logs_filter.as_ref(), &child(path, "logs_filter"), diags)?,
        rules: expand_rules(&m.rules, path, |rule: &LogsAnomalyRuleModel, path| {
            Ok(LogsAnomalyRule {
                minimum_threshold: rule.minimum_threshold,
                time_window: lookup(&LOGS_TIME_WINDOW, &rule.time_window, path, "time_window")?,
                condition_type: lookup(&LOGS_ANOMALY_CONDITION, &rule.condition, path, "condition")?,
            })
        })?,
        notification_payload_filter: expand_string_set(m.notification_payload_filter.as_ref()),
    })
}

fn flatten_logs_anomaly(d: &LogsAnomaly) -> Result<LogsAnomalyModel> {
    Ok(LogsAnomalyModel {
        logs_filter: flatten_logs_filter(d.logs_filter.as_ref())?,
        rules: flatten_rules(&d.rules, "logs_anomaly.rules", |rule| {
            Ok(LogsAnomalyRuleModel {
                minimum_threshold: rule.minimum_threshold,
                time_window: LOGS_TIME_WINDOW.to_config(rule.time_window)?,
                condition: LOGS_ANOMALY_CONDITION.to_config(rule.condition_type)?,
            })
        })?,
        notification_payload_filter: flatten_string_set(&d.notification_payload_filter),
    })
}

fn expand_logs_time_relative_threshold(
    m: &LogsTimeRelativeThresholdModel,
    path: &str,
    diags: &mut Diagnostics,
) -> Result<LogsTimeRelativeThreshold> {
    Ok(LogsTimeRelativeThreshold {
        logs_filter: expand_logs_filter(m.logs_filter.as_ref(), &child(path, "logs_filter"), diags)?,
        rules: expand_rules(&m.rules, path, |rule: &TimeRelativeRuleModel, path| {
            Ok(LogsTimeRelativeRule {
                threshold: rule.threshold,
                compared_to: lookup(&COMPARED_TO, &rule.compared_to, path, "compared_to")?,
                condition_type: lookup(
                    &LOGS_TIME_RELATIVE_CONDITION,
                    &rule.condition,
                    path,
                    "condition",
                )?,
            })
        })?,
        ignore_infinity: m.ignore_infinity,
        undetected_values_management: expand_undetected_values(
            m.undetected_values_management.as_ref(),
            &child(path, "undetected_values_management"),
        )?,
        notification_payload_filter: expand_string_set(m.notification_payload_filter.as_ref()),
    })
}

fn flatten_logs_time_relative_threshold(
    d: &LogsTimeRelativeThreshold,
) -> Result<LogsTimeRelativeThresholdModel> {
    Ok(LogsTimeRelativeThresholdModel {
        logs_filter: flatten_logs_filter(d.logs_filter.as_ref())?,
        rules: flatten_rules(&d.rules, "logs_time_relative_threshold.rules", |rule| {
            Ok(TimeRelativeRuleModel {
                threshold: rule.threshold,
                compared_to: COMPARED_TO.to_config(rule.compared_to)?,
                condition: LOGS_TIME_RELATIVE_CONDITION.to_config(rule.condition_type)?,
            })
        })?,
        ignore_infinity: d.ignore_infinity,
        undetected_values_management: flatten_undetected_values(
            d.undetected_values_management.as_ref(),
        )?,
        notification_payload_filter: flatten_string_set(&d.notification_payload_filter),
    })
}

fn expand_metric_threshold(m: &MetricThresholdModel, path: &str) -> Result<MetricThreshold> {
    Ok(MetricThreshold {
        metric_filter: expand_metric_filter(m.metric_filter.as_ref()),
        rules: expand_rules(&m.rules, path, |rule: &MetricThresholdRuleModel, path| {
            Ok(MetricThresholdRule {
                threshold: rule.threshold,
                for_over_pct: expand_percentage(rule.for_over_pct, &child(path, "for_over_pct"))?,
                of_the_last: lookup(&METRIC_TIME_WINDOW, &rule.of_the_last, path, "of_the_last")?,
                condition_type: lookup(
                    &METRIC_THRESHOLD_CONDITION,
                    &rule.condition,
                    path,
                    "condition",
                )?,
            })
        })?,
        undetected_values_management: expand_undetected_values(
            m.undetected_values_management.as_ref(),
            &child(path, "undetected_values_management"),
        )?,
        missing_values: expand_missing_values(
            m.missing_values.as_ref(),
            &child(path, "missing_values"),
        )?,
    })
}

fn flatten_metric_threshold(d: &MetricThreshold) -> Result<MetricThresholdModel> {
    Ok(MetricThresholdModel {
        metric_filter: flatten_metric_filter(d.metric_filter.as_ref()),
        rules: flatten_rules(&d.rules, "metric_threshold.rules", |rule| {
            Ok(MetricThresholdRuleModel {
                threshold: rule.threshold,
                for_over_pct: flatten_percentage(
                    rule.for_over_pct,
                    "metric_threshold.rules.for_over_pct",
                )?,
                of_the_last: METRIC_TIME_WINDOW.to_config(rule.of_the_last)?,
                condition: METRIC_THRESHOLD_CONDITION.to_config(rule.condition_type)?,
            })
        })?,
        undetected_values_management: flatten_undetected_values(
            d.undetected_values_management.as_ref(),
        )?,
        missing_values: flatten_missing_values(d.missing_values.as_ref())?,
    })
}

fn expand_metric_anomaly(m: &MetricAnomalyModel, path: &str) -> Result<MetricAnomaly> {
    Ok(MetricAnomaly {
        metric_filter: expand_metric_filter(m.metric_filter.as_ref()),
        rules: expand_rules(&m.rules, path, |rule: &MetricAnomalyRuleModel, path| {
            Ok(MetricAnomalyRule {
                threshold: rule.threshold,
                for_over_pct: expand_percentage(rule.for_over_pct, &child(path, "for_over_pct"))?,
                of_the_last: lookup(&METRIC_TIME_WINDOW, &rule.of_the_last, path, "of_the_last")?,
                min_non_null_values_pct: expand_percentage(
                    rule.min_non_null_values_pct,
                    &child(path, "min_non_null_values_pct"),
                )?,
                condition_type: lookup(&METRIC_ANOMALY_CONDITION, &rule.condition, path, "condition")?,
            })
        })?,
    })
}

fn flatten_metric_anomaly(d: &MetricAnomaly) -> Result<MetricAnomalyModel> {
    Ok(MetricAnomalyModel {
        metric_filter: flatten_metric_filter(d.metric_filter.as_ref()),
        rules: flatten_rules(&d.rules, "metric_anomaly.rules", |rule| {
            Ok(MetricAnomalyRuleModel {
                threshold: rule.threshold,
                for_over_pct: flatten_percentage(
                    rule.for_over_pct,
                    "metric_anomaly.rules.for_over_pct",
                )?,
                of_the_last: METRIC_TIME_WINDOW.to_config(rule.of_the_last)?,
                min_non_null_values_pct: flatten_percentage(
                    rule.min_non_null_values_pct,
                    "metric_anomaly.rules.min_non_null_values_pct",
                )?,
                condition: METRIC_ANOMALY_CONDITION.to_config(rule.condition_type)?,
            })
        })?,
    })
}

fn expand_tracing_immediate(
    m: &TracingImmediateModel,
    path: &str,
    diags: &mut Diagnostics,
) -> Result<TracingImmediate> {
    Ok(TracingImmediate {
        tracing_filter: expand_tracing_filter(
            m.tracing_filter.as_ref(),
            &child(path, "tracing_filter"),
            diags,
        )?,
        notification_payload_filter: expand_string_set(m.notification_payload_filter.as_ref()),
    })
}

fn flatten_tracing_immediate(d: &TracingImmediate) -> Result<TracingImmediateModel> {
    Ok(TracingImmediateModel {
        tracing_filter: flatten_tracing_filter(d.tracing_filter.as_ref())?,
        notification_payload_filter: flatten_string_set(&d.notification_payload_filter),
    })
}

fn expand_tracing_threshold(
    m: &TracingThresholdModel,
    path: &str,
    diags: &mut Diagnostics,
) -> Result<TracingThreshold> {
    Ok(TracingThreshold {
        tracing_filter: expand_tracing_filter(
            m.tracing_filter.as_ref(),
            &child(path, "tracing_filter"),
            diags,
        )?,
        rules: expand_rules(&m.rules, path, |rule: &TracingThresholdRuleModel, path| {
            Ok(TracingThresholdRule {
                span_amount: rule.span_amount,
                time_window: lookup(&TRACING_TIME_WINDOW, &rule.time_window, path, "time_window")?,
                condition_type: lookup(
                    &TRACING_THRESHOLD_CONDITION,
                    &rule.condition,
                    path,
                    "condition",
                )?,
            })
        })?,
        notification_payload_filter: expand_string_set(m.notification_payload_filter.as_ref()),
    })
}

fn flatten_tracing_threshold(d: &TracingThreshold) -> Result<TracingThresholdModel> {
    Ok(TracingThresholdModel {
        tracing_filter: flatten_tracing_filter(d.tracing_filter.as_ref())?,
        rules: flatten_rules(&d.rules, "tracing_threshold.rules", |rule| {
            Ok(TracingThresholdRuleModel {
                span_amount: rule.span_amount,
                time_window: TRACING_TIME_WINDOW.to_config(rule.time_window)?,
                condition: TRACING_THRESHOLD_CONDITION.to_config(rule.condition_type)?,
            })
        })?,
        notification_payload_filter: flatten_string_set(&d.notification_payload_filter),
    })
}

/// Stage and group order is kept; alert references pass through unresolved.
fn expand_flow(m: &FlowModel, path: &str) -> Result<Flow> {
    let stages_path = child(path, "stages");
    if m.stages.is_empty() {
        return Err(AlertDefError::invalid(stages_path, "at least one stage is required"));
    }
    let stages = m
        .stages
        .iter()
        .enumerate()
        .map(|(i, stage)| expand_flow_stage(stage, &index(&stages_path, i)))
        .collect::<Result<Vec<_>>>()?;
    Ok(Flow {
        stages,
        enforce_suppression: m.enforce_suppression,
    })
}

fn expand_flow_stage(m: &FlowStageModel, path: &str) -> Result<FlowStage> {
    let groups_path = child(path, "flow_stages_groups");
    if m.flow_stages_groups.is_empty() {
        return Err(AlertDefError::invalid(
            groups_path,
            "at least one stage group is required",
        ));
    }
    let flow_stages_groups = m
        .flow_stages_groups
        .iter()
        .enumerate()
        .map(|(i, group)| expand_flow_group(group, &index(&groups_path, i)))
        .collect::<Result<Vec<_>>>()?;
    Ok(FlowStage {
        flow_stages_groups,
        timeframe_ms: m.timeframe_ms,
        timeframe_type: lookup_or_default(
            &TIMEFRAME_TYPE,
            m.timeframe_type.as_deref(),
            path,
            "timeframe_type",
            timeframe_type::UNSPECIFIED,
        )?,
    })
}

fn expand_flow_group(m: &FlowStagesGroupModel, path: &str) -> Result<FlowStagesGroup> {
    Ok(FlowStagesGroup {
        alert_defs: m
            .alert_defs
            .iter()
            .map(|alert| FlowStagesGroupsAlertDef {
                id: Some(alert.id.clone()),
                not: alert.not,
            })
            .collect(),
        next_op: lookup_or_default(
            &FLOW_OPERATOR,
            m.next_op.as_deref(),
            path,
            "next_op",
            flow_operator::AND_OR_UNSPECIFIED,
        )?,
        alerts_op: lookup_or_default(
            &FLOW_OPERATOR,
            m.alerts_op.as_deref(),
            path,
            "alerts_op",
            flow_operator::AND_OR_UNSPECIFIED,
        )?,
    })
}

fn flatten_flow(d: &Flow) -> Result<FlowModel> {
    if d.stages.is_empty() {
        return Err(AlertDefError::unmapped("flow.stages", "[]"));
    }
    let stages = d
        .stages
        .iter()
        .map(|stage| -> Result<FlowStageModel> {
            if stage.flow_stages_groups.is_empty() {
                return Err(AlertDefError::unmapped("flow.stages.flow_stages_groups", "[]"));
            }
            Ok(FlowStageModel {
                flow_stages_groups: stage
                    .flow_stages_groups
                    .iter()
                    .map(flatten_flow_group)
                    .collect::<Result<Vec<_>>>()?,
                timeframe_ms: stage.timeframe_ms,
                timeframe_type: Some(TIMEFRAME_TYPE.to_config(stage.timeframe_type)?),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(FlowModel {
        stages,
        enforce_suppression: d.enforce_suppression,
    })
}

fn flatten_flow_group(d: &FlowStagesGroup) -> Result<FlowStagesGroupModel> {
    let alert_defs = d
        .alert_defs
        .iter()
        .map(|alert| {
            alert
                .id
                .clone()
                .map(|id| FlowAlertDefModel { id, not: alert.not })
                .ok_or_else(|| AlertDefError::unmapped("flow alert_defs.id", "null"))
        })
        .collect::<Result<BTreeSet<_>>>()?;
    Ok(FlowStagesGroupModel {
        alert_defs,
        next_op: Some(FLOW_OPERATOR.to_config(d.next_op)?),
        alerts_op: Some(FLOW_OPERATOR.to_config(d.alerts_op)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        LabelFilterModel, LabelFiltersModel, LogsFilterModel, LogsSimpleFilterModel,
        MetricFilterModel, MissingValuesModel, TracingFilterModel, TracingFilterTypeModel,
        TracingLabelFiltersModel, UndetectedValuesManagementModel,
    };
    use alertdef_core::{condition, logs_time_window};

    fn query(q: &str) -> Option<LogsFilterModel> {
        Some(LogsFilterModel {
            simple_filter: Some(LogsSimpleFilterModel {
                lucene_query: Some(q.to_string()),
                label_filters: None,
            }),
        })
    }

    fn payload(keys: &[&str]) -> Option<BTreeSet<String>> {
        Some(keys.iter().map(ToString::to_string).collect())
    }

    /// Expanding then flattening a flattened model gives it back unchanged.
    fn assert_round_trip(model: TypeDefinitionModel) {
        let mut diags = Diagnostics::new();
        let domain = expand_type_definition(Some(&model), &mut diags).unwrap();
        let flattened = flatten_type_definition(&domain).unwrap();
        assert_eq!(flattened, model);

        let again = expand_type_definition(Some(&flattened), &mut diags).unwrap();
        assert_eq!(again, domain);
    }

    fn every_variant() -> Vec<TypeDefinitionModel> {
        let empty = TypeDefinitionModel::default;
        vec![
            TypeDefinitionModel {
                logs_immediate: Some(LogsImmediateModel {
                    logs_filter: query("level:error"),
                    notification_payload_filter: payload(&["message", "host"]),
                }),
                ..empty()
            },
            TypeDefinitionModel {
                logs_threshold: Some(LogsThresholdModel {
                    logs_filter: Some(LogsFilterModel {
                        simple_filter: Some(LogsSimpleFilterModel {
                            lucene_query: None,
                            label_filters: Some(LabelFiltersModel {
                                application_name: Some(
                                    [LabelFilterModel::single("IS", "checkout")].into(),
                                ),
                                subsystem_name: None,
                                severities: Some(["Error".to_string()].into()),
                            }),
                        }),
                    }),
                    undetected_values_management: Some(UndetectedValuesManagementModel {
                        trigger_undetected_values: Some(true),
                        auto_retire_timeframe: Some("NEVER".into()),
                    }),
                    rules: vec![
                        ThresholdRuleModel {
                            threshold: Some(100.0),
                            time_window: "10_MINUTES".into(),
                            condition: "MORE_THAN".into(),
                        },
                        ThresholdRuleModel {
                            threshold: Some(1.0),
                            time_window: "1_HOUR".into(),
                            condition: "LESS_THAN".into(),
                        },
                    ],
                    notification_payload_filter: None,
                }),
                ..empty()
            },
            TypeDefinitionModel {
                logs_ratio_threshold: Some(LogsRatioThresholdModel {
                    numerator: query("status:5*"),
                    numerator_alias: Some("errors".into()),
                    denominator: query("*"),
                    denominator_alias: Some("all".into()),
                    rules: vec![ThresholdRuleModel {
                        threshold: Some(0.05),
                        time_window: "4_HOURS".into(),
                        condition: "MORE_THAN".into(),
                    }],
                    group_by_for: Some("Denominator Only".into()),
                    notification_payload_filter: None,
                }),
                ..empty()
            },
            TypeDefinitionModel {
                logs_new_value: Some(LogsNewValueModel {
                    logs_filter: query("*"),
                    rules: vec![NewValueRuleModel {
                        keypath_to_track: Some("remote_addr.geoip.country".into()),
                        time_window: "1_WEEK".into(),
                    }],
                    notification_payload_filter: None,
                }),
                ..empty()
            },
            TypeDefinitionModel {
                logs_unique_count: Some(LogsUniqueCountModel {
                    logs_filter: None,
                    rules: vec![UniqueCountRuleModel {
                        max_unique_count: Some(20),
                        time_window: "1_MINUTE".into(),
                    }],
                    unique_count_keypath: Some("user_id".into()),
                    max_unique_count_per_group_by_key: Some(5),
                    notification_payload_filter: None,
                }),
                ..empty()
            },
            TypeDefinitionModel {
                logs_anomaly: Some(LogsAnomalyModel {
                    logs_filter: query("service:api"),
                    rules: vec![LogsAnomalyRuleModel {
                        minimum_threshold: Some(10.0),
                        time_window: "30_MINUTES".into(),
                        condition: "MORE_THAN_USUAL".into(),
                    }],
                    notification_payload_filter: None,
                }),
                ..empty()
            },
            TypeDefinitionModel {
                logs_time_relative_threshold: Some(LogsTimeRelativeThresholdModel {
                    logs_filter: query("*"),
                    rules: vec![TimeRelativeRuleModel {
                        threshold: Some(2.0),
                        compared_to: "Same Day Last Week".into(),
                        condition: "LESS_THAN".into(),
                    }],
                    ignore_infinity: Some(true),
                    undetected_values_management: None,
                    notification_payload_filter: None,
                }),
                ..empty()
            },
            TypeDefinitionModel {
                metric_threshold: Some(MetricThresholdModel {
                    metric_filter: Some(MetricFilterModel {
                        promql: Some("avg(cpu_usage) by (host)".into()),
                    }),
                    rules: vec![MetricThresholdRuleModel {
                        threshold: Some(90.0),
                        for_over_pct: Some(50),
                        of_the_last: "15_MINUTES".into(),
                        condition: "MORE_THAN_OR_EQUALS".into(),
                    }],
                    undetected_values_management: None,
                    missing_values: Some(MissingValuesModel {
                        replace_with_zero: Some(true),
                        min_non_null_values_pct: None,
                    }),
                }),
                ..empty()
            },
            TypeDefinitionModel {
                metric_anomaly: Some(MetricAnomalyModel {
                    metric_filter: Some(MetricFilterModel {
                        promql: Some("sum(rate(requests_total[5m]))".into()),
                    }),
                    rules: vec![MetricAnomalyRuleModel {
                        threshold: Some(3.0),
                        for_over_pct: Some(20),
                        of_the_last: "1_HOUR".into(),
                        min_non_null_values_pct: Some(80),
                        condition: "LESS_THAN_USUAL".into(),
                    }],
                }),
                ..empty()
            },
            TypeDefinitionModel {
                tracing_immediate: Some(TracingImmediateModel {
                    tracing_filter: Some(TracingFilterModel {
                        latency_threshold_ms: Some(500),
                        tracing_label_filters: None,
                    }),
                    notification_payload_filter: None,
                }),
                ..empty()
            },
            TypeDefinitionModel {
                tracing_threshold: Some(TracingThresholdModel {
                    tracing_filter: Some(TracingFilterModel {
                        latency_threshold_ms: None,
                        tracing_label_filters: Some(TracingLabelFiltersModel {
                            operation_name: Some(
                                [TracingFilterTypeModel {
                                    operation: "IS".into(),
                                    values: ["GET /cart".to_string()].into(),
                                }]
                                .into(),
                            ),
                            span_fields: Some(
                                [(
                                    "http.method".to_string(),
                                    TracingFilterTypeModel {
                                        operation: "IS".into(),
                                        values: ["POST".to_string()].into(),
                                    },
                                )]
                                .into(),
                            ),
                            ..Default::default()
                        }),
                    }),
                    rules: vec![TracingThresholdRuleModel {
                        span_amount: Some(25.0),
                        time_window: "5_MINUTES".into(),
                        condition: "MORE_THAN".into(),
                    }],
                    notification_payload_filter: payload(&["trace_id"]),
                }),
                ..empty()
            },
            TypeDefinitionModel {
                flow: Some(flow_model()),
                ..empty()
            },
        ]
    }

    fn flow_model() -> FlowModel {
        let group = |ids: &[&str], next: &str| FlowStagesGroupModel {
            alert_defs: ids
                .iter()
                .map(|id| FlowAlertDefModel {
                    id: (*id).to_string(),
                    not: Some(false),
                })
                .collect(),
            next_op: Some(next.to_string()),
            alerts_op: Some("AND".into()),
        };
        FlowModel {
            stages: vec![
                FlowStageModel {
                    flow_stages_groups: vec![group(&["z-alert", "a-alert"], "OR"), group(&["m"], "AND")],
                    timeframe_ms: Some(60_000),
                    timeframe_type: Some("Up To".into()),
                },
                FlowStageModel {
                    flow_stages_groups: vec![group(&["last"], "AND")],
                    timeframe_ms: None,
                    timeframe_type: Some("Unspecified".into()),
                },
            ],
            enforce_suppression: Some(true),
        }
    }

    #[test]
    fn test_every_variant_round_trips() {
        for model in every_variant() {
            assert_round_trip(model);
        }
    }

    #[test]
    fn test_flatten_leaves_other_variants_unset() {
        for model in every_variant() {
            let mut diags = Diagnostics::new();
            let domain = expand_type_definition(Some(&model), &mut diags).unwrap();
            let flattened = flatten_type_definition(&domain).unwrap();
            assert_eq!(flattened.populated().len(), 1);
            assert_eq!(flattened.variant().unwrap().tag(), domain.tag());
        }
    }

    #[test]
    fn test_zero_or_many_variants_rejected() {
        let mut diags = Diagnostics::new();
        let none = TypeDefinitionModel::default();
        assert!(expand_type_definition(Some(&none), &mut diags)
            .unwrap_err()
            .is_validation_error());
        assert!(expand_type_definition(None, &mut diags)
            .unwrap_err()
            .is_validation_error());

        let variants = every_variant();
        let two = TypeDefinitionModel {
            flow: Some(flow_model()),
            ..variants[0].clone()
        };
        let err = expand_type_definition(Some(&two), &mut diags).unwrap_err();
        assert!(err.is_validation_error());
        assert!(err.to_string().contains("logs_immediate, flow"));
    }

    #[test]
    fn test_logs_threshold_rejects_inclusive_condition() {
        let model = TypeDefinitionModel {
            logs_threshold: Some(LogsThresholdModel {
                rules: vec![ThresholdRuleModel {
                    threshold: Some(1.0),
                    time_window: "5_MINUTES".into(),
                    condition: "MORE_THAN_OR_EQUALS".into(),
                }],
                ..Default::default()
            }),
            ..Default::default()
        };
        let mut diags = Diagnostics::new();
        let err = expand_type_definition(Some(&model), &mut diags).unwrap_err();
        assert!(err.is_validation_error());
        assert!(err
            .to_string()
            .contains("type_definition.logs_threshold.rules[0].condition"));
    }

    #[test]
    fn test_rule_order_kept() {
        let mut diags = Diagnostics::new();
        let domain = expand_type_definition(Some(&every_variant()[1]), &mut diags).unwrap();
        let TypeDefinition::LogsThreshold(threshold) = domain else {
            panic!("expected logs_threshold");
        };
        let windows: Vec<i32> = threshold.rules.iter().map(|r| r.time_window).collect();
        assert_eq!(windows, vec![logs_time_window::MINUTES_10, logs_time_window::HOUR_1]);
        assert_eq!(threshold.rules[1].condition_type, condition::LESS_THAN);
    }

    #[test]
    fn test_empty_rules_rejected() {
        let model = TypeDefinitionModel {
            metric_anomaly: Some(MetricAnomalyModel::default()),
            ..Default::default()
        };
        let mut diags = Diagnostics::new();
        let err = expand_type_definition(Some(&model), &mut diags).unwrap_err();
        assert!(err.to_string().contains("type_definition.metric_anomaly.rules"));
    }

    #[test]
    fn test_flow_keeps_stage_and_group_order() {
        let model = TypeDefinitionModel {
            flow: Some(flow_model()),
            ..Default::default()
        };
        let mut diags = Diagnostics::new();
        let TypeDefinition::Flow(flow) = expand_type_definition(Some(&model), &mut diags).unwrap()
        else {
            panic!("expected flow");
        };
        assert_eq!(flow.stages.len(), 2);
        assert_eq!(flow.stages[0].flow_stages_groups.len(), 2);
        assert_eq!(flow.stages[0].flow_stages_groups[0].next_op, flow_operator::OR);
        assert_eq!(
            flow.stages[0].flow_stages_groups[1].alert_defs[0].id.as_deref(),
            Some("m")
        );
        assert_eq!(
            flow.stages[1].flow_stages_groups[0].alert_defs[0].id.as_deref(),
            Some("last")
        );
        assert_eq!(flow.stages[0].timeframe_type, timeframe_type::UP_TO);
    }

    #[test]
    fn test_flow_requires_stages_and_groups() {
        let mut diags = Diagnostics::new();
        let no_stages = TypeDefinitionModel {
            flow: Some(FlowModel::default()),
            ..Default::default()
        };
        assert!(expand_type_definition(Some(&no_stages), &mut diags).is_err());

        let no_groups = TypeDefinitionModel {
            flow: Some(FlowModel {
                stages: vec![FlowStageModel::default()],
                enforce_suppression: None,
            }),
            ..Default::default()
        };
        let err = expand_type_definition(Some(&no_groups), &mut diags).unwrap_err();
        assert!(err
            .to_string()
            .contains("type_definition.flow.stages[0].flow_stages_groups"));
    }

    #[test]
    fn test_flatten_rejects_backend_values_that_would_not_expand() {
        let no_rules = TypeDefinition::LogsThreshold(LogsThreshold::default());
        let err = flatten_type_definition(&no_rules).unwrap_err();
        assert!(err.is_mapping_error());
        assert!(err.to_string().contains("logs_threshold.rules"));

        let no_stages = TypeDefinition::Flow(Flow::default());
        assert!(flatten_type_definition(&no_stages).unwrap_err().is_mapping_error());

        let empty_stage = TypeDefinition::Flow(Flow {
            stages: vec![FlowStage::default()],
            enforce_suppression: None,
        });
        let err = flatten_type_definition(&empty_stage).unwrap_err();
        assert!(err.to_string().contains("flow_stages_groups"));

        let over_100 = TypeDefinition::MetricAnomaly(MetricAnomaly {
            rules: vec![MetricAnomalyRule {
                threshold: Some(1.0),
                for_over_pct: Some(120),
                ..Default::default()
            }],
            ..Default::default()
        });
        let err = flatten_type_definition(&over_100).unwrap_err();
        assert!(err.is_mapping_error());
        assert!(err.to_string().contains("for_over_pct"));
    }

    #[test]
    fn test_unknown_condition_code_fails_flatten() {
        let domain = TypeDefinition::LogsThreshold(LogsThreshold {
            rules: vec![LogsThresholdRule {
                threshold: Some(1.0),
                time_window: logs_time_window::MINUTES_5_OR_UNSPECIFIED,
                condition_type: condition::MORE_THAN_OR_EQUALS,
            }],
            ..Default::default()
        });
        assert!(flatten_type_definition(&domain).unwrap_err().is_mapping_error());
    }

    #[test]
    fn test_group_by_for_defaults_to_both() {
        let model = TypeDefinitionModel {
            logs_ratio_threshold: Some(LogsRatioThresholdModel {
                rules: vec![ThresholdRuleModel {
                    threshold: Some(1.0),
                    time_window: "5_MINUTES".into(),
                    condition: "MORE_THAN".into(),
                }],
                ..Default::default()
            }),
            ..Default::default()
        };
        let mut diags = Diagnostics::new();
        let TypeDefinition::LogsRatioThreshold(ratio) =
            expand_type_definition(Some(&model), &mut diags).unwrap()
        else {
            panic!("expected logs_ratio_threshold");
        };
        assert_eq!(ratio.group_by_for, group_by_for::BOTH_OR_UNSPECIFIED);
    }
}
