//! Filter shapes shared across alert types.

use super::enums::{AUTO_RETIRE_TIMEFRAME, FILTER_OPERATION, LOG_SEVERITY};
use super::primitives::{
    child, expand_percentage, expand_u64, flatten_percentage, flatten_u64, index,
};
use crate::diagnostics::Diagnostics;
use crate::model::{
    LabelFilterModel, LabelFiltersModel, LogsFilterModel, LogsSimpleFilterModel,
    MetricFilterModel, MissingValuesModel, TracingFilterModel, TracingFilterTypeModel,
    TracingLabelFiltersModel, UndetectedValuesManagementModel,
};
use alertdef_core::{
    auto_retire_timeframe, filter_operation, AlertDefError, FilterValue, LabelFilterType,
    LabelFilters, LogsFilter, LogsSimpleFilter, MetricFilter, MetricMissingValues, Result,
    TracingFilter, TracingFilterType, TracingLabelFilters, TracingSimpleFilter,
    TracingSpanFieldsFilterType, UndetectedValuesManagement,
};
use std::collections::{BTreeMap, BTreeSet};

/// Operations that compare against one operand
const SINGLE_VALUE_OPERATIONS: [i32; 3] = [
    filter_operation::INCLUDES,
    filter_operation::STARTS_WITH,
    filter_operation::ENDS_WITH,
];

/// Flags operand counts the operation cannot use meaningfully.
///
/// The filter is still sent unchanged.
fn check_cardinality(
    operation: i32,
    name: &str,
    count: usize,
    path: &str,
    diags: &mut Diagnostics,
) {
    if count == 0 {
        diags.warn(path, "filter has no values and will not match anything");
    } else if count > 1 && SINGLE_VALUE_OPERATIONS.contains(&operation) {
        diags.warn(
            path,
            format!("{name} takes a single value but {count} were given; they are sent as-is"),
        );
    }
}

pub fn expand_logs_filter(
    model: Option<&LogsFilterModel>,
    path: &str,
    diags: &mut Diagnostics,
) -> Result<Option<LogsFilter>> {
    let Some(model) = model else {
        return Ok(None);
    };
    let path = child(path, "simple_filter");
    let simple_filter = model
        .simple_filter
        .as_ref()
        .map(|simple| -> Result<LogsSimpleFilter> {
            Ok(LogsSimpleFilter {
                lucene_query: simple.lucene_query.clone(),
                label_filters: expand_label_filters(
                    simple.label_filters.as_ref(),
                    &child(&path, "label_filters"),
                    diags,
                )?,
            })
        })
        .transpose()?;
    Ok(Some(LogsFilter { simple_filter }))
}

pub fn flatten_logs_filter(filter: Option<&LogsFilter>) -> Result<Option<LogsFilterModel>> {
    let Some(filter) = filter else {
        return Ok(None);
    };
    let simple_filter = filter
        .simple_filter
        .as_ref()
        .map(|simple| -> Result<LogsSimpleFilterModel> {
            Ok(LogsSimpleFilterModel {
                lucene_query: simple.lucene_query.clone(),
                label_filters: simple
                    .label_filters
                    .as_ref()
                    .map(flatten_label_filters)
                    .transpose()?,
            })
        })
        .transpose()?;
    Ok(Some(LogsFilterModel { simple_filter }))
}

fn expand_label_filters(
    model: Option<&LabelFiltersModel>,
    path: &str,
    diags: &mut Diagnostics,
) -> Result<Option<LabelFilters>> {
    let Some(model) = model else {
        return Ok(None);
    };
    let severities_path = child(path, "severities");
    let severities = model
        .severities
        .iter()
        .flatten()
        .map(|severity| LOG_SEVERITY.to_domain(severity, &severities_path))
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(LabelFilters {
        application_name: expand_label_filter_group(
            model.application_name.as_ref(),
            &child(path, "application_name"),
            diags,
        )?,
        subsystem_name: expand_label_filter_group(
            model.subsystem_name.as_ref(),
            &child(path, "subsystem_name"),
            diags,
        )?,
        severities,
    }))
}

fn flatten_label_filters(filters: &LabelFilters) -> Result<LabelFiltersModel> {
    let severities = filters
        .severities
        .iter()
        .map(|code| LOG_SEVERITY.to_config(*code))
        .collect::<Result<BTreeSet<_>>>()?;

    Ok(LabelFiltersModel {
        application_name: flatten_label_filter_group(&filters.application_name)?,
        subsystem_name: flatten_label_filter_group(&filters.subsystem_name)?,
        severities: (!severities.is_empty()).then_some(severities),
    })
}

fn expand_label_filter_group(
    group: Option<&BTreeSet<LabelFilterModel>>,
    path: &str,
    diags: &mut Diagnostics,
) -> Result<Vec<LabelFilterType>> {
    group
        .iter()
        .flat_map(|group| group.iter())
        .enumerate()
        .map(|(i, filter)| expand_label_filter(filter, &index(path, i), diags))
        .collect()
}

fn flatten_label_filter_group(
    group: &[LabelFilterType],
) -> Result<Option<BTreeSet<LabelFilterModel>>> {
    if group.is_empty() {
        return Ok(None);
    }
    group
        .iter()
        .map(flatten_label_filter)
        .collect::<Result<BTreeSet<_>>>()
        .map(Some)
}

fn expand_label_filter(
    model: &LabelFilterModel,
    path: &str,
    diags: &mut Diagnostics,
) -> Result<LabelFilterType> {
    let operation = FILTER_OPERATION.to_domain(&model.operation, &child(path, "operation"))?;
    let value = match (&model.value, &model.values) {
        (Some(value), None) => FilterValue::Single(value.clone()),
        (None, Some(values)) => FilterValue::List(values.clone()),
        (Some(_), Some(_)) => {
            return Err(AlertDefError::invalid(
                path,
                "set either value or values, not both",
            ))
        }
        (None, None) => {
            return Err(AlertDefError::invalid(
                path,
                "one of value or values is required",
            ))
        }
    };
    check_cardinality(operation, &model.operation, value.len(), path, diags);
    Ok(LabelFilterType { operation, value })
}

fn flatten_label_filter(filter: &LabelFilterType) -> Result<LabelFilterModel> {
    let operation = FILTER_OPERATION.to_config(filter.operation)?;
    Ok(match &filter.value {
        FilterValue::Single(value) => LabelFilterModel::single(operation, value.clone()),
        FilterValue::List(values) => LabelFilterModel::list(operation, values.iter().cloned()),
    })
}

pub fn expand_tracing_filter(
    model: Option<&TracingFilterModel>,
    path: &str,
    diags: &mut Diagnostics,
) -> Result<Option<TracingFilter>> {
    let Some(model) = model else {
        return Ok(None);
    };
    let simple_filter = TracingSimpleFilter {
        tracing_label_filters: expand_tracing_label_filters(
            model.tracing_label_filters.as_ref(),
            &child(path, "tracing_label_filters"),
            diags,
        )?,
        latency_threshold_ms: expand_u64(
            model.latency_threshold_ms,
            &child(path, "latency_threshold_ms"),
        )?,
    };
    Ok(Some(TracingFilter {
        simple_filter: Some(simple_filter),
    }))
}

pub fn flatten_tracing_filter(filter: Option<&TracingFilter>) -> Result<Option<TracingFilterModel>> {
    let Some(filter) = filter else {
        return Ok(None);
    };
    let simple = filter.simple_filter.as_ref();
    Ok(Some(TracingFilterModel {
        latency_threshold_ms: flatten_u64(
            simple.and_then(|s| s.latency_threshold_ms),
            "latency_threshold_ms",
        )?,
        tracing_label_filters: simple
            .and_then(|s| s.tracing_label_filters.as_ref())
            .map(flatten_tracing_label_filters)
            .transpose()?,
    }))
}

fn expand_tracing_label_filters(
    model: Option<&TracingLabelFiltersModel>,
    path: &str,
    diags: &mut Diagnostics,
) -> Result<Option<TracingLabelFilters>> {
    let Some(model) = model else {
        return Ok(None);
    };

    let span_fields_path = child(path, "span_fields");
    let mut span_fields = Vec::new();
    for (key, filter_type) in model.span_fields.iter().flatten() {
        let entry_path = format!("{span_fields_path}[\"{key}\"]");
        span_fields.push(TracingSpanFieldsFilterType {
            key: Some(key.clone()),
            filter_type: Some(expand_tracing_filter_type(filter_type, &entry_path, diags)?),
        });
    }

    Ok(Some(TracingLabelFilters {
        application_name: expand_tracing_filter_group(
            model.application_name.as_ref(),
            &child(path, "application_name"),
            diags,
        )?,
        subsystem_name: expand_tracing_filter_group(
            model.subsystem_name.as_ref(),
            &child(path, "subsystem_name"),
            diags,
        )?,
        service_name: expand_tracing_filter_group(
            model.service_name.as_ref(),
            &child(path, "service_name"),
            diags,
        )?,
        operation_name: expand_tracing_filter_group(
            model.operation_name.as_ref(),
            &child(path, "operation_name"),
            diags,
        )?,
        span_fields,
    }))
}

fn flatten_tracing_label_filters(filters: &TracingLabelFilters) -> Result<TracingLabelFiltersModel> {
    let mut span_fields = BTreeMap::new();
    for entry in &filters.span_fields {
        let key = entry
            .key
            .clone()
            .ok_or_else(|| AlertDefError::unmapped("span_fields.key", "null"))?;
        let filter_type = entry
            .filter_type
            .as_ref()
            .ok_or_else(|| AlertDefError::unmapped("span_fields.filter_type", "null"))?;
        if span_fields.contains_key(&key) {
            return Err(AlertDefError::unmapped(
                "span_fields.key",
                format!("\"{key}\" (duplicate)"),
            ));
        }
        span_fields.insert(key, flatten_tracing_filter_type(filter_type)?);
    }

    Ok(TracingLabelFiltersModel {
        application_name: flatten_tracing_filter_group(&filters.application_name)?,
        subsystem_name: flatten_tracing_filter_group(&filters.subsystem_name)?,
        service_name: flatten_tracing_filter_group(&filters.service_name)?,
        operation_name: flatten_tracing_filter_group(&filters.operation_name)?,
        span_fields: (!span_fields.is_empty()).then_some(span_fields),
    })
}

fn expand_tracing_filter_group(
    group: Option<&BTreeSet<TracingFilterTypeModel>>,
    path: &str,
    diags: &mut Diagnostics,
) -> Result<Vec<TracingFilterType>> {
    group
        .iter()
        .flat_map(|group| group.iter())
        .enumerate()
        .map(|(i, filter)| expand_tracing_filter_type(filter, &index(path, i), diags))
        .collect()
}

fn flatten_tracing_filter_group(
    group: &[TracingFilterType],
) -> Result<Option<BTreeSet<TracingFilterTypeModel>>> {
    if group.is_empty() {
        return Ok(None);
    }
    group
        .iter()
        .map(flatten_tracing_filter_type)
        .collect::<Result<BTreeSet<_>>>()
        .map(Some)
}

fn expand_tracing_filter_type(
    model: &TracingFilterTypeModel,
    path: &str,
    diags: &mut Diagnostics,
) -> Result<TracingFilterType> {
    let operation = FILTER_OPERATION.to_domain(&model.operation, &child(path, "operation"))?;
    check_cardinality(operation, &model.operation, model.values.len(), path, diags);
    Ok(TracingFilterType {
        values: model.values.iter().cloned().collect(),
        operation,
    })
}

fn flatten_tracing_filter_type(filter: &TracingFilterType) -> Result<TracingFilterTypeModel> {
    Ok(TracingFilterTypeModel {
        operation: FILTER_OPERATION.to_config(filter.operation)?,
        values: filter.values.iter().cloned().collect(),
    })
}

pub fn expand_metric_filter(model: Option<&MetricFilterModel>) -> Option<MetricFilter> {
    model.map(|model| MetricFilter {
        promql: model.promql.clone(),
    })
}

pub fn flatten_metric_filter(filter: Option<&MetricFilter>) -> Option<MetricFilterModel> {
    filter.map(|filter| MetricFilterModel {
        promql: filter.promql.clone(),
    })
}

/// Absent stays absent; an unset timeframe means never retire.
pub fn expand_undetected_values(
    model: Option<&UndetectedValuesManagementModel>,
    path: &str,
) -> Result<Option<UndetectedValuesManagement>> {
    let Some(model) = model else {
        return Ok(None);
    };
    let auto_retire_timeframe = model
        .auto_retire_timeframe
        .as_deref()
        .map(|value| AUTO_RETIRE_TIMEFRAME.to_domain(value, &child(path, "auto_retire_timeframe")))
        .transpose()?
        .unwrap_or(auto_retire_timeframe::NEVER_OR_UNSPECIFIED);
    Ok(Some(UndetectedValuesManagement {
        trigger_undetected_values: model.trigger_undetected_values,
        auto_retire_timeframe,
    }))
}

pub fn flatten_undetected_values(
    management: Option<&UndetectedValuesManagement>,
) -> Result<Option<UndetectedValuesManagementModel>> {
    management
        .map(|management| -> Result<UndetectedValuesManagementModel> {
            Ok(UndetectedValuesManagementModel {
                trigger_undetected_values: management.trigger_undetected_values,
                auto_retire_timeframe: Some(
                    AUTO_RETIRE_TIMEFRAME.to_config(management.auto_retire_timeframe)?,
                ),
            })
        })
        .transpose()
}

pub fn expand_missing_values(
    model: Option<&MissingValuesModel>,
    path: &str,
) -> Result<Option<MetricMissingValues>> {
    let Some(model) = model else {
        return Ok(None);
    };
    match (model.replace_with_zero, model.min_non_null_values_pct) {
        (Some(replace), None) => Ok(Some(MetricMissingValues::ReplaceWithZero(replace))),
        (None, Some(pct)) => {
            let pct = expand_percentage(Some(pct), &child(path, "min_non_null_values_pct"))?
                .unwrap_or_default();
            Ok(Some(MetricMissingValues::MinNonNullValuesPct(pct)))
        }
        _ => Err(AlertDefError::invalid(
            path,
            "exactly one of replace_with_zero or min_non_null_values_pct is required",
        )),
    }
}

pub fn flatten_missing_values(
    missing: Option<&MetricMissingValues>,
) -> Result<Option<MissingValuesModel>> {
    missing
        .map(|missing| -> Result<MissingValuesModel> {
            Ok(match missing {
                MetricMissingValues::ReplaceWithZero(replace) => MissingValuesModel {
                    replace_with_zero: Some(*replace),
                    min_non_null_values_pct: None,
                },
                MetricMissingValues::MinNonNullValuesPct(pct) => MissingValuesModel {
                    replace_with_zero: None,
                    min_non_null_values_pct: flatten_percentage(
                        Some(*pct),
                        "missing_values.min_non_null_values_pct",
                    )?,
                },
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label_filters(filters: Vec<LabelFilterModel>) -> LogsFilterModel {
        LogsFilterModel {
            simple_filter: Some(LogsSimpleFilterModel {
                lucene_query: Some("status:500".into()),
                label_filters: Some(LabelFiltersModel {
                    application_name: Some(filters.into_iter().collect()),
                    subsystem_name: None,
                    severities: Some(["Error".to_string(), "Critical".to_string()].into()),
                }),
            }),
        }
    }

    #[test]
    fn test_logs_filter_round_trip() {
        let model = label_filters(vec![
            LabelFilterModel::single("IS", "checkout"),
            LabelFilterModel::list("NOT", ["billing", "auth"]),
        ]);
        let mut diags = Diagnostics::new();
        let domain = expand_logs_filter(Some(&model), "logs_filter", &mut diags).unwrap();
        assert!(diags.is_empty());

        let labels = domain
            .as_ref()
            .and_then(|f| f.simple_filter.as_ref())
            .and_then(|s| s.label_filters.as_ref())
            .unwrap();
        assert_eq!(labels.application_name.len(), 2);
        // severity names expand in lexicographic order
        assert_eq!(labels.severities, vec![5, 4]);

        let flattened = flatten_logs_filter(domain.as_ref()).unwrap();
        assert_eq!(flattened, Some(model));
    }

    #[test]
    fn test_label_filter_set_ignores_declaration_order() {
        let a = label_filters(vec![
            LabelFilterModel::single("IS", "a"),
            LabelFilterModel::single("IS", "b"),
        ]);
        let b = label_filters(vec![
            LabelFilterModel::single("IS", "b"),
            LabelFilterModel::single("IS", "a"),
        ]);
        let mut diags = Diagnostics::new();
        assert_eq!(
            expand_logs_filter(Some(&a), "f", &mut diags).unwrap(),
            expand_logs_filter(Some(&b), "f", &mut diags).unwrap()
        );
    }

    #[test]
    fn test_starts_with_many_values_warns() {
        let model = label_filters(vec![LabelFilterModel::list("STARTS_WITH", ["api", "web"])]);
        let mut diags = Diagnostics::new();
        let domain = expand_logs_filter(Some(&model), "logs_filter", &mut diags).unwrap();
        assert!(domain.is_some());
        assert_eq!(diags.len(), 1);
        let warning = &diags.warnings()[0];
        assert_eq!(
            warning.path,
            "logs_filter.simple_filter.label_filters.application_name[0]"
        );
        assert!(warning.summary.contains("STARTS_WITH"));
    }

    #[test]
    fn test_value_and_values_are_exclusive() {
        let mut filter = LabelFilterModel::single("IS", "a");
        filter.values = Some(vec!["b".into()]);
        let mut diags = Diagnostics::new();
        let err = expand_logs_filter(Some(&label_filters(vec![filter])), "f", &mut diags)
            .unwrap_err();
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_unknown_operation_is_rejected() {
        let model = label_filters(vec![LabelFilterModel::single("CONTAINS", "a")]);
        let mut diags = Diagnostics::new();
        let err = expand_logs_filter(Some(&model), "f", &mut diags).unwrap_err();
        assert!(err
            .to_string()
            .contains("f.simple_filter.label_filters.application_name[0].operation"));
    }

    #[test]
    fn test_unknown_severity_code_fails_flatten() {
        let filter = LogsFilter {
            simple_filter: Some(LogsSimpleFilter {
                lucene_query: None,
                label_filters: Some(LabelFilters {
                    severities: vec![17],
                    ..Default::default()
                }),
            }),
        };
        let err = flatten_logs_filter(Some(&filter)).unwrap_err();
        assert!(err.is_mapping_error());
    }

    #[test]
    fn test_span_fields_keep_keys() {
        let model = TracingFilterModel {
            latency_threshold_ms: Some(250),
            tracing_label_filters: Some(TracingLabelFiltersModel {
                service_name: Some(
                    [TracingFilterTypeModel {
                        operation: "IS".into(),
                        values: ["cart".to_string()].into(),
                    }]
                    .into(),
                ),
                span_fields: Some(
                    [(
                        "http.status_code".to_string(),
                        TracingFilterTypeModel {
                            operation: "STARTS_WITH".into(),
                            values: ["5".to_string()].into(),
                        },
                    )]
                    .into(),
                ),
                ..Default::default()
            }),
        };
        let mut diags = Diagnostics::new();
        let domain = expand_tracing_filter(Some(&model), "tracing_filter", &mut diags).unwrap();
        let labels = domain
            .as_ref()
            .and_then(|f| f.simple_filter.as_ref())
            .and_then(|s| s.tracing_label_filters.as_ref())
            .unwrap();
        assert_eq!(labels.span_fields[0].key.as_deref(), Some("http.status_code"));
        assert_eq!(
            labels.span_fields[0].filter_type.as_ref().map(|f| f.operation),
            Some(filter_operation::STARTS_WITH)
        );

        assert_eq!(flatten_tracing_filter(domain.as_ref()).unwrap(), Some(model));
    }

    #[test]
    fn test_duplicate_span_field_key_fails_flatten() {
        let entry = TracingSpanFieldsFilterType {
            key: Some("region".into()),
            filter_type: Some(TracingFilterType::default()),
        };
        let filter = TracingFilter {
            simple_filter: Some(TracingSimpleFilter {
                tracing_label_filters: Some(TracingLabelFilters {
                    span_fields: vec![entry.clone(), entry],
                    ..Default::default()
                }),
                latency_threshold_ms: None,
            }),
        };
        assert!(flatten_tracing_filter(Some(&filter))
            .unwrap_err()
            .is_mapping_error());
    }

    #[test]
    fn test_undetected_values_absence_round_trips() {
        assert_eq!(expand_undetected_values(None, "u").unwrap(), None);
        assert_eq!(flatten_undetected_values(None).unwrap(), None);

        let model = UndetectedValuesManagementModel {
            trigger_undetected_values: Some(true),
            auto_retire_timeframe: Some("6_HOURS".into()),
        };
        let domain = expand_undetected_values(Some(&model), "u").unwrap();
        assert_eq!(
            domain.as_ref().map(|d| d.auto_retire_timeframe),
            Some(auto_retire_timeframe::HOURS_6)
        );
        assert_eq!(flatten_undetected_values(domain.as_ref()).unwrap(), Some(model));
    }

    #[test]
    fn test_missing_values_exclusive() {
        let both = MissingValuesModel {
            replace_with_zero: Some(true),
            min_non_null_values_pct: Some(50),
        };
        assert!(expand_missing_values(Some(&both), "m").is_err());
        assert!(expand_missing_values(Some(&MissingValuesModel::default()), "m").is_err());

        let pct = MissingValuesModel {
            replace_with_zero: None,
            min_non_null_values_pct: Some(80),
        };
        let domain = expand_missing_values(Some(&pct), "m").unwrap();
        assert_eq!(domain, Some(MetricMissingValues::MinNonNullValuesPct(80)));
        assert_eq!(flatten_missing_values(domain.as_ref()).unwrap(), Some(pct));

        let out_of_range = MetricMissingValues::MinNonNullValuesPct(150);
        assert!(flatten_missing_values(Some(&out_of_range))
            .unwrap_err()
            .is_mapping_error());
    }
}
