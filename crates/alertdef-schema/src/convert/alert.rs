use super::enums::{NOTIFY_ON, PRIORITY};
use super::notification::{
    check_target_exclusivity, expand_notification_group, flatten_notification_group,
};
use super::primitives::{
    expand_positive_u32, expand_string_list, expand_string_map, flatten_string_list,
    flatten_string_map, flatten_u32,
};
use super::schedule::{expand_schedule, flatten_schedule};
use super::type_definition::{expand_type_definition, flatten_type_definition};
use crate::diagnostics::Diagnostics;
use crate::model::{AlertModel, IncidentsSettingsModel};
use alertdef_core::{
    notify_on, priority, AlertDef, AlertDefError, AlertDefProperties, IncidentsSettings, Result,
    RetriggeringPeriod, TypeDefinition,
};
use tracing::debug;

/// Domain properties built from a configuration tree, with any warnings
#[derive(Debug, Clone, PartialEq)]
pub struct Expanded {
    pub properties: AlertDefProperties,
    pub diagnostics: Diagnostics,
}

/// Aggregate-level checks, run before anything is converted
pub fn validate_alert(model: &AlertModel) -> Result<()> {
    match model.name.as_deref() {
        Some(name) if !name.trim().is_empty() => {}
        _ => return Err(AlertDefError::invalid("name", "must not be empty")),
    }
    if let Some(value) = model.priority.as_deref() {
        PRIORITY.to_domain(value, "priority")?;
    }
    if let Some(group) = &model.notification_group {
        check_target_exclusivity(group, "notification_group")?;
    }
    model
        .type_definition
        .as_ref()
        .ok_or_else(|| {
            AlertDefError::invalid(
                "type_definition",
                "exactly one alert type is required, none is set",
            )
        })?
        .variant()?;
    Ok(())
}

/// Configuration tree to domain properties.
///
/// The identity is not part of the properties; callers pass it to the
/// transport separately.
pub fn expand_alert(model: &AlertModel) -> Result<Expanded> {
    validate_alert(model)?;
    let mut diagnostics = Diagnostics::new();

    let priority = model
        .priority
        .as_deref()
        .map(|value| PRIORITY.to_domain(value, "priority"))
        .transpose()?
        .unwrap_or(priority::P5_OR_UNSPECIFIED);

    let properties = AlertDefProperties {
        name: model.name.clone(),
        description: model.description.clone(),
        enabled: model.enabled,
        priority,
        phantom_mode: model.phantom_mode,
        group_by_keys: expand_string_list(model.group_by.as_ref()),
        entity_labels: expand_string_map(model.labels.as_ref()),
        incidents_settings: expand_incidents_settings(model.incidents_settings.as_ref())?,
        notification_group: expand_notification_group(
            model.notification_group.as_ref(),
            "notification_group",
        )?,
        active_on: expand_schedule(model.schedule.as_ref(), "schedule")?,
        type_definition: Some(expand_type_definition(
            model.type_definition.as_ref(),
            &mut diagnostics,
        )?),
    };

    debug!(
        name = ?properties.name,
        alert_type = properties.type_definition.as_ref().map(TypeDefinition::tag),
        warnings = diagnostics.len(),
        "Expanded alert definition"
    );

    Ok(Expanded {
        properties,
        diagnostics,
    })
}

/// Domain aggregate to configuration tree.
///
/// Any value without a configuration counterpart fails the whole conversion;
/// a partially populated tree is never returned.
pub fn flatten_alert(alert: &AlertDef) -> Result<AlertModel> {
    let props = &alert.alert_def_properties;
    let type_definition = props
        .type_definition
        .as_ref()
        .ok_or_else(|| AlertDefError::unmapped("type_definition", "null"))?;

    let model = AlertModel {
        id: alert.id.clone(),
        name: props.name.clone(),
        description: props.description.clone(),
        enabled: props.enabled,
        priority: Some(PRIORITY.to_config(props.priority)?),
        phantom_mode: props.phantom_mode,
        labels: flatten_string_map(&props.entity_labels),
        group_by: flatten_string_list(&props.group_by_keys),
        incidents_settings: flatten_incidents_settings(props.incidents_settings.as_ref())?,
        notification_group: flatten_notification_group(props.notification_group.as_ref())?,
        schedule: flatten_schedule(props.active_on.as_ref())?,
        type_definition: Some(flatten_type_definition(type_definition)?),
    };

    debug!(id = ?alert.id, alert_type = type_definition.tag(), "Flattened alert definition");
    Ok(model)
}

fn expand_incidents_settings(
    model: Option<&IncidentsSettingsModel>,
) -> Result<Option<IncidentsSettings>> {
    let Some(model) = model else {
        return Ok(None);
    };
    let notify_on = model
        .notify_on
        .as_deref()
        .map(|value| NOTIFY_ON.to_domain(value, "incidents_settings.notify_on"))
        .transpose()?
        .unwrap_or(notify_on::TRIGGERED_ONLY_UNSPECIFIED);
    let minutes = expand_positive_u32(
        model.retriggering_period_minutes,
        "incidents_settings.retriggering_period_minutes",
    )?;
    Ok(Some(IncidentsSettings {
        notify_on,
        retriggering_period: minutes.map(|minutes| RetriggeringPeriod {
            minutes: Some(minutes),
        }),
    }))
}

fn flatten_incidents_settings(
    settings: Option<&IncidentsSettings>,
) -> Result<Option<IncidentsSettingsModel>> {
    settings
        .map(|settings| -> Result<IncidentsSettingsModel> {
            Ok(IncidentsSettingsModel {
                notify_on: Some(NOTIFY_ON.to_config(settings.notify_on)?),
                retriggering_period_minutes: flatten_u32(
                    settings.retriggering_period.as_ref().and_then(|p| p.minutes),
                ),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ActiveOnModel, AdvancedTargetModel, LogsFilterModel, LogsImmediateModel,
        LogsSimpleFilterModel, LogsThresholdModel, NotificationGroupModel, ScheduleModel,
        SimpleTargetModel, ThresholdRuleModel, TypeDefinitionModel,
    };
    use alertdef_core::{LabelFilters, LogsFilter, LogsImmediate, LogsSimpleFilter};
    use serde_json::{json, Value};

    fn logs_immediate(query: &str) -> TypeDefinitionModel {
        TypeDefinitionModel {
            logs_immediate: Some(LogsImmediateModel {
                logs_filter: Some(LogsFilterModel {
                    simple_filter: Some(LogsSimpleFilterModel {
                        lucene_query: Some(query.to_string()),
                        label_filters: None,
                    }),
                }),
                notification_payload_filter: None,
            }),
            ..Default::default()
        }
    }

    fn alert(priority: Option<&str>) -> AlertModel {
        AlertModel {
            name: Some("Checkout errors".into()),
            priority: priority.map(str::to_string),
            type_definition: Some(logs_immediate("message:\"error\"")),
            ..Default::default()
        }
    }

    fn query_of(properties: &AlertDefProperties) -> Option<&str> {
        match properties.type_definition.as_ref()? {
            TypeDefinition::LogsImmediate(LogsImmediate {
                logs_filter: Some(filter),
                ..
            }) => filter.simple_filter.as_ref()?.lucene_query.as_deref(),
            _ => None,
        }
    }

    #[test]
    fn test_logs_immediate_with_priority_round_trips() {
        let expanded = expand_alert(&alert(Some("P2"))).unwrap();
        assert!(expanded.diagnostics.is_empty());
        assert_eq!(expanded.properties.priority, priority::P2);
        assert_eq!(
            expanded.properties.type_definition.as_ref().map(TypeDefinition::tag),
            Some("logs_immediate")
        );
        assert_eq!(query_of(&expanded.properties), Some("message:\"error\""));

        let domain = AlertDef {
            id: Some("a1b2".into()),
            alert_def_properties: expanded.properties,
            alert_version_id: None,
        };
        let flattened = flatten_alert(&domain).unwrap();
        assert_eq!(flattened.priority.as_deref(), Some("P2"));
        assert_eq!(flattened.id.as_deref(), Some("a1b2"));
        assert_eq!(
            flattened.type_definition,
            Some(logs_immediate("message:\"error\""))
        );
    }

    #[test]
    fn test_unset_priority_is_p5() {
        let expanded = expand_alert(&alert(None)).unwrap();
        assert_eq!(expanded.properties.priority, priority::P5_OR_UNSPECIFIED);
        let flattened = flatten_alert(&AlertDef {
            alert_def_properties: expanded.properties,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(flattened.priority.as_deref(), Some("P5"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut model = alert(Some("P1"));
        model.name = Some("  ".into());
        let err = expand_alert(&model).unwrap_err();
        assert!(err.is_validation_error());
        assert!(err.to_string().contains("name"));

        model.name = None;
        assert!(validate_alert(&model).is_err());
    }

    #[test]
    fn test_unknown_priority_rejected() {
        let err = expand_alert(&alert(Some("P0"))).unwrap_err();
        assert!(err.is_validation_error());
        assert!(err.to_string().contains("P1"));
    }

    #[test]
    fn test_both_notification_shapes_rejected() {
        let mut model = alert(Some("P3"));
        model.notification_group = Some(NotificationGroupModel {
            group_by_fields: None,
            simple_target_settings: Some(vec![SimpleTargetModel {
                integration_id: Some("12".into()),
                recipients: None,
            }]),
            advanced_target_settings: Some(vec![AdvancedTargetModel {
                integration_id: Some("13".into()),
                ..Default::default()
            }]),
        });
        let err = expand_alert(&model).unwrap_err();
        assert!(err.is_validation_error());
        assert!(err.to_string().contains("notification_group"));
    }

    #[test]
    fn test_logs_threshold_inclusive_condition_rejected() {
        let mut model = alert(Some("P3"));
        model.type_definition = Some(TypeDefinitionModel {
            logs_threshold: Some(LogsThresholdModel {
                rules: vec![ThresholdRuleModel {
                    threshold: Some(10.0),
                    time_window: "5_MINUTES".into(),
                    condition: "MORE_THAN_OR_EQUALS".into(),
                }],
                ..Default::default()
            }),
            ..Default::default()
        });
        assert!(expand_alert(&model).unwrap_err().is_validation_error());
    }

    #[test]
    fn test_missing_type_definition_rejected() {
        let mut model = alert(Some("P3"));
        model.type_definition = None;
        assert!(expand_alert(&model).unwrap_err().is_validation_error());
    }

    #[test]
    fn test_unknown_backend_code_is_mapping_error() {
        let mut properties = expand_alert(&alert(Some("P1"))).unwrap().properties;
        properties.type_definition = Some(TypeDefinition::LogsImmediate(LogsImmediate {
            logs_filter: Some(LogsFilter {
                simple_filter: Some(LogsSimpleFilter {
                    lucene_query: None,
                    label_filters: Some(LabelFilters {
                        severities: vec![42],
                        ..Default::default()
                    }),
                }),
            }),
            notification_payload_filter: vec![],
        }));
        let domain = AlertDef {
            id: Some("x".into()),
            alert_def_properties: properties,
            alert_version_id: None,
        };
        let err = flatten_alert(&domain).unwrap_err();
        assert!(err.is_mapping_error());
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_missing_backend_type_definition_is_mapping_error() {
        let domain = AlertDef {
            id: Some("x".into()),
            ..Default::default()
        };
        assert!(flatten_alert(&domain).unwrap_err().is_mapping_error());
    }

    #[test]
    fn test_absent_blocks_flatten_to_explicit_null() {
        let expanded = expand_alert(&alert(Some("P4"))).unwrap();
        let flattened = flatten_alert(&AlertDef {
            id: Some("id-1".into()),
            alert_def_properties: expanded.properties,
            alert_version_id: None,
        })
        .unwrap();
        assert_eq!(flattened.schedule, None);
        assert_eq!(flattened.labels, None);
        assert_eq!(flattened.incidents_settings, None);

        let tree: Value = serde_json::to_value(&flattened).unwrap();
        assert_eq!(tree["schedule"], Value::Null);
        assert_eq!(tree["labels"], Value::Null);
        assert!(tree.as_object().unwrap().contains_key("schedule"));

        let variants = tree["type_definition"].as_object().unwrap();
        assert_eq!(variants.len(), 12);
        assert_eq!(variants["flow"], Value::Null);
        assert_eq!(variants["metric_threshold"], Value::Null);
        assert_ne!(variants["logs_immediate"], Value::Null);
    }

    #[test]
    fn test_empty_labels_and_group_by_read_back_as_null() {
        let mut model = alert(Some("P3"));
        model.labels = Some(std::collections::BTreeMap::new());
        model.group_by = Some(vec![]);

        let expanded = expand_alert(&model).unwrap();
        assert!(expanded.properties.entity_labels.is_empty());
        assert!(expanded.properties.group_by_keys.is_empty());

        let flattened = flatten_alert(&AlertDef {
            id: Some("e1".into()),
            alert_def_properties: expanded.properties,
            alert_version_id: None,
        })
        .unwrap();
        assert_eq!(flattened.labels, None);
        assert_eq!(flattened.group_by, None);
    }

    #[test]
    fn test_full_aggregate_round_trip() {
        let model = AlertModel {
            id: Some("alert-7".into()),
            name: Some("Latency".into()),
            description: Some("p99 above budget".into()),
            enabled: Some(true),
            priority: Some("P1".into()),
            phantom_mode: Some(false),
            labels: Some([("team".to_string(), "payments".to_string())].into()),
            group_by: Some(vec!["region".into(), "host".into(), "az".into()]),
            incidents_settings: Some(IncidentsSettingsModel {
                notify_on: Some("Triggered and Resolved".into()),
                retriggering_period_minutes: Some(30),
            }),
            notification_group: Some(NotificationGroupModel {
                group_by_fields: Some(vec!["region".into()]),
                simple_target_settings: Some(vec![SimpleTargetModel {
                    integration_id: None,
                    recipients: Some(vec!["sre@example.com".into()]),
                }]),
                advanced_target_settings: None,
            }),
            schedule: Some(ScheduleModel {
                active_on: Some(ActiveOnModel {
                    days_of_week: vec!["wednesday".into(), "monday".into()],
                    start_time: Some("09:00".into()),
                    end_time: Some("18:30".into()),
                }),
            }),
            type_definition: Some(logs_immediate("service:payments")),
        };

        let expanded = expand_alert(&model).unwrap();
        assert_eq!(
            expanded.properties.group_by_keys,
            vec!["region", "host", "az"]
        );
        let flattened = flatten_alert(&AlertDef {
            id: model.id.clone(),
            alert_def_properties: expanded.properties,
            alert_version_id: Some("v1".into()),
        })
        .unwrap();
        assert_eq!(flattened, model);
    }

    #[test]
    fn test_configuration_tree_deserializes_from_json() {
        let tree = json!({
            "name": "From state",
            "priority": "P3",
            "type_definition": {
                "logs_immediate": {
                    "logs_filter": { "simple_filter": { "lucene_query": "*" } }
                }
            }
        });
        let model: AlertModel = serde_json::from_value(tree).unwrap();
        let expanded = expand_alert(&model).unwrap();
        assert_eq!(expanded.properties.priority, priority::P3);
    }

    #[test]
    fn test_cardinality_warning_surfaces_in_diagnostics() {
        let tree = json!({
            "name": "Prefix",
            "type_definition": {
                "logs_immediate": {
                    "logs_filter": { "simple_filter": { "label_filters": {
                        "subsystem_name": [
                            { "operation": "ENDS_WITH", "values": ["-api", "-web"] }
                        ]
                    } } }
                }
            }
        });
        let model: AlertModel = serde_json::from_value(tree).unwrap();
        let expanded = expand_alert(&model).unwrap();
        assert_eq!(expanded.diagnostics.len(), 1);
        assert!(expanded.diagnostics.warnings()[0]
            .path
            .starts_with("type_definition.logs_immediate.logs_filter"));
    }
}
