use super::enums::NOTIFY_ON;
use super::primitives::{
    child, expand_positive_u32, expand_string_list, flatten_string_list, flatten_u32, index,
};
use crate::model::{AdvancedTargetModel, NotificationGroupModel, SimpleTargetModel};
use alertdef_core::{
    notify_on, AdvancedTargetSetting, AdvancedTargetSettings, AlertDefError, IntegrationTarget,
    NotificationGroup, NotificationTargets, Result, SimpleTargetSettings,
};

/// Fails unless exactly one target shape is populated.
///
/// An empty list still counts as populated.
pub fn check_target_exclusivity(model: &NotificationGroupModel, path: &str) -> Result<()> {
    match (&model.simple_target_settings, &model.advanced_target_settings) {
        (Some(_), None) | (None, Some(_)) => Ok(()),
        (Some(_), Some(_)) => Err(AlertDefError::invalid(
            path,
            "simple_target_settings and advanced_target_settings are mutually exclusive",
        )),
        (None, None) => Err(AlertDefError::invalid(
            path,
            "one of simple_target_settings or advanced_target_settings is required",
        )),
    }
}

pub fn expand_notification_group(
    model: Option<&NotificationGroupModel>,
    path: &str,
) -> Result<Option<NotificationGroup>> {
    let Some(model) = model else {
        return Ok(None);
    };
    check_target_exclusivity(model, path)?;

    let targets = if let Some(simple) = &model.simple_target_settings {
        let path = child(path, "simple_target_settings");
        let integrations = simple
            .iter()
            .enumerate()
            .map(|(i, target)| expand_simple_target(target, &index(&path, i)))
            .collect::<Result<Vec<_>>>()?;
        NotificationTargets::Simple(SimpleTargetSettings { integrations })
    } else {
        let path = child(path, "advanced_target_settings");
        let advanced_target_settings = model
            .advanced_target_settings
            .iter()
            .flatten()
            .enumerate()
            .map(|(i, target)| expand_advanced_target(target, &index(&path, i)))
            .collect::<Result<Vec<_>>>()?;
        NotificationTargets::Advanced(AdvancedTargetSettings {
            advanced_target_settings,
        })
    };

    Ok(Some(NotificationGroup {
        group_by_fields: expand_string_list(model.group_by_fields.as_ref()),
        targets: Some(targets),
    }))
}

/// A group without targets flattens to an empty simple target list, which
/// expands back to the same domain value.
pub fn flatten_notification_group(
    group: Option<&NotificationGroup>,
) -> Result<Option<NotificationGroupModel>> {
    let Some(group) = group else {
        return Ok(None);
    };
    let (simple_target_settings, advanced_target_settings) = match &group.targets {
        None => (Some(Vec::new()), None),
        Some(NotificationTargets::Simple(simple)) => (
            Some(simple.integrations.iter().map(flatten_simple_target).collect()),
            None,
        ),
        Some(NotificationTargets::Advanced(advanced)) => (
            None,
            Some(
                advanced
                    .advanced_target_settings
                    .iter()
                    .map(flatten_advanced_target)
                    .collect::<Result<Vec<_>>>()?,
            ),
        ),
    };
    Ok(Some(NotificationGroupModel {
        group_by_fields: flatten_string_list(&group.group_by_fields),
        simple_target_settings,
        advanced_target_settings,
    }))
}

fn expand_simple_target(model: &SimpleTargetModel, path: &str) -> Result<IntegrationTarget> {
    expand_integration(model.integration_id.as_deref(), model.recipients.as_ref(), path)
}

fn flatten_simple_target(target: &IntegrationTarget) -> SimpleTargetModel {
    let (integration_id, recipients) = flatten_integration(target);
    SimpleTargetModel {
        integration_id,
        recipients,
    }
}

fn expand_advanced_target(model: &AdvancedTargetModel, path: &str) -> Result<AdvancedTargetSetting> {
    let notify_on = model
        .notify_on
        .as_deref()
        .map(|value| NOTIFY_ON.to_domain(value, &child(path, "notify_on")))
        .transpose()?
        .unwrap_or(notify_on::TRIGGERED_ONLY_UNSPECIFIED);
    Ok(AdvancedTargetSetting {
        retriggering_period_minutes: expand_positive_u32(
            model.retriggering_period_minutes,
            &child(path, "retriggering_period_minutes"),
        )?,
        notify_on,
        integration: expand_integration(
            model.integration_id.as_deref(),
            model.recipients.as_ref(),
            path,
        )?,
    })
}

fn flatten_advanced_target(target: &AdvancedTargetSetting) -> Result<AdvancedTargetModel> {
    let (integration_id, recipients) = flatten_integration(&target.integration);
    Ok(AdvancedTargetModel {
        retriggering_period_minutes: flatten_u32(target.retriggering_period_minutes),
        notify_on: Some(NOTIFY_ON.to_config(target.notify_on)?),
        integration_id,
        recipients,
    })
}

fn expand_integration(
    integration_id: Option<&str>,
    recipients: Option<&Vec<String>>,
    path: &str,
) -> Result<IntegrationTarget> {
    match (integration_id, recipients) {
        (Some(id), None) => id.parse::<u32>().map(IntegrationTarget::IntegrationId).map_err(|_| {
            AlertDefError::invalid(
                child(path, "integration_id"),
                format!("\"{id}\" is not a numeric integration id"),
            )
        }),
        (None, Some(recipients)) => Ok(IntegrationTarget::Recipients(recipients.clone())),
        (Some(_), Some(_)) => Err(AlertDefError::invalid(
            path,
            "integration_id and recipients are mutually exclusive",
        )),
        (None, None) => Err(AlertDefError::invalid(
            path,
            "one of integration_id or recipients is required",
        )),
    }
}

fn flatten_integration(target: &IntegrationTarget) -> (Option<String>, Option<Vec<String>>) {
    match target {
        IntegrationTarget::IntegrationId(id) => (Some(id.to_string()), None),
        IntegrationTarget::Recipients(recipients) => (None, Some(recipients.clone())),
    }
}
