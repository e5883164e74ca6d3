use super::TypeDefinitionModel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration tree of an alert resource.
///
/// Optional attributes serialize as explicit `null` so the state written back
/// after a read carries every attribute, populated or not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertModel {
    /// Server-assigned identity (computed)
    pub id: Option<String>,

    /// Display name, required and non-empty
    pub name: Option<String>,

    pub description: Option<String>,

    pub enabled: Option<bool>,

    /// `P1`..`P5`; unset means `P5`
    pub priority: Option<String>,

    pub phantom_mode: Option<bool>,

    /// Entity labels.
    ///
    /// The backend does not distinguish an empty map from no labels, so `{}`
    /// reads back as `null`. Leave the attribute unset rather than empty.
    pub labels: Option<BTreeMap<String, String>>,

    /// Group-by key paths, order-significant.
    ///
    /// As with `labels`, `[]` reads back as `null`.
    pub group_by: Option<Vec<String>>,

    pub incidents_settings: Option<IncidentsSettingsModel>,

    pub notification_group: Option<NotificationGroupModel>,

    /// Absent means always active
    pub schedule: Option<ScheduleModel>,

    pub type_definition: Option<TypeDefinitionModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentsSettingsModel {
    /// `Triggered Only` or `Triggered and Resolved`
    pub notify_on: Option<String>,

    pub retriggering_period_minutes: Option<i64>,
}

/// Notification routing; exactly one target shape may be set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationGroupModel {
    pub group_by_fields: Option<Vec<String>>,

    pub simple_target_settings: Option<Vec<SimpleTargetModel>>,

    pub advanced_target_settings: Option<Vec<AdvancedTargetModel>>,
}

/// Target without its own notification behaviour
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleTargetModel {
    pub integration_id: Option<String>,

    pub recipients: Option<Vec<String>>,
}

/// Target with its own retriggering and notify-on behaviour
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedTargetModel {
    pub retriggering_period_minutes: Option<i64>,

    pub notify_on: Option<String>,

    pub integration_id: Option<String>,

    pub recipients: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleModel {
    pub active_on: Option<ActiveOnModel>,
}

/// Weekly activity window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveOnModel {
    /// Lower-case day names, no duplicates, declared order kept
    pub days_of_week: Vec<String>,

    /// `HH:MM`
    pub start_time: Option<String>,

    /// `HH:MM`
    pub end_time: Option<String>,
}
