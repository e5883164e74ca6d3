use super::{ActivitySchedule, NotificationGroup, TypeDefinition};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Alert definition as held by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDef {
    /// Server-assigned identity, absent until created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Everything the operator controls
    #[serde(default)]
    pub alert_def_properties: AlertDefProperties,

    /// Version id bumped by the backend on every replace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_version_id: Option<String>,
}

impl AlertDef {
    /// Returns the evaluation strategy tag, if the backend sent one
    #[must_use]
    pub fn type_tag(&self) -> Option<&'static str> {
        self.alert_def_properties
            .type_definition
            .as_ref()
            .map(TypeDefinition::tag)
    }
}

/// User-controlled properties of an alert definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDefProperties {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the alert is evaluated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Priority code, see [`priority`]
    #[serde(default)]
    pub priority: i32,

    /// Evaluate without notifying
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phantom_mode: Option<bool>,

    /// Ordered group-by key paths
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_by_keys: Vec<String>,

    /// Entity labels
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub entity_labels: HashMap<String, String>,

    /// Incident behaviour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incidents_settings: Option<IncidentsSettings>,

    /// Who is notified and how
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_group: Option<NotificationGroup>,

    /// Activity window; absent means always active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_on: Option<ActivitySchedule>,

    /// The single populated evaluation strategy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_definition: Option<TypeDefinition>,
}

/// Incident notification settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentsSettings {
    /// Notify-on code, see [`notify_on`]
    #[serde(default)]
    pub notify_on: i32,

    /// Minimum minutes between repeated notifications
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retriggering_period: Option<RetriggeringPeriod>,
}

/// Retriggering period wrapper
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetriggeringPeriod {
    /// Period in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u32>,
}

/// Request body for creating an alert definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlertDefRequest {
    /// Properties of the new alert
    pub alert_def_properties: AlertDefProperties,
}

/// Request body for replacing an alert definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceAlertDefRequest {
    /// Identity of the alert being replaced
    pub id: String,

    /// Full replacement properties
    pub alert_def_properties: AlertDefProperties,
}

/// Response envelope carrying a single alert definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDefResponse {
    /// The alert as stored by the backend
    pub alert_def: AlertDef,
}

/// Alert priority codes
pub mod priority {
    /// Lowest priority, also the wire default
    pub const P5_OR_UNSPECIFIED: i32 = 0;
    /// P4
    pub const P4: i32 = 1;
    /// P3
    pub const P3: i32 = 2;
    /// P2
    pub const P2: i32 = 3;
    /// Highest priority
    pub const P1: i32 = 4;
}

/// Notify-on codes shared by incident settings and advanced targets
pub mod notify_on {
    /// Notify when triggered only
    pub const TRIGGERED_ONLY_UNSPECIFIED: i32 = 0;
    /// Notify when triggered and again when resolved
    pub const TRIGGERED_AND_RESOLVED: i32 = 1;
}
