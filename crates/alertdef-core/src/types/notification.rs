use serde::{Deserialize, Serialize};

/// Notification routing for an alert
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationGroup {
    /// Fields used to split notifications, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_by_fields: Vec<String>,

    /// Simple or advanced targets; the backend never holds both
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<NotificationTargets>,
}

/// The two mutually exclusive target-list shapes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationTargets {
    /// Targets notified with the alert's own incident settings
    Simple(SimpleTargetSettings),
    /// Targets with their own retriggering and notify-on behaviour
    Advanced(AdvancedTargetSettings),
}

/// List of simple targets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleTargetSettings {
    /// Ordered targets
    #[serde(default)]
    pub integrations: Vec<IntegrationTarget>,
}

/// List of advanced targets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedTargetSettings {
    /// Ordered targets
    #[serde(default)]
    pub advanced_target_settings: Vec<AdvancedTargetSetting>,
}

/// A target with per-target notification behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedTargetSetting {
    /// Minimum minutes between repeated notifications
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retriggering_period_minutes: Option<u32>,

    /// Notify-on code, see [`super::notify_on`]
    #[serde(default)]
    pub notify_on: i32,

    /// Where notifications go
    pub integration: IntegrationTarget,
}

/// Destination of a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntegrationTarget {
    /// A pre-configured outbound integration
    IntegrationId(u32),
    /// Ordered email recipients
    Recipients(Vec<String>),
}
