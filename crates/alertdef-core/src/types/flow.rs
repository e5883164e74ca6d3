use serde::{Deserialize, Serialize};

/// Sequential correlation of other alert definitions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    /// Stages, evaluated in order
    #[serde(default)]
    pub stages: Vec<FlowStage>,

    /// Suppress the member alerts' own notifications
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce_suppression: Option<bool>,
}

/// One step of a flow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowStage {
    /// Groups within the stage, in order
    #[serde(default)]
    pub flow_stages_groups: Vec<FlowStagesGroup>,

    /// Stage timeframe in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe_ms: Option<i64>,

    /// See [`timeframe_type`]
    #[serde(default)]
    pub timeframe_type: i32,
}

/// Group of alert references combined with one operator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowStagesGroup {
    /// Referenced alerts
    #[serde(default)]
    pub alert_defs: Vec<FlowStagesGroupsAlertDef>,

    /// Operator joining this group to the next, see [`flow_operator`]
    #[serde(default)]
    pub next_op: i32,

    /// Operator joining alerts within the group, see [`flow_operator`]
    #[serde(default)]
    pub alerts_op: i32,
}

/// Reference to another alert definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowStagesGroupsAlertDef {
    /// Identity of the referenced alert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Match when the referenced alert did not fire
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not: Option<bool>,
}

/// Stage timeframe kind codes
pub mod timeframe_type {
    /// No timeframe semantics
    pub const UNSPECIFIED: i32 = 0;
    /// Within at most the timeframe
    pub const UP_TO: i32 = 1;
}

/// Boolean combination codes
pub mod flow_operator {
    /// AND, also the wire default
    pub const AND_OR_UNSPECIFIED: i32 = 0;
    /// OR
    pub const OR: i32 = 1;
}
