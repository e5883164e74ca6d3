use serde::{Deserialize, Serialize};

/// Weekly window during which an alert is evaluated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySchedule {
    /// Day codes, see [`day_of_week`]
    #[serde(default)]
    pub day_of_week: Vec<i32>,

    /// Window start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<TimeOfDay>,

    /// Window end
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<TimeOfDay>,
}

/// Wall-clock time without a date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    /// Hour, 0-23
    #[serde(default)]
    pub hours: u32,

    /// Minute, 0-59
    #[serde(default)]
    pub minutes: u32,
}

/// Day-of-week codes
pub mod day_of_week {
    /// Monday, also the wire default
    pub const MONDAY_OR_UNSPECIFIED: i32 = 0;
    /// Tuesday
    pub const TUESDAY: i32 = 1;
    /// Wednesday
    pub const WEDNESDAY: i32 = 2;
    /// Thursday
    pub const THURSDAY: i32 = 3;
    /// Friday
    pub const FRIDAY: i32 = 4;
    /// Saturday
    pub const SATURDAY: i32 = 5;
    /// Sunday
    pub const SUNDAY: i32 = 6;
}
