//! Weekly activity window.
//!
//! An absent schedule means always active and is never synthesized on read.

use super::enums::DAY_OF_WEEK;
use super::primitives::{child, index};
use crate::model::{ActiveOnModel, ScheduleModel};
use alertdef_core::{ActivitySchedule, AlertDefError, Result, TimeOfDay};
use chrono::{NaiveTime, Timelike};
use std::collections::HashSet;

const TIME_FORMAT: &str = "%H:%M";

pub fn expand_schedule(model: Option<&ScheduleModel>, path: &str) -> Result<Option<ActivitySchedule>> {
    let Some(active_on) = model.and_then(|m| m.active_on.as_ref()) else {
        return Ok(None);
    };
    let path = child(path, "active_on");

    let days_path = child(&path, "days_of_week");
    let mut seen = HashSet::new();
    let mut day_of_week = Vec::with_capacity(active_on.days_of_week.len());
    for (i, day) in active_on.days_of_week.iter().enumerate() {
        let code = DAY_OF_WEEK.to_domain(day, &index(&days_path, i))?;
        if !seen.insert(code) {
            return Err(AlertDefError::invalid(
                index(&days_path, i),
                format!("{day} is listed more than once"),
            ));
        }
        day_of_week.push(code);
    }

    Ok(Some(ActivitySchedule {
        day_of_week,
        start_time: expand_time(active_on.start_time.as_deref(), &child(&path, "start_time"))?,
        end_time: expand_time(active_on.end_time.as_deref(), &child(&path, "end_time"))?,
    }))
}

pub fn flatten_schedule(schedule: Option<&ActivitySchedule>) -> Result<Option<ScheduleModel>> {
    let Some(schedule) = schedule else {
        return Ok(None);
    };
    let mut seen = HashSet::new();
    let days_of_week = schedule
        .day_of_week
        .iter()
        .map(|&code| {
            if seen.insert(code) {
                DAY_OF_WEEK.to_config(code)
            } else {
                Err(AlertDefError::unmapped("active_on.day_of_week", code))
            }
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Some(ScheduleModel {
        active_on: Some(ActiveOnModel {
            days_of_week,
            start_time: schedule
                .start_time
                .map(|t| flatten_time(t, "active_on.start_time"))
                .transpose()?,
            end_time: schedule
                .end_time
                .map(|t| flatten_time(t, "active_on.end_time"))
                .transpose()?,
        }),
    }))
}

/// Zero-padded `HH:MM`, the only form flatten writes
fn is_hh_mm(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 5
        && bytes[2] == b':'
        && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit())
}

fn expand_time(value: Option<&str>, path: &str) -> Result<Option<TimeOfDay>> {
    value
        .map(|value| {
            NaiveTime::parse_from_str(value, TIME_FORMAT)
                .ok()
                .filter(|_| is_hh_mm(value))
                .map(|time| TimeOfDay {
                    hours: time.hour(),
                    minutes: time.minute(),
                })
                .ok_or_else(|| {
                    AlertDefError::invalid(
                        path,
                        format!("\"{value}\" is not a time of day in HH:MM form"),
                    )
                })
        })
        .transpose()
}

fn flatten_time(time: TimeOfDay, field: &str) -> Result<String> {
    NaiveTime::from_hms_opt(time.hours, time.minutes, 0)
        .map(|t| t.format(TIME_FORMAT).to_string())
        .ok_or_else(|| AlertDefError::unmapped(field, format!("{}:{}", time.hours, time.minutes)))
}
