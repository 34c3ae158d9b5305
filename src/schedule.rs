use chrono::{Datelike, Local, NaiveDate, Weekday};
use std::collections::BTreeMap;

use crate::config::PostingWindow;
use crate::Platform;

/// Calendar facts an analysis depends on: the year for timeliness and the
/// weekday for the posting schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceTime {
    pub year: i32,
    pub weekday: Weekday,
}

impl ReferenceTime {
    pub fn now() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            weekday: date.weekday(),
        }
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday, Weekday::Sat | Weekday::Sun)
    }
}

/// Posting window per platform for the day in `at`. Platforms missing from
/// `schedule` are omitted.
pub fn posting_times(
    schedule: &BTreeMap<String, PostingWindow>,
    platforms: &[Platform],
    at: ReferenceTime,
) -> BTreeMap<Platform, String> {
    platforms
        .iter()
        .filter_map(|platform| {
            schedule.get(platform.as_str()).map(|window| {
                let slot = if at.is_weekend() {
                    &window.weekend
                } else {
                    &window.weekday
                };
                (*platform, slot.clone())
            })
        })
        .collect()
}
