use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{string_or_number, Resource};
use crate::query::Query;

/// An entry from an ad set's change history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdSetActivity {
    #[serde(default, deserialize_with = "string_or_number")]
    pub actor_id: Option<String>,
    pub actor_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub application_id: Option<String>,
    pub application_name: Option<String>,
    pub date_time_in_timezone: Option<String>,
    pub event_time: Option<String>,
    pub event_type: Option<String>,
    pub extra_data: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub object_id: Option<String>,
    pub object_name: Option<String>,
    pub object_type: Option<String>,
    pub translated_event_type: Option<String>,
}

impl Resource for AdSetActivity {
    const FIELDS: &'static [&'static str] = &[
        "actor_id",
        "actor_name",
        "application_id",
        "application_name",
        "date_time_in_timezone",
        "event_time",
        "event_type",
        "extra_data",
        "object_id",
        "object_name",
        "object_type",
        "translated_event_type",
    ];
}

/// `since`/`until` bounds for the activities edge, sent as unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityWindow {
    pub from: DateTime<Local>,
    pub to: DateTime<Local>,
}

impl ActivityWindow {
    pub fn new(from: DateTime<Local>, to: DateTime<Local>) -> Self {
        Self { from, to }
    }

    pub fn day(date: NaiveDate) -> Self {
        Self {
            from: local_at(date, 0, 0, 0),
            to: local_at(date, 23, 59, 59),
        }
    }

    pub fn today() -> Self {
        Self::day(Local::now().date_naive())
    }

    pub(crate) fn to_query(self) -> Query {
        Query::new()
            .param("since", self.from.timestamp())
            .param("until", self.to.timestamp())
    }
}

impl Default for ActivityWindow {
    fn default() -> Self {
        Self::today()
    }
}

// Falls back to now for wall-clock times skipped by a DST change.
fn local_at(date: NaiveDate, hour: u32, min: u32, sec: u32) -> DateTime<Local> {
    date.and_hms_opt(hour, min, sec)
        .and_then(|dt| dt.and_local_timezone(Local).earliest())
        .unwrap_or_else(Local::now)
}
