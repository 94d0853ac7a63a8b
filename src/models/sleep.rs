//! Sleep logs.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{form_time, Entity, DATE_FORMAT};
use crate::forms::{FieldErrors, FormData, Validator};

const SCORE: std::ops::RangeInclusive<i64> = 1..=5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sleep {
    /// Sleep quality, 5 is great and 1 is poor.
    pub rating: i64,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// How rested on waking, same scale as `rating`.
    pub feel: i64,
    pub sleep_date: NaiveDate,
    pub wake_date: NaiveDate,
    pub minutes_to_sleep: i64,
}

impl Entity for Sleep {
    const NAME: &'static str = "sleep";
    const PLURAL: &'static str = "sleeps";
    const LABEL: &'static str = "sleep log";
    const FIELDS: &'static [&'static str] = &[
        "rating",
        "start_time",
        "end_time",
        "feel",
        "sleep_date",
        "wake_date",
        "minutes_to_sleep",
    ];

    fn validate(form: &FormData) -> Result<Self, FieldErrors> {
        let mut v = Validator::new(form);
        let sleep = Sleep {
            rating: v.integer_in("rating", SCORE, None),
            start_time: v.time("start_time"),
            end_time: v.time("end_time"),
            feel: v.integer_in("feel", SCORE, None),
            sleep_date: v.date("sleep_date"),
            wake_date: v.date("wake_date"),
            minutes_to_sleep: v.integer_in(
                "minutes_to_sleep",
                0..=180,
                Some("Enter a number between 0 and 180."),
            ),
        };
        v.finish(sleep)
    }

    fn to_form(&self) -> FormData {
        FormData::new()
            .with("rating", self.rating)
            .with("start_time", form_time(self.start_time))
            .with("end_time", form_time(self.end_time))
            .with("feel", self.feel)
            .with("sleep_date", self.sleep_date.format(DATE_FORMAT))
            .with("wake_date", self.wake_date.format(DATE_FORMAT))
            .with("minutes_to_sleep", self.minutes_to_sleep)
    }
}
